use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::runtime::RawExtension;
use k8s_openapi::ByteString;
use serde::{Deserialize, Serialize};

use crate::errors::AdmissionError;

pub const ADMISSION_REVIEW_KIND: &str = "AdmissionReview";
pub const SUPPORTED_API_VERSIONS: &[&str] = &["admission.k8s.io/v1", "admission.k8s.io/v1beta1"];

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<AdmissionRequest>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<AdmissionResponse>,
}

/// Only the fields the webhook needs; everything else the API server sends is ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionRequest {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<RawExtension>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatchType {
    #[serde(rename = "JSONPatch")]
    JsonPatch,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionResponse {
    pub uid: String,
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_type: Option<PatchType>,
    /// JSON Patch document, base64 encoded on the wire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<ByteString>,
}

/// A decoded `/mutate` call: what the rest of the pipeline needs from the envelope.
#[derive(Clone, Debug)]
pub struct ReviewRequest {
    pub api_version: String,
    pub uid: String,
    pub pod: Pod,
}

impl ReviewRequest {
    pub fn pod_name(&self) -> &str {
        self.pod
            .metadata
            .name
            .as_deref()
            .or_else(|| self.pod.metadata.generate_name.as_deref())
            .unwrap_or("")
    }
}

/// Decode the raw body of an admission call into the request UID and its pod.
pub fn decode(body: &[u8]) -> Result<ReviewRequest, AdmissionError> {
    let review: AdmissionReview = serde_json::from_slice(body).map_err(AdmissionError::InvalidReview)?;

    let api_version = review.api_version.unwrap_or_default();
    let kind = review.kind.unwrap_or_default();
    if kind != ADMISSION_REVIEW_KIND || !SUPPORTED_API_VERSIONS.contains(&api_version.as_str()) {
        return Err(AdmissionError::UnsupportedReview { api_version, kind });
    }

    let request = review.request.ok_or(AdmissionError::MissingRequest)?;
    let object = match request.object {
        Some(object) => object,
        None => return Err(AdmissionError::MissingObject(request.uid)),
    };
    let pod: Pod = serde_json::from_value(object.0).map_err(AdmissionError::InvalidPod)?;

    Ok(ReviewRequest {
        api_version,
        uid: request.uid,
        pod,
    })
}

/// Wrap a response into an envelope of the same version the request used and serialize it.
pub fn encode(api_version: &str, response: AdmissionResponse) -> Result<Vec<u8>, AdmissionError> {
    let review = AdmissionReview {
        api_version: Some(api_version.to_owned()),
        kind: Some(ADMISSION_REVIEW_KIND.to_owned()),
        request: None,
        response: Some(response),
    };
    serde_json::to_vec(&review).map_err(AdmissionError::ReviewEncoding)
}
