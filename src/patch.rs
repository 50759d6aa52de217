use json_patch::{AddOperation, Patch, PatchOperation};
use k8s_openapi::ByteString;

use crate::affinity::CapacityAffinity;
use crate::errors::AdmissionError;
use crate::review::{AdmissionResponse, PatchType};

/// Target of the mutation. An "add" on an existing member replaces it, so any affinity the pod
/// already carries is overwritten.
pub const AFFINITY_PATH: &str = "/spec/affinity";

pub fn affinity_patch(affinity: &CapacityAffinity) -> Result<Patch, AdmissionError> {
    let value = serde_json::to_value(affinity.to_affinity()).map_err(AdmissionError::PatchEncoding)?;
    Ok(Patch(vec![PatchOperation::Add(AddOperation {
        path: AFFINITY_PATH.to_owned(),
        value,
    })]))
}

/// Build the allowing response for request `uid`, carrying the affinity as a JSON Patch.
pub fn assemble(affinity: &CapacityAffinity, uid: &str) -> Result<AdmissionResponse, AdmissionError> {
    let patch = affinity_patch(affinity)?;
    let patch = serde_json::to_vec(&patch).map_err(AdmissionError::PatchEncoding)?;
    Ok(AdmissionResponse {
        uid: uid.to_owned(),
        allowed: true,
        patch_type: Some(PatchType::JsonPatch),
        patch: Some(ByteString(patch)),
    })
}
