use actix_web::{http::StatusCode, ResponseError};
use thiserror::Error;

/// Failures that stop the process before or while serving.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Environment config error: {0}")]
    EnvConfig(#[source] envy::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    #[error("{0}")]
    Certificate(String),

    #[error("Metrics error: {0}")]
    Metrics(String),
}

/// Per-request failures of the `/mutate` endpoint.
///
/// Decode failures are attributed to the caller and answered with 400, encode failures
/// are ours and answered with 500. Neither ever crashes the server.
#[derive(Debug, Error)]
pub enum AdmissionError {
    #[error("Error decoding admission review: {0}")]
    InvalidReview(#[source] serde_json::Error),

    #[error("Unsupported admission review: apiVersion '{api_version}', kind '{kind}'")]
    UnsupportedReview { api_version: String, kind: String },

    #[error("Admission review has no request")]
    MissingRequest,

    #[error("Admission request '{0}' has no object")]
    MissingObject(String),

    #[error("Error unmarshaling pod: {0}")]
    InvalidPod(#[source] serde_json::Error),

    #[error("Error marshaling JSON patch: {0}")]
    PatchEncoding(#[source] serde_json::Error),

    #[error("Error marshaling admission review response: {0}")]
    ReviewEncoding(#[source] serde_json::Error),
}

impl AdmissionError {
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AdmissionError::PatchEncoding(_) | AdmissionError::ReviewEncoding(_))
    }

    /// Label used for the errors metric
    pub fn name(&self) -> &'static str {
        match self {
            AdmissionError::InvalidReview(_) => "invalid_review",
            AdmissionError::UnsupportedReview { .. } => "unsupported_review",
            AdmissionError::MissingRequest => "missing_request",
            AdmissionError::MissingObject(_) => "missing_object",
            AdmissionError::InvalidPod(_) => "invalid_pod",
            AdmissionError::PatchEncoding(_) => "patch_encoding",
            AdmissionError::ReviewEncoding(_) => "review_encoding",
        }
    }
}

impl ResponseError for AdmissionError {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("not json").unwrap_err()
    }

    #[test]
    fn test_decode_errors_are_bad_requests() {
        let errors = vec![
            AdmissionError::InvalidReview(json_error()),
            AdmissionError::UnsupportedReview {
                api_version: "v1".to_owned(),
                kind: "Pod".to_owned(),
            },
            AdmissionError::MissingRequest,
            AdmissionError::MissingObject("abc".to_owned()),
            AdmissionError::InvalidPod(json_error()),
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{}", err);
        }
    }

    #[test]
    fn test_encode_errors_are_server_errors() {
        assert_eq!(
            AdmissionError::PatchEncoding(json_error()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AdmissionError::ReviewEncoding(json_error()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_message() {
        let err = AdmissionError::MissingObject("abc-1".to_owned());
        assert_eq!(err.to_string(), "Admission request 'abc-1' has no object");
        assert_eq!(err.name(), "missing_object");
    }
}
