use thiserror::Error;

use crate::field::FieldId;

/// Per-field validation failure. Always rendered inline, never propagated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{}", .0.required_message())]
    Required(FieldId),

    #[error("{}", .0.invalid_message())]
    Invalid(FieldId),
}

impl ValidationError {
    pub fn is_required(&self) -> bool {
        matches!(self, ValidationError::Required(_))
    }
}

/// Failure of the durable draft slot. Caught and logged by `DraftCache`.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Local transport failure of the outbound submission call.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("{0}")]
    Other(String),
}
