use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaseValError {
    #[error("Invalid assumptions: {field} — {reason}")]
    InvalidAssumptions { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CaseValError {
    fn from(e: serde_json::Error) -> Self {
        CaseValError::SerializationError(e.to_string())
    }
}
