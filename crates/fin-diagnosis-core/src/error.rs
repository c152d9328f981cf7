use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagnosisError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid diagnosis report: {0}")]
    InvalidReport(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DiagnosisError {
    fn from(e: serde_json::Error) -> Self {
        DiagnosisError::SerializationError(e.to_string())
    }
}
