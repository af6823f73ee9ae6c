use thiserror::Error;

#[derive(Debug, Error)]
pub enum MansionError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MansionError {
    fn from(e: serde_json::Error) -> Self {
        MansionError::SerializationError(e.to_string())
    }
}
