//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent input and structure violations.
/// These are independent of configuration and presentation concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("empty input")]
    EmptyInput,

    #[error("invalid JSON: {message}")]
    Parse { message: String },

    #[error("invalid adjacency map: {reason}")]
    Schema { reason: String },

    #[error("cyclic reference in hierarchy: {0}")]
    CycleDetected(String),
}

impl DomainError {
    /// Short message suitable for showing next to the input field.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::EmptyInput => "Please enter JSON data".to_string(),
            DomainError::Parse { .. } => "Invalid JSON format".to_string(),
            DomainError::Schema { .. } => {
                "Invalid format: Must be an object with all values as arrays".to_string()
            }
            DomainError::CycleDetected(name) => {
                format!("Cyclic reference detected at: {}", name)
            }
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
