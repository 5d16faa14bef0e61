//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// Unknown sentiment category name
    #[error("Unknown sentiment category: {0}")]
    UnknownCategory(String),

    /// Unknown reply status value
    #[error("Unknown reply status: {0}")]
    UnknownReplyStatus(String),

    /// Priority value outside the 1-5 range
    #[error("Invalid priority level: {0}")]
    InvalidPriorityLevel(i64),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}
