//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic input failures. Missing records and
/// storage failures are store concerns and live in `shopfloor-infra`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a required field is missing).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Shorthand for the "required field absent" failure of create operations.
    pub fn missing_field(field: &'static str) -> Self {
        Self::Validation(format!("{field} is required"))
    }
}

/// Unwrap a required create-time field or fail with a validation error naming it.
pub fn require<T>(value: Option<T>, field: &'static str) -> DomainResult<T> {
    value.ok_or_else(|| DomainError::missing_field(field))
}
