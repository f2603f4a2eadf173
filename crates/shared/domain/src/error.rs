//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use std::collections::BTreeMap;

use thiserror::Error;

/// Structured context attached to a validation failure.
pub type ErrorDetails = BTreeMap<String, String>;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed a local rule before any I/O took place
    #[error("{message}")]
    Validation {
        message: String,
        details: ErrorDetails,
    },

    /// Unexpected failure inside the domain (e.g. the hasher)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Create a validation error without details
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation {
            message: msg.into(),
            details: ErrorDetails::new(),
        }
    }

    /// Create a validation error carrying key/value details
    pub fn validation_with<I, K, V>(msg: impl Into<String>, details: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        DomainError::Validation {
            message: msg.into(),
            details: details
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }

    /// Whether this error is a validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::Validation { .. })
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_with_details() {
        let err = DomainError::validation_with("status is not changed", [("status", "ACTIVE")]);

        match err {
            DomainError::Validation { message, details } => {
                assert_eq!(message, "status is not changed");
                assert_eq!(details.get("status").map(String::as_str), Some("ACTIVE"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display_uses_message() {
        assert_eq!(DomainError::validation("name is required").to_string(), "name is required");
        assert_eq!(DomainError::internal("hash").to_string(), "Internal error: hash");
    }
}
