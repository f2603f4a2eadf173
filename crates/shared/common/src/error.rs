//! Unified error handling for HTTP.
//!
//! Provides a single error type for the service that maps onto three stable
//! client-facing codes: `VALIDATION_ERROR` (400), `INVALID_CREDENTIAL` (401)
//! and `INTERNAL_ERROR` (500).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, ErrorDetails, INVALID_CREDENTIAL_MESSAGE};
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Client errors
    #[error("{message}")]
    Validation {
        message: String,
        details: ErrorDetails,
    },

    #[error("invalid credential")]
    InvalidCredential,

    /// Store-level sentinel: the requested record does not exist.
    /// Callers translate it; it must not reach a client as-is.
    #[error("Resource not found")]
    NotFound,

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "jwt")]
    #[error("Token signing error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<ErrorDetails>,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::InvalidCredential => "INVALID_CREDENTIAL",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidCredential => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error is opaque to clients (maps to 500)
    pub fn is_internal(&self) -> bool {
        !matches!(
            self,
            AppError::Validation { .. } | AppError::InvalidCredential
        )
    }

    /// Structured details, only ever present on validation errors
    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            AppError::Validation { details, .. } if !details.is_empty() => Some(details),
            _ => None,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation { message, .. } => message.clone(),
            AppError::InvalidCredential => INVALID_CREDENTIAL_MESSAGE.to_string(),

            // Hide details for internal errors
            AppError::NotFound => {
                tracing::error!("Unhandled not-found sentinel reached the boundary");
                "An internal error occurred".to_string()
            }
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "An internal error occurred".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::error!("Token signing error: {:?}", e);
                "An internal error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.user_message(),
                details: self.details().cloned(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message, details } => AppError::Validation { message, details },
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation {
            message: msg.into(),
            details: ErrorDetails::new(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_codes_and_statuses() {
        let cases = [
            (AppError::validation("bad"), "VALIDATION_ERROR", StatusCode::BAD_REQUEST),
            (AppError::InvalidCredential, "INVALID_CREDENTIAL", StatusCode::UNAUTHORIZED),
            (AppError::NotFound, "INTERNAL_ERROR", StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::internal("boom"), "INTERNAL_ERROR", StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, code, status) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.status(), status);
        }
    }

    #[test]
    fn test_from_domain_error() {
        let err = AppError::from(DomainError::validation_with("status is not changed", [("status", "ACTIVE")]));
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.details().unwrap().get("status").unwrap(), "ACTIVE");

        assert!(AppError::from(DomainError::internal("hash")).is_internal());
    }

    #[test]
    fn test_ok_or_not_found() {
        assert!(matches!(None::<u8>.ok_or_not_found(), Err(AppError::NotFound)));
        assert_eq!(Some(1).ok_or_not_found().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_internal_error_hides_message() {
        let (status, body) = body_json(AppError::internal("connection refused on 10.0.0.3")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "An internal error occurred");
        assert!(body["error"].get("details").is_none());
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let err = AppError::from(DomainError::validation("name is required"));
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "name is required");
    }

    #[tokio::test]
    async fn test_invalid_credential_body() {
        let (status, body) = body_json(AppError::InvalidCredential).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIAL");
        assert_eq!(body["error"]["message"], "invalid credential");
    }
}
