//! Error types for the record service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Validation Error Enum ==
/// Input rejected before any cache or backing-store access.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid key format")]
    InvalidKey,

    #[error("invalid title")]
    InvalidTitle,

    #[error("invalid content")]
    InvalidContent,

    #[error("invalid pagination parameters")]
    InvalidPagination,
}

// == Record Error Enum ==
/// Unified error type for record operations.
///
/// Backing-store failures travel through the orchestrator unchanged.
#[derive(Error, Debug)]
pub enum RecordError {
    /// No record stored under the key
    #[error("record not found: {0}")]
    NotFound(String),

    /// A record with the key already exists
    #[error("record already exists: {0}")]
    DuplicateKey(String),

    /// Request data failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The caller's cancellation token fired before the backing store answered
    #[error("operation cancelled")]
    Cancelled,

    /// Unclassified backing-store or runtime failure
    #[error("internal error: {0}")]
    Internal(String),
}

// == Cache Error Enum ==
/// Misuse of the cache lifecycle. Regular cache operations never fail.
#[derive(Error, Debug)]
pub enum CacheError {
    /// `stop` was already called on this store
    #[error("sweeper already stopped")]
    SweeperStopped,

    /// The sweeper task panicked or was aborted
    #[error("sweeper task failed: {0}")]
    SweeperJoin(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for RecordError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            RecordError::NotFound(_) => (StatusCode::NOT_FOUND, "Record not found".to_string()),
            RecordError::DuplicateKey(_) => (
                StatusCode::CONFLICT,
                "Record with this key already exists".to_string(),
            ),
            RecordError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            RecordError::Cancelled => {
                (StatusCode::REQUEST_TIMEOUT, "Request cancelled".to_string())
            }
            RecordError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for record operations.
pub type Result<T> = std::result::Result<T, RecordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (RecordError::NotFound("a".to_string()), StatusCode::NOT_FOUND),
            (RecordError::DuplicateKey("a".to_string()), StatusCode::CONFLICT),
            (
                RecordError::Validation(ValidationError::InvalidKey),
                StatusCode::BAD_REQUEST,
            ),
            (
                RecordError::Validation(ValidationError::InvalidPagination),
                StatusCode::BAD_REQUEST,
            ),
            (RecordError::Cancelled, StatusCode::REQUEST_TIMEOUT),
            (
                RecordError::Internal("db down".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in test_cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_validation_converts_into_record_error() {
        let err: RecordError = ValidationError::InvalidTitle.into();
        assert!(matches!(
            err,
            RecordError::Validation(ValidationError::InvalidTitle)
        ));
        assert_eq!(err.to_string(), "invalid title");
    }
}
