//! Error types shared across the service
//!
//! The taxonomy mirrors how errors are allowed to surface: validation
//! failures are the only errors that reach the HTTP caller as a failure,
//! everything else is recovered locally and rendered as an opaque 500 if it
//! ever escapes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Error types for the translation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Bad input shape, length, or unsupported language code.
    /// Surfaced to the caller as a 422 with a structured body.
    Validation(String),
    /// External translation provider failed. Recovered locally by the
    /// dictionary fallback, never surfaced.
    Provider(String),
    /// Durable log backend unavailable. Recovered locally by the in-memory
    /// downgrade, never fails a translate call.
    Storage(String),
    /// Anything unexpected. Surfaced as a generic 500 with no detail leaked.
    Internal(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ServiceError::Provider(msg) => write!(f, "Provider error: {}", msg),
            ServiceError::Storage(msg) => write!(f, "Storage error: {}", msg),
            ServiceError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Provider(err.to_string())
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        ServiceError::Storage(err.to_string())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, error, message, kind) = match self {
            ServiceError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation Error",
                msg,
                "validation_error",
            ),
            ServiceError::Provider(_) | ServiceError::Storage(_) | ServiceError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "An unexpected error occurred".to_string(),
                "internal_error",
            ),
        };

        let body = Json(json!({
            "error": error,
            "message": message,
            "type": kind,
        }));

        (status, body).into_response()
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_category() {
        let err = ServiceError::Validation("Text cannot be empty".to_string());
        assert_eq!(err.to_string(), "Validation error: Text cannot be empty");

        let err = ServiceError::Storage("disk unavailable".to_string());
        assert_eq!(err.to_string(), "Storage error: disk unavailable");
    }

    #[test]
    fn test_validation_maps_to_422() {
        let response =
            ServiceError::Validation("bad input".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_internal_errors_map_to_500() {
        for err in [
            ServiceError::Provider("api down".to_string()),
            ServiceError::Storage("db gone".to_string()),
            ServiceError::Internal("boom".to_string()),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
