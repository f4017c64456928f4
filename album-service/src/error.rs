//! Error types for the album service
//!
//! Every failure leaves the service as `{"error": "<message>"}`.

use album_common::api::{ErrorResponse, NOT_FOUND_MESSAGE};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{debug, error};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown or malformed album id (404)
    #[error("Not found")]
    NotFound,

    /// Validation failure or unreadable body (400)
    #[error("{0}")]
    BadRequest(String),

    /// Store failure (500)
    #[error("{0}")]
    Internal(String),
}

impl From<album_common::Error> for ApiError {
    fn from(err: album_common::Error) -> Self {
        match err {
            album_common::Error::NotFound(_) => ApiError::NotFound,
            album_common::Error::Validation(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            ApiError::BadRequest(msg) => {
                debug!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Internal(msg) => {
                error!("Store error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_error_mapping() {
        let not_found: ApiError = album_common::Error::NotFound("x".to_string()).into();
        assert!(matches!(not_found, ApiError::NotFound));

        let invalid: ApiError = album_common::Error::validation("title is required").into();
        assert!(matches!(invalid, ApiError::BadRequest(ref m) if m == "title is required"));

        let config: ApiError = album_common::Error::Config("bad".to_string()).into();
        assert!(matches!(config, ApiError::Internal(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::BadRequest("x".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("x".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
