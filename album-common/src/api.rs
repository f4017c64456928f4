//! API request/response types shared by the service and its clients

use serde::{Deserialize, Serialize};

/// Mount point of the album collection
pub const ALBUMS_PATH: &str = "/api/albums";

/// Body text of every 404 response
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Confirmation returned by a successful delete
pub const DELETED_MESSAGE: &str = "Deleted successfully";

/// Error body: `{"error": "..."}`
///
/// # Examples
///
/// ```
/// use album_common::api::ErrorResponse;
///
/// let body = serde_json::to_value(ErrorResponse::new("Not found")).unwrap();
/// assert_eq!(body["error"], "Not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Plain confirmation body: `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted() -> Self {
        Self {
            message: DELETED_MESSAGE.to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}
