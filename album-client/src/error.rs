//! Error types for album-client

use thiserror::Error;

/// Client error type
///
/// `Display` is the text shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The service answered 2xx with a body we could not read
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Rejected by local form validation before any request was sent
    #[error("{0}")]
    Form(String),
}

impl ClientError {
    /// True for a 404 from the service
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status: 404, .. })
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
