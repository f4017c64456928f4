//! Common error types for the album catalog

use thiserror::Error;

/// Common result type for album catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the store, the service and the clients
#[derive(Error, Debug)]
pub enum Error {
    /// Store connectivity or unexpected query failure (wraps sqlx::Error)
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No album exists for the requested identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or missing album fields
    #[error("{0}")]
    Validation(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}
