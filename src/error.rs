//! Error types for Sharebox.

use thiserror::Error;

/// Common error type for Sharebox.
#[derive(Error, Debug)]
pub enum ShareError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (wrong password).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Access to an item is blocked by its access mode.
    #[error("access blocked: {0}")]
    AccessBlocked(String),

    /// Sidecar metadata could not be encoded or decoded.
    #[error("metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for Sharebox operations.
pub type Result<T> = std::result::Result<T, ShareError>;
