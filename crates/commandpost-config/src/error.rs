//! Core error types for the daemon.

use thiserror::Error;

/// Core error type.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Path error
    #[error("Path error: {0}")]
    Path(String),
}

/// Result type alias using CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
