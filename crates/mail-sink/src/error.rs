//! Mail sink error types.

use thiserror::Error;

/// Mail delivery error type.
#[derive(Error, Debug)]
pub enum MailSinkError {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Send rejected by the mail API
    #[error("Send failed: {0}")]
    Send(String),

    /// Mailer misconfiguration
    #[error("Mailer config error: {0}")]
    Config(String),
}

/// Result type alias using MailSinkError.
pub type MailSinkResult<T> = Result<T, MailSinkError>;
