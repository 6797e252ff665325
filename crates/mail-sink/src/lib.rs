//! Mail delivery for the Commandpost daemon.
//!
//! This crate provides:
//! - The `MailSink` trait the digest scheduler delivers through
//! - `HttpMailer`: an HTTP mail API client
//! - `RecordingSink`: an in-memory sink for tests

mod error;
mod http;
mod memory;

pub use error::{MailSinkError, MailSinkResult};
pub use http::{HttpMailer, MailerConfig};
pub use memory::RecordingSink;

use std::future::Future;
use std::pin::Pin;

/// A fully rendered digest ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Rendered subject line.
    pub subject: String,
    /// Rendered HTML body.
    pub html_body: String,
    /// Recipient address.
    pub to: String,
}

/// Boxed future returned by [`MailSink::deliver`].
pub type DeliveryFuture = Pin<Box<dyn Future<Output = MailSinkResult<()>> + Send>>;

/// Delivery seam between the digest scheduler and the mail transport.
///
/// Implementations make exactly one attempt per call. The scheduler never
/// retries a failed digest, so a returned error means the digest is dropped.
pub trait MailSink: Send + Sync {
    /// Deliver one mail. One attempt, no retry.
    fn deliver(&self, mail: OutgoingMail) -> DeliveryFuture;
}
