//! In-memory mail sink for tests.

use crate::{DeliveryFuture, MailSink, MailSinkError, OutgoingMail};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Sink that records every delivery attempt instead of sending anything.
///
/// Used by scheduler tests. Can be switched into a failing mode to
/// exercise the delivery error paths; attempts are recorded either way.
#[derive(Default)]
pub struct RecordingSink {
    deliveries: Mutex<Vec<OutgoingMail>>,
    failing: AtomicBool,
}

impl RecordingSink {
    /// Creates a new empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delivery fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns a cloned vector of all recorded deliveries.
    pub fn deliveries(&self) -> Vec<OutgoingMail> {
        self.deliveries.lock().expect("lock poisoned").clone()
    }

    /// Returns the count of recorded deliveries.
    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().expect("lock poisoned").len()
    }

    /// Removes all recorded deliveries.
    pub fn clear(&self) {
        self.deliveries.lock().expect("lock poisoned").clear();
    }
}

impl MailSink for RecordingSink {
    /// Records the attempt at call time. The returned future only
    /// resolves the configured outcome.
    fn deliver(&self, mail: OutgoingMail) -> DeliveryFuture {
        let failing = self.failing.load(Ordering::SeqCst);
        self.deliveries.lock().expect("lock poisoned").push(mail);

        Box::pin(async move {
            if failing {
                Err(MailSinkError::Send("recording sink set to fail".to_string()))
            } else {
                Ok(())
            }
        })
    }
}
