//! Daemon state definition.

use commandpost_config::Paths;
use digest_core::DigestScheduler;
use std::sync::Arc;

/// Shared daemon state (thread-safe).
#[derive(Clone)]
pub struct DaemonState {
    /// File locations for config, socket, and PID.
    pub paths: Arc<Paths>,
    /// Digest scheduler owning the buffer and timers.
    pub scheduler: DigestScheduler,
}
