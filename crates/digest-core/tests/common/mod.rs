//! Shared helpers for scheduler integration tests.

use digest_core::{CommandFilter, DigestScheduler, DigestSettings};
use mail_sink::RecordingSink;
use std::sync::Arc;
use std::time::Duration;

/// Settings with an everything-passes filter and the given window.
pub fn open_settings(window: Duration) -> DigestSettings {
    DigestSettings::new(
        "Test Server",
        "[%serverName%] Command digest for %playerName%",
        "Commands executed by %playerName% on %serverName%:",
        "ops@example.com",
        window,
        CommandFilter::new(&[], &[], false),
    )
}

/// Scheduler wired to a recording sink.
pub fn recording_scheduler(window: Duration) -> (DigestScheduler, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let scheduler = DigestScheduler::new(open_settings(window), sink.clone());
    (scheduler, sink)
}
