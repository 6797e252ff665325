//! Digest scheduling over the command buffer.

use crate::{render_digest, CommandBuffer, CommandRecord, DigestSettings, RecordOutcome};
use chrono::Utc;
use mail_sink::{MailSink, OutgoingMail};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// How a digest send relates to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Spawn the send and return immediately.
    Background,
    /// Await the send before returning. Shutdown uses this so the final
    /// flush cannot be cut off by process exit.
    Blocking,
}

/// Snapshot of buffer occupancy and the settings in effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerStatus {
    /// Server name from the currently loaded settings.
    pub server_name: String,
    /// Players with an open digest entry.
    pub pending_players: usize,
    /// Buffered commands across all players.
    pub pending_commands: usize,
}

/// Coordinates filtering, buffering, digest timers, and delivery.
///
/// The first recorded command for a player opens an entry and starts that
/// player's digest timer. Later commands join the same entry without
/// touching the timer. When the window elapses the entry is flushed as one
/// mail; manual flushes and shutdown drain every entry at once.
///
/// Cheap to clone. Clones share one buffer and one settings value.
#[derive(Clone)]
pub struct DigestScheduler {
    inner: Arc<SchedulerInner>,
}

struct SchedulerInner {
    buffer: CommandBuffer,
    settings: RwLock<DigestSettings>,
    sink: Arc<dyn MailSink>,
}

impl DigestScheduler {
    /// Create a scheduler delivering digests through the given sink.
    pub fn new(settings: DigestSettings, sink: Arc<dyn MailSink>) -> Self {
        Self {
            inner: Arc::new(SchedulerInner {
                buffer: CommandBuffer::new(),
                settings: RwLock::new(settings),
                sink,
            }),
        }
    }

    /// Feed one observed command through the filter into the buffer.
    ///
    /// Returns true when the command was recorded. A player's timer is
    /// started by their first recorded command and is never reset or
    /// extended afterwards; the window in effect at that moment governs
    /// the whole entry. Must run inside a tokio runtime.
    pub fn observe_command(&self, player: &str, command: &str, is_op: bool) -> bool {
        let (admitted, window) = {
            let settings = self.inner.settings.read().expect("lock poisoned");
            (settings.filter.should_log(is_op, command), settings.window)
        };
        if !admitted {
            return false;
        }

        let record = CommandRecord {
            at: Utc::now(),
            text: command.to_string(),
        };
        let inner = self.inner.clone();
        let timer_player = player.to_string();
        let outcome = self.inner.buffer.record(player, record, || {
            tokio::spawn(async move {
                tokio::time::sleep(window).await;
                inner.flush_expired(&timer_player);
            })
        });

        match outcome {
            RecordOutcome::Opened => {
                debug!(player = %player, window_secs = window.as_secs(), "Opened digest entry");
                true
            }
            RecordOutcome::Joined => true,
            RecordOutcome::Refused => {
                debug!(player = %player, "Scheduler closed, ignoring command event");
                false
            }
        }
    }

    /// Flush every pending entry now, one mail per player.
    ///
    /// All timers are cancelled along the way, so nothing is sent twice.
    /// Returns the number of players flushed. Delivery failures count too:
    /// they are logged and the digest is dropped, never retried.
    pub async fn flush_all(&self, mode: DeliveryMode) -> usize {
        self.inner.flush_all(mode).await
    }

    /// Flush everything with blocking sends and refuse further events.
    ///
    /// Closing and recording share the buffer lock, so an event racing
    /// this call is either part of the final flush or refused; it cannot
    /// land in the buffer afterwards. Safe to call more than once; later
    /// calls return 0 without touching anything.
    pub async fn shutdown(&self) -> usize {
        if !self.inner.buffer.close() {
            debug!("Digest scheduler already shut down");
            return 0;
        }

        let flushed = self.inner.flush_all(DeliveryMode::Blocking).await;
        info!(flushed = flushed, "Digest scheduler shut down");
        flushed
    }

    /// Swap in new settings.
    ///
    /// Applies to future admission decisions, newly opened entries, and
    /// any digest rendered from now on. Entries already buffered keep
    /// their original timer schedule.
    pub fn reload(&self, settings: DigestSettings) {
        *self.inner.settings.write().expect("lock poisoned") = settings;
        info!("Digest settings reloaded");
    }

    /// Current buffer occupancy and active server name.
    pub fn status(&self) -> SchedulerStatus {
        let server_name = self
            .inner
            .settings
            .read()
            .expect("lock poisoned")
            .server_name
            .clone();
        SchedulerStatus {
            server_name,
            pending_players: self.inner.buffer.pending_players(),
            pending_commands: self.inner.buffer.pending_commands(),
        }
    }
}

impl SchedulerInner {
    /// Timer landing point: flush one player whose window elapsed.
    ///
    /// Never awaits between taking the records and handing the mail to a
    /// fresh send task, so aborting the timer cannot strand records that
    /// already left the buffer. A timer whose entry was drained earlier
    /// finds nothing and leaves quietly.
    fn flush_expired(&self, player: &str) {
        if self.buffer.is_closed() {
            return;
        }
        let Some(records) = self.buffer.take(player) else {
            debug!(player = %player, "Timer fired for an already-flushed player");
            return;
        };

        let settings = self.settings.read().expect("lock poisoned").clone();
        let mail = render_digest(&settings, player, &records);
        info!(player = %player, commands = records.len(), "Digest window elapsed, sending digest");
        self.deliver_background(player, mail);
    }

    async fn flush_all(&self, mode: DeliveryMode) -> usize {
        let drained = self.buffer.drain_all();
        if drained.is_empty() {
            return 0;
        }

        let settings = self.settings.read().expect("lock poisoned").clone();
        let flushed = drained.len();

        for (player, records) in drained {
            let mail = render_digest(&settings, &player, &records);
            info!(player = %player, commands = records.len(), "Flushing digest");
            match mode {
                DeliveryMode::Background => self.deliver_background(&player, mail),
                DeliveryMode::Blocking => {
                    if let Err(e) = self.sink.deliver(mail).await {
                        warn!(player = %player, error = %e, "Digest delivery failed");
                    }
                }
            }
        }

        flushed
    }

    fn deliver_background(&self, player: &str, mail: OutgoingMail) {
        let sink = self.sink.clone();
        let player = player.to_string();
        tokio::spawn(async move {
            if let Err(e) = sink.deliver(mail).await {
                warn!(player = %player, error = %e, "Digest delivery failed");
            }
        });
    }
}
