//! Per-player pending command storage.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::task::JoinHandle;

/// One recorded command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    /// When the command was observed.
    pub at: DateTime<Utc>,
    /// Command line as received, including the leading slash.
    pub text: String,
}

/// What the buffer did with a record handed to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// First record for the player; an entry and its timer were created.
    Opened,
    /// The record joined the player's existing entry.
    Joined,
    /// The buffer is closed; nothing was stored and no timer was created.
    Refused,
}

/// A player's buffered records plus the timer task that will flush them.
struct PendingEntry {
    records: Vec<CommandRecord>,
    timer: JoinHandle<()>,
}

struct BufferState {
    entries: HashMap<String, PendingEntry>,
    closed: bool,
}

/// Pending commands keyed by player name.
///
/// An entry and its timer are created together under the buffer lock and
/// leave together: removal hands back the records and detaches or aborts
/// the timer. A timer that outlives its entry finds nothing to flush.
///
/// Closing happens under the same lock, so a record racing the close
/// either lands in time for the final drain or is refused outright.
pub struct CommandBuffer {
    state: Mutex<BufferState>,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BufferState {
                entries: HashMap::new(),
                closed: false,
            }),
        }
    }

    /// Append a record to the player's entry, opening one if needed.
    ///
    /// `make_timer` runs under the buffer lock exactly when a new entry is
    /// created, so the entry and its timer appear atomically. A closed
    /// buffer refuses the record without calling `make_timer`.
    pub fn record(
        &self,
        player: &str,
        record: CommandRecord,
        make_timer: impl FnOnce() -> JoinHandle<()>,
    ) -> RecordOutcome {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.closed {
            return RecordOutcome::Refused;
        }
        match state.entries.get_mut(player) {
            Some(entry) => {
                entry.records.push(record);
                RecordOutcome::Joined
            }
            None => {
                state.entries.insert(
                    player.to_string(),
                    PendingEntry {
                        records: vec![record],
                        timer: make_timer(),
                    },
                );
                RecordOutcome::Opened
            }
        }
    }

    /// Remove and return a player's records, if any are pending.
    ///
    /// The timer handle is dropped without aborting. The expected caller
    /// is the entry's own timer task, already past its sleep. Returns
    /// `None` once the buffer is closed; whatever is still buffered at
    /// that point belongs to the closing drain.
    pub fn take(&self, player: &str) -> Option<Vec<CommandRecord>> {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.closed {
            return None;
        }
        let entry = state.entries.remove(player)?;
        Some(entry.records)
    }

    /// Refuse all records from now on.
    ///
    /// Returns false when the buffer was already closed.
    pub fn close(&self) -> bool {
        let mut state = self.state.lock().expect("lock poisoned");
        !std::mem::replace(&mut state.closed, true)
    }

    /// True once `close` has run.
    pub fn is_closed(&self) -> bool {
        self.state.lock().expect("lock poisoned").closed
    }

    /// Remove every entry, aborting each entry's timer.
    ///
    /// Manual flush and shutdown path. Aborting keeps a drained entry's
    /// timer from firing later.
    pub fn drain_all(&self) -> Vec<(String, Vec<CommandRecord>)> {
        let mut state = self.state.lock().expect("lock poisoned");
        state
            .entries
            .drain()
            .map(|(player, entry)| {
                entry.timer.abort();
                (player, entry.records)
            })
            .collect()
    }

    /// Number of players with a pending entry.
    pub fn pending_players(&self) -> usize {
        self.state.lock().expect("lock poisoned").entries.len()
    }

    /// Total buffered records across all players.
    pub fn pending_commands(&self) -> usize {
        self.state
            .lock()
            .expect("lock poisoned")
            .entries
            .values()
            .map(|e| e.records.len())
            .sum()
    }

    /// True when the player has a pending entry.
    pub fn contains(&self, player: &str) -> bool {
        self.state
            .lock()
            .expect("lock poisoned")
            .entries
            .contains_key(player)
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}
