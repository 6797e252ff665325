//! Per-player command buffering and email digest scheduling.
//!
//! This crate implements the digest pipeline of the Commandpost daemon:
//! - `CommandFilter`: decides which executed commands get recorded
//! - `CommandBuffer`: pending records per player, tied to a digest timer
//! - `DigestScheduler`: filtering, buffering, timers, and delivery
//! - `render_digest`: turns buffered records into an outgoing mail

mod buffer;
mod filter;
mod render;
mod scheduler;
mod settings;

pub use buffer::{CommandBuffer, CommandRecord, RecordOutcome};
pub use filter::CommandFilter;
pub use render::{render_digest, PLAYER_NAME_PLACEHOLDER};
pub use scheduler::{DeliveryMode, DigestScheduler, SchedulerStatus};
pub use settings::{DigestSettings, SERVER_NAME_PLACEHOLDER};
