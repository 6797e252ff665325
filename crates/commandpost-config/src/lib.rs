//! Configuration, paths, and logging for the Commandpost daemon.
//!
//! This crate provides:
//! - `Config`: the on-disk daemon configuration
//! - `Paths`: well-known file locations under the base directory
//! - logging initialization shared by the daemon and CLI commands

mod config;
mod error;
mod logging;
mod paths;

pub use config::{Config, MailApiConfig};
pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
pub use paths::Paths;
