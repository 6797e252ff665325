//! Application wiring and lifecycle.

mod init;
mod lifecycle;
mod settings;
mod state;

pub use init::run_daemon;
pub use lifecycle::{check_status, flush_now, reload_config, stop_daemon};
pub use settings::settings_from_config;
pub use state::DaemonState;
