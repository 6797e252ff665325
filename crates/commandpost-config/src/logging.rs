//! Logging initialization for the daemon.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the current process.
///
/// `RUST_LOG` wins when set; otherwise the provided level is used as the
/// filter directive.
pub fn init_logging(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(true)
        .compact()
        .init();
}
