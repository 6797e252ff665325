//! Daemon initialization.

use crate::app::{settings_from_config, DaemonState};
use crate::ipc::register_handlers;
use commandpost_config::{Config, Paths};
use commandpost_ipc::{IpcClient, IpcServer, Method};
use digest_core::DigestScheduler;
use mail_sink::{HttpMailer, MailerConfig};
use std::sync::Arc;
use tracing::info;

/// Run the daemon until it is told to stop.
pub async fn run_daemon(
    config: Config,
    paths: Paths,
    _foreground: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Singleton check: one daemon per base directory
    let socket_path = paths.socket_file();
    if socket_path.exists() {
        let client = IpcClient::new(&socket_path.to_string_lossy());
        if client.call_method(Method::Health).await.is_ok() {
            eprintln!("Error: Daemon is already running. Use 'commandpost-daemon stop' first.");
            std::process::exit(1);
        }
        eprintln!("Removing stale socket file");
        let _ = std::fs::remove_file(&socket_path);
    }

    // Clean up a stale PID file from a previous run
    let pid_file = paths.pid_file();
    if pid_file.exists() {
        let _ = std::fs::remove_file(&pid_file);
    }

    info!("Starting Commandpost daemon");

    // A broken config or mail setup keeps the daemon from starting at all
    config.validate()?;

    info!(
        server_name = %config.server_name,
        mail_to = %config.mail_to,
        window_minutes = config.window_minutes,
        "Configuration loaded"
    );

    paths.ensure_dirs()?;

    // Write PID file
    let pid = std::process::id();
    std::fs::write(paths.pid_file(), pid.to_string())?;
    info!(pid = pid, "Daemon started");

    let mailer = Arc::new(HttpMailer::new(MailerConfig {
        api_url: config.mail.api_url.clone(),
        api_token: config.mail.api_token.clone(),
        timeout_secs: config.mail.timeout_secs,
    })?);

    let scheduler = DigestScheduler::new(settings_from_config(&config), mailer);
    info!("Digest scheduler initialized");

    let ipc_server = IpcServer::new(&socket_path.to_string_lossy());

    let state = DaemonState {
        paths: Arc::new(paths.clone()),
        scheduler: scheduler.clone(),
    };
    register_handlers(&ipc_server, state).await;

    // Serve until the shutdown method or Ctrl-C arrives
    let ctrl_c = tokio::signal::ctrl_c();
    let server_result = tokio::select! {
        result = ipc_server.run() => result,
        _ = ctrl_c => {
            info!("Received shutdown signal, exiting...");
            Ok(())
        }
    };

    // Pending digests go out with blocking sends before the process exits
    let flushed = scheduler.shutdown().await;
    if flushed > 0 {
        info!(flushed = flushed, "Sent pending digests during shutdown");
    }

    // Cleanup
    let _ = std::fs::remove_file(paths.pid_file());
    let _ = std::fs::remove_file(paths.socket_file());

    info!("Daemon stopped");

    server_result.map_err(|e| e.into())
}
