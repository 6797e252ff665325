//! Digest operation handlers.

use crate::app::{settings_from_config, DaemonState};
use commandpost_config::Config;
use commandpost_ipc::{error_codes, IpcServer, Method, Response};
use digest_core::{DeliveryMode, SchedulerStatus};
use serde_json::Value;
use tracing::{info, warn};

/// Register digest and configuration handlers.
pub async fn register(server: &IpcServer, state: DaemonState) {
    register_flush_now(server, state.clone()).await;
    register_status(server, state.clone()).await;
    register_reload(server, state).await;

    info!("Registered digest handlers");
}

async fn register_flush_now(server: &IpcServer, state: DaemonState) {
    server
        .register_handler(Method::DigestFlushNow, move |req| {
            let scheduler = state.scheduler.clone();
            async move {
                let flushed = scheduler.flush_all(DeliveryMode::Background).await;
                info!(flushed = flushed, "Manual digest flush");
                Response::success(&req.id, serde_json::json!({ "flushed": flushed }))
            }
        })
        .await;
}

/// Status payload from a scheduler snapshot.
fn status_payload(status: &SchedulerStatus) -> Value {
    serde_json::json!({
        "server_name": status.server_name,
        "pending_players": status.pending_players,
        "pending_commands": status.pending_commands,
    })
}

async fn register_status(server: &IpcServer, state: DaemonState) {
    server
        .register_handler(Method::DigestStatus, move |req| {
            let scheduler = state.scheduler.clone();
            async move { Response::success(&req.id, status_payload(&scheduler.status())) }
        })
        .await;
}

async fn register_reload(server: &IpcServer, state: DaemonState) {
    server
        .register_handler(Method::ConfigReload, move |req| {
            let state = state.clone();
            async move {
                let config = match Config::load(&state.paths) {
                    Ok(config) => config,
                    Err(e) => {
                        warn!(error = %e, "Config reload failed to read the file");
                        return Response::error(
                            &req.id,
                            error_codes::CONFIG_INVALID,
                            &format!("Failed to load config: {}", e),
                        );
                    }
                };

                if let Err(e) = config.validate() {
                    warn!(error = %e, "Config reload rejected");
                    return Response::error(
                        &req.id,
                        error_codes::CONFIG_INVALID,
                        &format!("Invalid config: {}", e),
                    );
                }

                state.scheduler.reload(settings_from_config(&config));
                info!("Configuration reloaded");
                Response::success(&req.id, serde_json::json!({ "reloaded": true }))
            }
        })
        .await;
}
