//! Handler registration for the IPC server.

use crate::app::DaemonState;
use crate::ipc::handlers;
use commandpost_ipc::IpcServer;
use tracing::info;

/// Register all IPC handlers on the server.
pub async fn register_handlers(server: &IpcServer, state: DaemonState) {
    handlers::health::register(server).await;
    handlers::command::register(server, state.clone()).await;
    handlers::digest::register(server, state).await;

    info!("All IPC handlers registered");
}
