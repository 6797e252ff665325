//! Health and shutdown handlers.

use commandpost_ipc::{IpcServer, Method, Response};
use tracing::info;

/// Register health and shutdown handlers.
pub async fn register(server: &IpcServer) {
    server
        .register_handler(Method::Health, |req| async move {
            Response::success(
                &req.id,
                serde_json::json!({
                    "status": "ok",
                    "version": env!("CARGO_PKG_VERSION"),
                }),
            )
        })
        .await;

    let shutdown_tx = server.shutdown_sender();
    server
        .register_handler(Method::Shutdown, move |req| {
            let tx = shutdown_tx.clone();
            async move {
                info!("Shutdown requested via IPC");
                let _ = tx.send(());
                Response::success(&req.id, serde_json::json!({ "status": "shutting_down" }))
            }
        })
        .await;

    info!("Registered health handlers");
}
