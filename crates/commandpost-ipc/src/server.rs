//! Unix domain socket server and client for daemon IPC.

use crate::error::{IpcError, IpcResult};
use crate::protocol::{error_codes, Method, Request, Response};
use std::collections::HashMap;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error, info, warn};

/// Type alias for handler functions.
pub type HandlerFn =
    Box<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// IPC server listening on a Unix domain socket.
///
/// Requests arrive one JSON object per line and are dispatched to the
/// handler registered for their method. Each connection is served on its
/// own task until the client disconnects or the server shuts down.
pub struct IpcServer {
    socket_path: String,
    handlers: Arc<RwLock<HashMap<Method, HandlerFn>>>,
    shutdown_tx: broadcast::Sender<()>,
}

impl IpcServer {
    /// Create a new IPC server bound to the given socket path.
    pub fn new(socket_path: &str) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            socket_path: socket_path.to_string(),
            handlers: Arc::new(RwLock::new(HashMap::new())),
            shutdown_tx,
        }
    }

    /// Register a handler for a method.
    pub async fn register_handler<F, Fut>(&self, method: Method, handler: F)
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let boxed_handler: HandlerFn = Box::new(move |req| Box::pin(handler(req)));
        self.handlers.write().await.insert(method, boxed_handler);
    }

    /// Get a sender for the shutdown channel.
    pub fn shutdown_sender(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Get a receiver for the shutdown channel.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal the server to shut down.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Run the server until shutdown is signaled.
    ///
    /// A stale socket file from a previous run is removed before binding.
    /// The socket file is cleaned up on the way out.
    pub async fn run(&self) -> IpcResult<()> {
        // Remove existing socket file
        let socket_path = Path::new(&self.socket_path);
        if socket_path.exists() {
            std::fs::remove_file(socket_path)?;
        }

        // Ensure parent directory exists
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let listener = UnixListener::bind(&self.socket_path)?;
        info!(path = %self.socket_path, "IPC server listening");

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let handlers = self.handlers.clone();

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((stream, _)) => {
                            let handlers = handlers.clone();
                            tokio::spawn(async move {
                                if let Err(e) = handle_connection(stream, handlers).await {
                                    error!(error = %e, "Connection error");
                                }
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "Accept error");
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    info!("IPC server shutting down");
                    break;
                }
            }
        }

        // Cleanup socket file
        let _ = std::fs::remove_file(&self.socket_path);

        Ok(())
    }
}

/// Handle a single client connection.
async fn handle_connection(
    stream: UnixStream,
    handlers: Arc<RwLock<HashMap<Method, HandlerFn>>>,
) -> IpcResult<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    debug!("Client connected");

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            debug!("Client disconnected");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!(request = %trimmed, "Received request");

        let request = match Request::from_json(trimmed) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "Failed to parse request");
                let response =
                    Response::error("", error_codes::PARSE_ERROR, &format!("Parse error: {}", e));
                let response_json = response.to_json()?;
                writer.write_all(response_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
                continue;
            }
        };

        let request_id = request.id.clone();
        let method = request.method.clone();

        let response = {
            let handlers = handlers.read().await;
            if let Some(handler) = handlers.get(&method) {
                handler(request).await
            } else {
                Response::error(
                    &request_id,
                    error_codes::METHOD_NOT_FOUND,
                    &format!("Method not found: {:?}", method),
                )
            }
        };

        let response_json = response.to_json()?;
        debug!(response = %response_json, "Sending response");

        writer.write_all(response_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(())
}

/// IPC client for communicating with the daemon.
pub struct IpcClient {
    socket_path: String,
}

impl IpcClient {
    /// Create a new IPC client.
    pub fn new(socket_path: &str) -> Self {
        Self {
            socket_path: socket_path.to_string(),
        }
    }

    /// Send a request and wait for response.
    pub async fn call(&self, request: Request) -> IpcResult<Response> {
        let stream = UnixStream::connect(&self.socket_path)
            .await
            .map_err(|e| IpcError::Socket(format!("Failed to connect: {}", e)))?;

        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);

        // Send request
        let request_json = request.to_json()?;
        writer.write_all(request_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;

        // Read response
        let mut line = String::new();
        reader.read_line(&mut line).await?;

        if line.is_empty() {
            return Err(IpcError::ConnectionClosed);
        }

        let response = Response::from_json(line.trim())?;
        Ok(response)
    }

    /// Send a method call with no parameters.
    pub async fn call_method(&self, method: Method) -> IpcResult<Response> {
        self.call(Request::new(method)).await
    }

    /// Send a method call with parameters.
    pub async fn call_method_with_params(
        &self,
        method: Method,
        params: serde_json::Value,
    ) -> IpcResult<Response> {
        self.call(Request::with_params(method, params)).await
    }

    /// Check if the daemon is running.
    pub async fn is_daemon_running(&self) -> bool {
        self.call_method(Method::Health).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_fails_when_daemon_not_running() {
        let client = IpcClient::new("/tmp/commandpost-test-nonexistent.sock");
        let result = client.call_method(Method::Health).await;
        assert!(matches!(result, Err(IpcError::Socket(_))));
        assert!(!client.is_daemon_running().await);
    }

    #[tokio::test]
    async fn test_register_handler_stores_handler() {
        let server = IpcServer::new("/tmp/commandpost-test-register.sock");
        server
            .register_handler(Method::Health, |req| async move {
                Response::success(&req.id, serde_json::json!({"status": "ok"}))
            })
            .await;

        assert_eq!(server.handlers.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_signal_reaches_receiver() {
        let server = IpcServer::new("/tmp/commandpost-test-shutdown.sock");
        let mut rx = server.shutdown_receiver();
        server.shutdown();
        assert!(rx.recv().await.is_ok());
    }
}
