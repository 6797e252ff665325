use commandpost_ipc::{error_codes, IpcClient, IpcServer, Method, Response};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

async fn start_server(server: Arc<IpcServer>) -> tokio::task::JoinHandle<()> {
    let handle = tokio::spawn(async move {
        server.run().await.expect("server run failed");
    });
    // Give the listener a moment to bind.
    tokio::time::sleep(Duration::from_millis(100)).await;
    handle
}

#[tokio::test]
async fn request_response_over_unix_socket() {
    let dir = tempdir().unwrap();
    let socket_path = dir.path().join("daemon.sock").to_string_lossy().to_string();

    let server = Arc::new(IpcServer::new(&socket_path));
    server
        .register_handler(Method::Health, |req| async move {
            Response::success(&req.id, serde_json::json!({"status": "ok"}))
        })
        .await;

    let server_task = start_server(server.clone()).await;

    let client = IpcClient::new(&socket_path);
    let response = client.call_method(Method::Health).await.unwrap();
    assert!(response.is_success());
    assert_eq!(response.result.unwrap()["status"], "ok");
    assert!(client.is_daemon_running().await);

    server.shutdown();
    server_task.await.unwrap();
}

#[tokio::test]
async fn unknown_method_returns_method_not_found() {
    let dir = tempdir().unwrap();
    let socket_path = dir.path().join("daemon.sock").to_string_lossy().to_string();

    let server = Arc::new(IpcServer::new(&socket_path));
    server
        .register_handler(Method::Health, |req| async move {
            Response::success(&req.id, serde_json::json!({"status": "ok"}))
        })
        .await;

    let server_task = start_server(server.clone()).await;

    let client = IpcClient::new(&socket_path);
    let response = client.call_method(Method::DigestStatus).await.unwrap();
    assert!(!response.is_success());
    assert_eq!(response.error.unwrap().code, error_codes::METHOD_NOT_FOUND);

    server.shutdown();
    server_task.await.unwrap();
}

#[tokio::test]
async fn params_reach_the_handler() {
    let dir = tempdir().unwrap();
    let socket_path = dir.path().join("daemon.sock").to_string_lossy().to_string();

    let server = Arc::new(IpcServer::new(&socket_path));
    server
        .register_handler(Method::CommandObserve, |req| async move {
            let player = req
                .params
                .as_ref()
                .and_then(|p| p.get("player"))
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string();
            Response::success(&req.id, serde_json::json!({"player": player}))
        })
        .await;

    let server_task = start_server(server.clone()).await;

    let client = IpcClient::new(&socket_path);
    let response = client
        .call_method_with_params(
            Method::CommandObserve,
            serde_json::json!({"player": "alice", "command": "/tp alice spawn"}),
        )
        .await
        .unwrap();
    assert!(response.is_success());
    assert_eq!(response.result.unwrap()["player"], "alice");

    server.shutdown();
    server_task.await.unwrap();
}
