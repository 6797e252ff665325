//! Daemon lifecycle commands (stop, status, flush, reload).

use commandpost_config::Paths;
use commandpost_ipc::{IpcClient, Method, Response};
use std::time::Duration;

/// Stop the running daemon.
pub async fn stop_daemon(paths: &Paths) -> Result<(), Box<dyn std::error::Error>> {
    let socket_path = paths.socket_file();

    if !socket_path.exists() {
        println!("Daemon is not running (socket not found)");
        return Ok(());
    }

    let client = IpcClient::new(&socket_path.to_string_lossy());

    if !client.is_daemon_running().await {
        println!("Daemon is not responding, cleaning up stale files");
        cleanup_stale_files(paths);
        return Ok(());
    }

    println!("Stopping daemon...");
    if let Err(e) = client.call_method(Method::Shutdown).await {
        println!("Failed to send shutdown request: {}", e);
        return Ok(());
    }

    // The daemon flushes pending digests before exiting; give it time
    for _ in 0..30 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if !client.is_daemon_running().await {
            println!("Daemon stopped");
            cleanup_stale_files(paths);
            return Ok(());
        }
    }

    println!("Daemon did not stop gracefully, killing process");
    if let Some(pid) = read_pid(paths) {
        unsafe {
            libc::kill(pid, libc::SIGKILL);
        }
    }
    cleanup_stale_files(paths);
    Ok(())
}

/// Print the daemon's status.
pub async fn check_status(paths: &Paths) -> Result<(), Box<dyn std::error::Error>> {
    let socket_path = paths.socket_file();

    if !socket_path.exists() {
        println!("Daemon is not running");
        return Ok(());
    }

    let client = IpcClient::new(&socket_path.to_string_lossy());
    match client.call_method(Method::Health).await {
        Ok(response) if response.is_success() => {
            let result = response.result.unwrap_or_default();
            println!("Daemon is running");
            println!(
                "  Status:  {}",
                result.get("status").and_then(|v| v.as_str()).unwrap_or("unknown")
            );
            println!(
                "  Version: {}",
                result.get("version").and_then(|v| v.as_str()).unwrap_or("unknown")
            );
            if let Some(pid) = read_pid(paths) {
                println!("  PID:     {}", pid);
            }
            println!("  Socket:  {}", socket_path.display());

            if let Ok(digest) = client.call_method(Method::DigestStatus).await {
                if let Some(result) = digest.result {
                    println!(
                        "  Pending: {} players / {} commands",
                        result.get("pending_players").and_then(|v| v.as_u64()).unwrap_or(0),
                        result.get("pending_commands").and_then(|v| v.as_u64()).unwrap_or(0),
                    );
                }
            }
        }
        _ => {
            println!("Daemon is not responding (socket exists but no reply)");
        }
    }
    Ok(())
}

/// Ask the daemon to send every pending digest now.
pub async fn flush_now(paths: &Paths) -> Result<(), Box<dyn std::error::Error>> {
    let socket_path = paths.socket_file();

    if !socket_path.exists() {
        println!("Daemon is not running (socket not found)");
        return Ok(());
    }

    let client = IpcClient::new(&socket_path.to_string_lossy());
    match client.call_method(Method::DigestFlushNow).await {
        Ok(response) if response.is_success() => {
            let flushed = response
                .result
                .as_ref()
                .and_then(|r| r.get("flushed"))
                .and_then(|v| v.as_u64())
                .unwrap_or(0);
            println!("Sending all pending digests now ({} players)", flushed);
        }
        Ok(response) => println!("Flush failed: {}", error_message(&response)),
        Err(e) => println!("Failed to reach daemon: {}", e),
    }
    Ok(())
}

/// Ask the daemon to reload its configuration from disk.
pub async fn reload_config(paths: &Paths) -> Result<(), Box<dyn std::error::Error>> {
    let socket_path = paths.socket_file();

    if !socket_path.exists() {
        println!("Daemon is not running (socket not found)");
        return Ok(());
    }

    let client = IpcClient::new(&socket_path.to_string_lossy());
    match client.call_method(Method::ConfigReload).await {
        Ok(response) if response.is_success() => {
            println!("Configuration reloaded");
        }
        Ok(response) => println!("Reload rejected: {}", error_message(&response)),
        Err(e) => println!("Failed to reach daemon: {}", e),
    }
    Ok(())
}

fn error_message(response: &Response) -> String {
    response
        .error
        .as_ref()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "unknown error".to_string())
}

fn read_pid(paths: &Paths) -> Option<i32> {
    let contents = std::fs::read_to_string(paths.pid_file()).ok()?;
    contents.trim().parse().ok()
}

fn cleanup_stale_files(paths: &Paths) {
    let _ = std::fs::remove_file(paths.socket_file());
    let _ = std::fs::remove_file(paths.pid_file());
}
