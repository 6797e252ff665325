//! IPC layer for daemon-client communication.
//!
//! This crate provides:
//! - A Unix domain socket server with per-method handlers
//! - A JSON-RPC-like line protocol
//! - A client for CLI commands and host integrations

mod error;
mod protocol;
mod server;

pub use error::{IpcError, IpcResult};
pub use protocol::{error_codes, ErrorInfo, Method, Request, Response};
pub use server::{IpcClient, IpcServer};
