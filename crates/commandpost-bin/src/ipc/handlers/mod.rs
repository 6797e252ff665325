//! IPC request handlers.

pub mod command;
pub mod digest;
pub mod health;
