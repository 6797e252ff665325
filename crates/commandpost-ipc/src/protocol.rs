//! IPC protocol definitions for daemon communication.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// IPC method types.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    // Health & lifecycle
    Health,
    Shutdown,

    // Command events from the game server host
    #[serde(rename = "command.observe")]
    CommandObserve,

    // Digest operations
    #[serde(rename = "digest.flush_now")]
    DigestFlushNow,
    #[serde(rename = "digest.status")]
    DigestStatus,

    // Configuration
    #[serde(rename = "config.reload")]
    ConfigReload,
}

/// IPC request message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Unique request ID for correlating responses.
    pub id: String,
    /// Method to invoke.
    pub method: Method,
    /// Method parameters (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl Request {
    /// Create a new request with a generated ID.
    pub fn new(method: Method) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            method,
            params: None,
        }
    }

    /// Create a new request with parameters.
    pub fn with_params(method: Method, params: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            method,
            params: Some(params),
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// IPC response message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Matches the request ID.
    pub id: String,
    /// Result value on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error information on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

impl Response {
    /// Create a success response.
    pub fn success(id: &str, result: Value) -> Self {
        Self {
            id: id.to_string(),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: &str, code: i32, message: &str) -> Self {
        Self {
            id: id.to_string(),
            result: None,
            error: Some(ErrorInfo {
                code,
                message: message.to_string(),
                data: None,
            }),
        }
    }

    /// Create an error response with additional data.
    pub fn error_with_data(id: &str, code: i32, message: &str, data: Value) -> Self {
        Self {
            id: id.to_string(),
            result: None,
            error: Some(ErrorInfo {
                code,
                message: message.to_string(),
                data: Some(data),
            }),
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Check if the response is successful.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Error information in a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code.
    pub code: i32,
    /// Human-readable message.
    pub message: String,
    /// Optional additional data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

// Standard error codes
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Configuration rejected on reload.
    pub const CONFIG_INVALID: i32 = -32001;
}
