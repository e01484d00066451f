//! Request/response envelope for the event-server method interface.
//!
//! Each request is one JSON object terminated by CRLF; each response is one
//! JSON line correlated to the request by `id`. The protocol predates
//! JSON-RPC 2.0, so there is no `jsonrpc` version key on the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A method call as sent to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub id: u64,
    /// Positional parameters; omitted entirely from the wire when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Value>,
}

impl Request {
    #[must_use]
    pub fn new(method: impl Into<String>, id: u64, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            id,
            params,
        }
    }
}

/// A method response as received from the server.
///
/// Exactly one of `result` and `error` is populated on a well-formed line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

/// Error object carried by a failed method response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RPC error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}
