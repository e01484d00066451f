//! Error types for the phd2-client crate.

use crate::transport::CodecError;
use phd2_protocol::RpcError;

/// Unified error type for both protocol engines.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An operation was attempted before `connect`.
    #[error("not connected")]
    NotConnected,

    /// Dialing the server failed.
    #[error("connection failed: {0}")]
    Connection(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server violated the wire protocol (response ID mismatch, missing
    /// result, unrecognized response shape).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The server answered a method call with an error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The socket server returned a byte outside the command's contract, or
    /// the response was truncated.
    #[error("unexpected response from server")]
    UnexpectedResponse,

    /// The connection ended while a call was outstanding.
    #[error("connection closed")]
    Disconnected,

    /// The configured response timeout elapsed.
    #[error("request timeout")]
    Timeout,

    /// The operation is intentionally unimplemented.
    #[error("not implemented")]
    NotImplemented,
}

impl From<RpcError> for Error {
    fn from(e: RpcError) -> Self {
        Error::Rpc {
            code: e.code,
            message: e.message,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
