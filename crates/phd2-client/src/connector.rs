//! Transport factory abstraction.
//!
//! Both protocol engines dial the server through a [`Connector`] supplied by
//! the caller, so tests (and callers with unusual transports) can substitute
//! in-memory streams for TCP.

use std::future::Future;
use std::io;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

/// A factory that, given a host and port, yields a bidirectional byte
/// stream. [`TcpConnector`] satisfies this for plain TCP.
pub trait Connector: Send + Sync {
    type Stream: AsyncRead + AsyncWrite + Send + Unpin + 'static;

    /// Establish a transport-level connection to `host:port`.
    fn connect(
        &self,
        host: &str,
        port: u16,
    ) -> impl Future<Output = io::Result<Self::Stream>> + Send;
}

/// Connects over TCP, one fresh stream per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Stream = TcpStream;

    async fn connect(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        TcpStream::connect((host, port)).await
    }
}
