//! Shared fixtures for in-memory protocol tests.
//!
//! Tests drive both engines over `tokio::io::duplex` pipes: the client end
//! is handed out through a [`Connector`], the server end is scripted by the
//! test.

use std::io;
use std::sync::Mutex;

use tokio::io::DuplexStream;

use crate::connector::Connector;

/// Route client log output through the test harness. Honors `RUST_LOG`.
pub(crate) fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Hands out a pre-built in-memory stream in place of a TCP dial.
pub(crate) struct PipeConnector {
    stream: Mutex<Option<DuplexStream>>,
}

impl Connector for PipeConnector {
    type Stream = DuplexStream;

    async fn connect(&self, _host: &str, _port: u16) -> io::Result<DuplexStream> {
        Ok(self
            .stream
            .lock()
            .unwrap()
            .take()
            .expect("fixture supports a single dial"))
    }
}

/// A connector plus the server end of its pipe.
pub(crate) fn pipe() -> (PipeConnector, DuplexStream) {
    let (client, server) = tokio::io::duplex(4096);
    (
        PipeConnector {
            stream: Mutex::new(Some(client)),
        },
        server,
    )
}

/// Connector whose dial always fails with `ConnectionRefused`.
pub(crate) struct FailingConnector;

impl Connector for FailingConnector {
    type Stream = DuplexStream;

    async fn connect(&self, _host: &str, _port: u16) -> io::Result<DuplexStream> {
        Err(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "connection refused",
        ))
    }
}

pub(crate) fn failing_connector() -> FailingConnector {
    FailingConnector
}
