//! Client for the PHD2 event-server protocol.
//!
//! One TCP connection carries both method responses and unsolicited event
//! notifications, interleaved line by line. [`EventClient`] owns that
//! connection and runs two background tasks for its lifetime:
//!
//! - the **reader** task pulls newline-delimited lines off the stream and
//!   queues them, so the socket is never blocked on application logic;
//! - the **dispatcher** task consumes queued lines in arrival order and
//!   routes each one: lines without an `Event` field are method responses
//!   and go to the single pending call, recognized events are decoded and
//!   handed to the caller's [`EventHandler`], everything else is logged and
//!   dropped.
//!
//! The protocol has no request multiplexing, so [`EventClient::call`] holds
//! an exclusive lock for the whole round trip: at most one request is in
//! flight per connection, and responses are matched to it by a strict ID
//! check.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::io::{AsyncRead, ReadHalf, WriteHalf};
use tokio::sync::{Mutex, mpsc};
use tokio_util::codec::{FramedRead, FramedWrite};

use phd2_protocol::rpc::{Request, Response};
use phd2_protocol::GuideEvent;

use crate::connector::Connector;
use crate::error::{Error, Result};
use crate::transport::LineCodec;

/// Depth of the raw-line queue between the reader and the dispatcher,
/// enough to absorb event bursts without stalling the socket read.
const LINE_CHANNEL_DEPTH: usize = 10;

/// Receives decoded events from the dispatcher task, in arrival order.
///
/// Implemented for any `FnMut(GuideEvent)` closure. The dispatcher calls
/// this inline, so a slow handler delays subsequent lines (including method
/// responses); hand off to a channel if processing is expensive.
pub trait EventHandler: Send + 'static {
    fn on_event(&mut self, event: GuideEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(GuideEvent) + Send + 'static,
{
    fn on_event(&mut self, event: GuideEvent) {
        self(event);
    }
}

/// Write half of the connection plus the per-call state it guards.
///
/// Everything a call needs lives behind one mutex, which is what enforces
/// the single-request-in-flight discipline.
struct Session<S> {
    sink: FramedWrite<WriteHalf<S>, LineCodec>,
    next_id: u64,
    response_rx: mpsc::Receiver<String>,
}

/// Client for the event-server (JSON lines) protocol.
pub struct EventClient<C: Connector> {
    connector: C,
    response_timeout: Option<Duration>,
    session: Option<Mutex<Session<C::Stream>>>,
}

impl<C: Connector> EventClient<C> {
    /// Create a client that will dial through `connector`. No connection is
    /// made until [`connect`](Self::connect).
    #[must_use]
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            response_timeout: None,
            session: None,
        }
    }

    /// Bound the wait for each method response. `None` (the default) waits
    /// indefinitely, matching the wire protocol's own behavior.
    ///
    /// After a call fails with [`Error::Timeout`] the late response is still
    /// queued and will desynchronize the next call; treat the session as
    /// broken and reconnect.
    pub fn set_response_timeout(&mut self, timeout: Option<Duration>) {
        self.response_timeout = timeout;
    }

    /// Dial the event server and start the reader and dispatcher tasks.
    ///
    /// `observer` receives every recognized event for the lifetime of the
    /// connection. The client does not reconnect on failure; a fresh
    /// `connect` replaces the session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if dialing fails.
    pub async fn connect<H: EventHandler>(
        &mut self,
        host: &str,
        port: u16,
        observer: H,
    ) -> Result<()> {
        let stream = self
            .connector
            .connect(host, port)
            .await
            .map_err(Error::Connection)?;

        let (read_half, write_half) = tokio::io::split(stream);

        let (line_tx, line_rx) = mpsc::channel(LINE_CHANNEL_DEPTH);
        // Single slot: the protocol never has more than one outstanding
        // request, and a full slot exerts backpressure on the dispatcher.
        let (response_tx, response_rx) = mpsc::channel(1);

        tokio::spawn(read_loop(
            FramedRead::new(read_half, LineCodec::new()),
            line_tx,
        ));
        tokio::spawn(dispatch_loop(line_rx, response_tx, observer));

        self.session = Some(Mutex::new(Session {
            sink: FramedWrite::new(write_half, LineCodec::new()),
            next_id: 0,
            response_rx,
        }));

        Ok(())
    }

    /// Invoke a method and decode its result.
    ///
    /// Request IDs start at 1 on each connection and strictly increase;
    /// they are never reused or reset.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConnected`] before [`connect`](Self::connect)
    /// - [`Error::Disconnected`] if the connection ends while waiting
    /// - [`Error::Timeout`] if a response timeout is set and elapses
    /// - [`Error::Protocol`] on a response ID mismatch or missing result
    /// - [`Error::Rpc`] if the server answers with an error object
    /// - [`Error::Json`] / [`Error::Codec`] on encode/decode failures
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> Result<T> {
        let session = self.session.as_ref().ok_or(Error::NotConnected)?;
        let mut session = session.lock().await;

        session.next_id += 1;
        let id = session.next_id;

        let request = Request::new(method, id, params);
        let line = serde_json::to_string(&request)?;
        session.sink.send(line).await?;

        let line = match self.response_timeout {
            Some(limit) => tokio::time::timeout(limit, session.response_rx.recv())
                .await
                .map_err(|_| Error::Timeout)?,
            None => session.response_rx.recv().await,
        };
        let line = line.ok_or(Error::Disconnected)?;

        let response: Response = serde_json::from_str(&line)?;
        if response.id != id {
            return Err(Error::Protocol(format!(
                "response id {} does not match request id {id}",
                response.id
            )));
        }
        if let Some(error) = response.error {
            return Err(error.into());
        }

        let result = response
            .result
            .ok_or_else(|| Error::Protocol("response carries no result".to_string()))?;
        Ok(serde_json::from_value(result)?)
    }
}

/// Minimal envelope probe used to tell events from method responses.
#[derive(Deserialize)]
struct Probe {
    #[serde(rename = "Event", default)]
    event: String,
}

/// Reads lines off the socket and queues them. Exits on any read error or
/// EOF; dropping the sender drains the dispatcher, which in turn unblocks a
/// pending call with [`Error::Disconnected`].
async fn read_loop<R>(mut frames: FramedRead<ReadHalf<R>, LineCodec>, lines: mpsc::Sender<String>)
where
    R: AsyncRead + Send,
{
    loop {
        match frames.next().await {
            Some(Ok(line)) => {
                if lines.send(line).await.is_err() {
                    break;
                }
            }
            Some(Err(e)) => {
                tracing::error!(error = %e, "read failed; ending session");
                break;
            }
            None => {
                tracing::debug!("connection closed by server");
                break;
            }
        }
    }
}

/// Routes each queued line to the pending call or the event observer.
/// A bad line only skips that line; the loop keeps servicing the rest.
async fn dispatch_loop<H: EventHandler>(
    mut lines: mpsc::Receiver<String>,
    responses: mpsc::Sender<String>,
    mut observer: H,
) {
    while let Some(line) = lines.recv().await {
        let probe: Probe = match serde_json::from_str(&line) {
            Ok(probe) => probe,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed line");
                continue;
            }
        };

        if probe.event.is_empty() {
            // Method response. Blocks while the previous response is still
            // undrained, which cannot deadlock: only one call is in flight.
            if responses.send(line).await.is_err() {
                break;
            }
            continue;
        }

        if !GuideEvent::is_recognized(&probe.event) {
            tracing::debug!(event = %probe.event, "dropping unrecognized event");
            continue;
        }

        match serde_json::from_str::<GuideEvent>(&line) {
            Ok(event) => observer.on_event(event),
            Err(e) => {
                tracing::warn!(event = %probe.event, error = %e, "skipping undecodable event");
            }
        }
    }
}
