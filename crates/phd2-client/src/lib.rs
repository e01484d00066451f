//! Client for the two PHD2 control protocols.
//!
//! PHD2 exposes two TCP interfaces, and this crate provides an independent
//! engine for each, both dialing through a caller-supplied [`Connector`]:
//!
//! - [`client`]: [`EventClient`], the event-server (JSON lines) client —
//!   line framing, a concurrent read loop, demultiplexing of interleaved
//!   events and method responses, and single-in-flight request/response
//!   correlation. Typed method wrappers live in [`methods`].
//! - [`socket`]: [`SocketClient`], the legacy socket-server client —
//!   synchronous single-byte command/response round trips.
//! - [`transport`]: the newline-delimited line codec shared with the event
//!   server.
//! - [`error`]: the unified error type.
//!
//! # Example
//!
//! ```no_run
//! use phd2_client::{EventClient, TcpConnector};
//! use phd2_protocol::GuideEvent;
//!
//! # async fn example() -> phd2_client::Result<()> {
//! let mut client = EventClient::new(TcpConnector);
//! client
//!     .connect("localhost", 4400, |event: GuideEvent| {
//!         println!("{}: {:?}", event.name(), event.envelope());
//!     })
//!     .await?;
//!
//! let exposure = client.get_exposure().await?;
//! println!("exposure: {exposure} ms");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod connector;
pub mod error;
pub mod methods;
pub mod socket;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export the engines and their collaborators
pub use client::{EventClient, EventHandler};
pub use connector::{Connector, TcpConnector};
pub use error::{Error, Result};
pub use socket::SocketClient;
pub use transport::{CodecError, LineCodec};

// Re-export the wire types callers interact with
pub use phd2_protocol::{
    CalibrationData, CoolerStatus, CurrentEquipment, DitherScale, Envelope, Equipment, GuideEvent,
    LockShiftParams, Profile, SavedImage, Settle, SocketStatus,
};
