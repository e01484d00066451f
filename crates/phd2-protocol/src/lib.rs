//! Wire types for the two PHD2 control protocols.
//!
//! PHD2 exposes two TCP interfaces: the event server (line-delimited JSON,
//! default port 4400) and the legacy socket server (single-byte
//! command/response, default port 4300). This crate holds the plain data
//! types for both, with no I/O:
//!
//! - [`rpc`]: request/response envelope for the event-server method calls
//! - [`events`]: the event notification catalog ([`GuideEvent`])
//! - [`socket`]: socket-server command and status byte tables
//! - [`types`]: method parameter and result records

pub mod events;
pub mod rpc;
pub mod socket;
pub mod types;

pub use events::{Envelope, GuideEvent};
pub use rpc::{Request, Response, RpcError};
pub use socket::{Command, DitherScale, SocketStatus};
pub use types::{
    CalibrationData, CoolerStatus, CurrentEquipment, Equipment, LockShiftParams, Profile,
    SavedImage, Settle,
};
