//! Client for the legacy socket-server protocol.
//!
//! Strictly synchronous: each operation writes one command byte and reads
//! one response byte, with no background tasks and no interleaved events.
//! The response contract varies per command (see the PHD2 SocketServer
//! interface documentation):
//!
//! - acknowledgement commands expect a `0` byte;
//! - `Loop` and `AutoFindStar` report success as `0`,
//!   `FlipRACalibrationData` reports success as `1` (the asymmetry is the
//!   server's, preserved here);
//! - value commands return the response byte verbatim.

use std::io;

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use phd2_protocol::socket::{Command, DitherScale, SocketStatus};

use crate::connector::Connector;
use crate::error::{Error, Result};

/// Client for the socket-server (single-byte command) protocol.
pub struct SocketClient<C: Connector> {
    connector: C,
    conn: Option<C::Stream>,
}

impl<C: Connector> SocketClient<C> {
    /// Create a client that will dial through `connector`. No connection is
    /// made until [`connect`](Self::connect).
    #[must_use]
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            conn: None,
        }
    }

    /// Dial the socket server.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if dialing fails.
    pub async fn connect(&mut self, host: &str, port: u16) -> Result<()> {
        let stream = self
            .connector
            .connect(host, port)
            .await
            .map_err(Error::Connection)?;
        self.conn = Some(stream);
        Ok(())
    }

    /// Shut down the connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] if there is no connection to close.
    pub async fn close(&mut self) -> Result<()> {
        let mut conn = self.conn.take().ok_or(Error::NotConnected)?;
        conn.shutdown().await?;
        Ok(())
    }

    /// One command/response round trip.
    async fn transact(&mut self, command: u8) -> Result<u8> {
        let conn = self.conn.as_mut().ok_or(Error::NotConnected)?;

        conn.write_all(&[command]).await?;
        conn.flush().await?;

        let mut response = [0u8; 1];
        match conn.read_exact(&mut response).await {
            Ok(_) => Ok(response[0]),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(Error::UnexpectedResponse),
            Err(e) => Err(e.into()),
        }
    }

    /// Round trip for commands that acknowledge with a `0` byte.
    async fn ack(&mut self, command: Command) -> Result<()> {
        match self.transact(command.into()).await? {
            0 => Ok(()),
            _ => Err(Error::UnexpectedResponse),
        }
    }

    /// Pause guiding. Exposures keep looping if they already were.
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect, [`Error::UnexpectedResponse`]
    /// on a non-zero acknowledgement, or an I/O error.
    pub async fn pause(&mut self) -> Result<()> {
        self.ack(Command::Pause).await
    }

    /// Resume guiding if paused; otherwise no effect.
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect, [`Error::UnexpectedResponse`]
    /// on a non-zero acknowledgement, or an I/O error.
    pub async fn resume(&mut self) -> Result<()> {
        self.ack(Command::Resume).await
    }

    /// Stop looping exposures or guiding. Poll [`get_status`](Self::get_status)
    /// to confirm it actually stopped.
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect, [`Error::UnexpectedResponse`]
    /// on a non-zero acknowledgement, or an I/O error.
    pub async fn stop(&mut self) -> Result<()> {
        self.ack(Command::Stop).await
    }

    /// Start guiding. Poll [`get_status`](Self::get_status) to confirm
    /// guiding actually started.
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect, [`Error::UnexpectedResponse`]
    /// on a non-zero acknowledgement, or an I/O error.
    pub async fn start_guiding(&mut self) -> Result<()> {
        self.ack(Command::StartGuiding).await
    }

    /// Clear calibration data, forcing re-calibration.
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect, [`Error::UnexpectedResponse`]
    /// on a non-zero acknowledgement, or an I/O error.
    pub async fn clear_calibration(&mut self) -> Result<()> {
        self.ack(Command::ClearCalibration).await
    }

    /// Deselect the current guide star and switch back to full frames.
    /// Send before [`auto_find_star`](Self::auto_find_star) so a full frame
    /// is captured.
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect, [`Error::UnexpectedResponse`]
    /// on a non-zero acknowledgement, or an I/O error.
    pub async fn deselect(&mut self) -> Result<()> {
        self.ack(Command::Deselect).await
    }

    /// Start looping exposures; `true` means the server accepted (response
    /// byte `0`).
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect, or an I/O error.
    pub async fn loop_exposures(&mut self) -> Result<bool> {
        Ok(self.transact(Command::Loop.into()).await? == 0)
    }

    /// Auto-select a guide star; `true` means one was found (response byte
    /// `0`).
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect, or an I/O error.
    pub async fn auto_find_star(&mut self) -> Result<bool> {
        Ok(self.transact(Command::AutoFindStar.into()).await? == 0)
    }

    /// Flip the RA calibration data; `true` means it was flipped (response
    /// byte `1`, unlike the zero-means-success commands).
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect, or an I/O error.
    pub async fn flip_ra_calibration_data(&mut self) -> Result<bool> {
        Ok(self.transact(Command::FlipRaCalibrationData.into()).await? == 1)
    }

    /// Current guiding state.
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect,
    /// [`Error::UnexpectedResponse`] if the byte is outside the known
    /// status set, or an I/O error.
    pub async fn get_status(&mut self) -> Result<SocketStatus> {
        let byte = self.transact(Command::GetStatus.into()).await?;
        SocketStatus::try_from(byte).map_err(|_| Error::UnexpectedResponse)
    }

    /// Dither a random amount at the given scale. Returns the camera
    /// exposure time in seconds, but not less than 1.
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect, or an I/O error.
    pub async fn dither(&mut self, amount: DitherScale) -> Result<u8> {
        self.transact(amount.into()).await
    }

    /// Current guide error distance in 1/100 pixel units. The server caps
    /// values above 255 at 255.
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect, or an I/O error.
    pub async fn request_distance(&mut self) -> Result<u8> {
        self.transact(Command::RequestDistance.into()).await
    }

    /// Current frame counter (capped at 255); 0 when not looping or
    /// guiding.
    ///
    /// # Errors
    /// [`Error::NotConnected`] before connect, or an I/O error.
    pub async fn loop_frame_count(&mut self) -> Result<u8> {
        self.transact(Command::LoopFrameCount.into()).await
    }

    /// Setting the lock position is not supported by the socket server.
    ///
    /// # Errors
    /// Always returns [`Error::NotImplemented`].
    pub fn set_lock_position(&mut self, _x: u16, _y: u16) -> Result<()> {
        Err(Error::NotImplemented)
    }
}
