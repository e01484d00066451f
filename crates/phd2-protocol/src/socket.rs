//! Byte tables for the legacy socket-server protocol.
//!
//! Each operation on the socket server is a single command byte followed by
//! a single response byte. Dither is the exception: its command byte encodes
//! the dither amount ([`DitherScale`]).

/// Command bytes accepted by the socket server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    Pause = 1,
    Resume = 2,
    RequestDistance = 10,
    AutoFindStar = 14,
    FlipRaCalibrationData = 16,
    GetStatus = 17,
    Stop = 18,
    Loop = 19,
    StartGuiding = 20,
    LoopFrameCount = 21,
    ClearCalibration = 22,
    Deselect = 24,
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> Self {
        cmd as u8
    }
}

/// Guiding state as reported by the `GetStatus` command.
///
/// The byte values are non-contiguous; any byte outside this set is a
/// protocol violation, not a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SocketStatus {
    /// Not paused, looping, or guiding.
    Idle = 0,
    /// Capture active and star selected.
    StarSelected = 1,
    /// Running the calibration routine.
    Calibrating = 2,
    /// Guiding and locked onto a star.
    Guiding = 3,
    /// Guiding but the star was lost.
    StarLost = 4,
    /// Paused.
    Paused = 100,
    /// Looping but no star selected.
    Looping = 101,
}

impl TryFrom<u8> for SocketStatus {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, u8> {
        match byte {
            0 => Ok(SocketStatus::Idle),
            1 => Ok(SocketStatus::StarSelected),
            2 => Ok(SocketStatus::Calibrating),
            3 => Ok(SocketStatus::Guiding),
            4 => Ok(SocketStatus::StarLost),
            100 => Ok(SocketStatus::Paused),
            101 => Ok(SocketStatus::Looping),
            other => Err(other),
        }
    }
}

/// Dither amounts, as multiples of the configured dither scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DitherScale {
    /// +/- 0.5 x dither scale.
    Tiny = 3,
    /// +/- 1.0 x dither scale.
    Small = 4,
    /// +/- 2.0 x dither scale.
    Normal = 5,
    /// +/- 3.0 x dither scale.
    Large = 12,
    /// +/- 5.0 x dither scale.
    Huge = 13,
}

impl From<DitherScale> for u8 {
    fn from(amount: DitherScale) -> Self {
        amount as u8
    }
}
