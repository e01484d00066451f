//! Parameter and result records for the event-server method catalog.

use serde::{Deserialize, Serialize};

/// Settle tolerance passed to the `guide` and `dither` methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settle {
    /// Maximum guide distance, in pixels, to consider guiding settled.
    pub pixels: f64,
    /// Seconds the distance must stay below `pixels`.
    #[serde(rename = "time")]
    pub time_seconds: i32,
    /// Seconds before giving up on settling.
    #[serde(rename = "timeout")]
    pub timeout_seconds: i32,
}

/// Result of `get_calibration_data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationData {
    pub calibrated: bool,
    #[serde(rename = "xAngle")]
    pub x_angle: f64,
    #[serde(rename = "xRate")]
    pub x_rate: f64,
    #[serde(rename = "xParity")]
    pub x_parity: String,
    #[serde(rename = "yAngle")]
    pub y_angle: f64,
    #[serde(rename = "yRate")]
    pub y_rate: f64,
    #[serde(rename = "yParity")]
    pub y_parity: String,
}

/// Result of `get_cooler_status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoolerStatus {
    pub temperature: f64,
    #[serde(rename = "coolerOn")]
    pub cooler_on: bool,
    pub setpoint: f64,
    pub power: f64,
}

/// One device entry in [`CurrentEquipment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub name: String,
    pub connected: bool,
}

/// Result of `get_current_equipment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentEquipment {
    pub camera: Equipment,
    pub mount: Equipment,
    pub aux_mount: Equipment,
    #[serde(rename = "AO")]
    pub ao: Equipment,
    pub rotator: Equipment,
}

/// Lock-shift configuration, read by `get_lock_shift_params` and written by
/// `set_lock_shift_params`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockShiftParams {
    pub enabled: bool,
    pub rate: Vec<f64>,
    pub units: String,
    pub axes: String,
}

/// An equipment profile, from `get_profile`/`get_profiles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i32,
    pub name: String,
}

/// Result of `save_image`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedImage {
    pub filename: String,
}
