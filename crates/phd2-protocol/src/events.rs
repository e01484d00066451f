//! Event notifications sent by the PHD2 event server.
//!
//! Every event line carries a common envelope (`Event`, `Timestamp`, `Host`,
//! `Inst`) plus event-specific fields. [`GuideEvent`] is the closed catalog
//! of recognized events, tagged by the `Event` name; adding a new event only
//! requires a new variant and payload schema.
//!
//! Decoding is two-stage: the dispatcher first probes the envelope to learn
//! the event name, then decodes the full line into the matching variant.
//! [`GuideEvent::is_recognized`] is the total name-to-known mapping used for
//! that first stage.

use serde::Deserialize;

/// Common attributes present on every event.
///
/// The event name itself is the [`GuideEvent`] variant; see
/// [`GuideEvent::name`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    /// Seconds from the epoch, including fractional seconds.
    #[serde(rename = "Timestamp")]
    pub timestamp: f64,
    /// Hostname of the machine running PHD2.
    #[serde(rename = "Host")]
    pub host: String,
    /// PHD2 instance number (1-based).
    #[serde(rename = "Inst")]
    pub inst: i32,
}

/// PHD and message protocol versions, sent on connect.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Version {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "PHDVersion")]
    pub phd_version: String,
    #[serde(rename = "PHDSubver")]
    pub phd_subver: String,
    #[serde(rename = "MsgVersion")]
    pub msg_version: i32,
}

/// Calibration completed successfully.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalibrationComplete {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "Mount")]
    pub mount: String,
}

/// Current application state, sent on the initial connection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppState {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "State")]
    pub state: String,
}

/// The lock position has been established.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LockPositionSet {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "X")]
    pub x: i32,
    #[serde(rename = "Y")]
    pub y: i32,
}

/// One calibration step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Calibrating {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "Mount")]
    pub mount: String,
    #[serde(rename = "dir")]
    pub dir: String,
    #[serde(rename = "dist")]
    pub dist: i32,
    #[serde(rename = "dx")]
    pub dx: i32,
    #[serde(rename = "dy")]
    pub dy: i32,
    #[serde(rename = "pos")]
    pub pos: Vec<i32>,
    #[serde(rename = "step")]
    pub step: i32,
    #[serde(rename = "State")]
    pub state: String,
}

/// A guide star has been selected.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StarSelected {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "X")]
    pub x: i32,
    #[serde(rename = "Y")]
    pub y: i32,
}

/// Calibration has started.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StartCalibration {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "Mount")]
    pub mount: String,
}

/// Calibration failed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalibrationFailed {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "Reason")]
    pub reason: String,
}

/// Calibration data has been flipped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalibrationDataFlipped {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "Mount")]
    pub mount: String,
}

/// One exposure frame while looping exposures.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoopingExposures {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "Frame")]
    pub frame: i32,
}

/// One exposure frame after a dither or guide operation, until settled.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settling {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "Distance")]
    pub distance: i32,
    #[serde(rename = "Time")]
    pub time: f64,
    #[serde(rename = "SettleTime")]
    pub settle_time: i32,
    #[serde(rename = "StarLocked")]
    pub star_locked: bool,
}

/// Outcome of a dither or guide settle operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SettleDone {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "Status")]
    pub status: i32,
    /// Error description; empty when settling succeeded.
    #[serde(rename = "Error", default)]
    pub error: String,
    #[serde(rename = "TotalFrames")]
    pub total_frames: i32,
    #[serde(rename = "DroppedFrames")]
    pub dropped_frames: i32,
}

/// A frame was dropped because the star was lost.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StarLost {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "Frame")]
    pub frame: i32,
    #[serde(rename = "Time")]
    pub time: f64,
    #[serde(rename = "StarMass")]
    pub star_mass: f64,
    #[serde(rename = "SNR")]
    pub snr: f64,
    #[serde(rename = "AvgDist")]
    pub avg_dist: f64,
    #[serde(rename = "ErrorCode")]
    pub error_code: i32,
    #[serde(rename = "Status")]
    pub status: String,
}

/// One line of the guide log; sent for each frame while guiding.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GuideStep {
    #[serde(flatten)]
    pub envelope: Envelope,
    /// Frame number; restarts at 1 each time guiding starts.
    #[serde(rename = "Frame")]
    pub frame: i32,
    /// Seconds since guiding started, including fractional seconds.
    #[serde(rename = "Time")]
    pub time: f64,
    #[serde(rename = "Mount")]
    pub mount: String,
    #[serde(rename = "dx")]
    pub dx: f64,
    #[serde(rename = "dy")]
    pub dy: f64,
    #[serde(rename = "RADistanceRaw")]
    pub ra_distance_raw: f64,
    #[serde(rename = "DecDistanceRaw")]
    pub dec_distance_raw: f64,
    #[serde(rename = "RADistanceGuide")]
    pub ra_distance_guide: f64,
    #[serde(rename = "DecDistanceGuide")]
    pub dec_distance_guide: f64,
    #[serde(rename = "RADuration")]
    pub ra_duration: i32,
    #[serde(rename = "RADirection")]
    pub ra_direction: String,
    #[serde(rename = "DECDuration")]
    pub dec_duration: i32,
    #[serde(rename = "DECDirection")]
    pub dec_direction: String,
    #[serde(rename = "StarMass")]
    pub star_mass: f64,
    #[serde(rename = "SNR")]
    pub snr: f64,
    #[serde(rename = "AvgDist")]
    pub avg_dist: f64,
    /// Only present when the RA guide pulse was limited.
    #[serde(rename = "RALimited", default)]
    pub ra_limited: bool,
    /// Only present when the Dec guide pulse was limited.
    #[serde(rename = "DecLimited", default)]
    pub dec_limited: bool,
    #[serde(rename = "ErrorCode")]
    pub error_code: i32,
}

/// The lock position has been dithered.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GuidingDithered {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "dx")]
    pub dx: i32,
    #[serde(rename = "dy")]
    pub dy: i32,
}

/// An alert message was displayed in PHD2.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Alert {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "Msg")]
    pub msg: String,
    #[serde(rename = "Type")]
    pub kind: String,
}

/// A guiding parameter has been changed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GuideParamChange {
    #[serde(flatten)]
    pub envelope: Envelope,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: String,
}

/// Asynchronous notifications from the event server, tagged by event name.
///
/// Variants without extra fields carry the bare [`Envelope`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "Event")]
pub enum GuideEvent {
    Version(Version),
    CalibrationComplete(CalibrationComplete),
    Paused(Envelope),
    AppState(AppState),
    LockPositionSet(LockPositionSet),
    Calibrating(Calibrating),
    StarSelected(StarSelected),
    StartGuiding(Envelope),
    StartCalibration(StartCalibration),
    CalibrationFailed(CalibrationFailed),
    CalibrationDataFlipped(CalibrationDataFlipped),
    LoopingExposures(LoopingExposures),
    LoopingExposuresStopped(Envelope),
    SettleBegin(Envelope),
    Settling(Settling),
    SettleDone(SettleDone),
    StarLost(StarLost),
    GuidingStopped(Envelope),
    GuideStep(GuideStep),
    GuidingDithered(GuidingDithered),
    LockPositionLost(Envelope),
    Alert(Alert),
    GuideParamChange(GuideParamChange),
}

/// Every event name the catalog recognizes, in wire spelling.
pub const EVENT_NAMES: &[&str] = &[
    "Version",
    "CalibrationComplete",
    "Paused",
    "AppState",
    "LockPositionSet",
    "Calibrating",
    "StarSelected",
    "StartGuiding",
    "StartCalibration",
    "CalibrationFailed",
    "CalibrationDataFlipped",
    "LoopingExposures",
    "LoopingExposuresStopped",
    "SettleBegin",
    "Settling",
    "SettleDone",
    "StarLost",
    "GuidingStopped",
    "GuideStep",
    "GuidingDithered",
    "LockPositionLost",
    "Alert",
    "GuideParamChange",
];

impl GuideEvent {
    /// Whether `name` maps to a variant of this catalog.
    #[must_use]
    pub fn is_recognized(name: &str) -> bool {
        EVENT_NAMES.contains(&name)
    }

    /// The wire name of this event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GuideEvent::Version(_) => "Version",
            GuideEvent::CalibrationComplete(_) => "CalibrationComplete",
            GuideEvent::Paused(_) => "Paused",
            GuideEvent::AppState(_) => "AppState",
            GuideEvent::LockPositionSet(_) => "LockPositionSet",
            GuideEvent::Calibrating(_) => "Calibrating",
            GuideEvent::StarSelected(_) => "StarSelected",
            GuideEvent::StartGuiding(_) => "StartGuiding",
            GuideEvent::StartCalibration(_) => "StartCalibration",
            GuideEvent::CalibrationFailed(_) => "CalibrationFailed",
            GuideEvent::CalibrationDataFlipped(_) => "CalibrationDataFlipped",
            GuideEvent::LoopingExposures(_) => "LoopingExposures",
            GuideEvent::LoopingExposuresStopped(_) => "LoopingExposuresStopped",
            GuideEvent::SettleBegin(_) => "SettleBegin",
            GuideEvent::Settling(_) => "Settling",
            GuideEvent::SettleDone(_) => "SettleDone",
            GuideEvent::StarLost(_) => "StarLost",
            GuideEvent::GuidingStopped(_) => "GuidingStopped",
            GuideEvent::GuideStep(_) => "GuideStep",
            GuideEvent::GuidingDithered(_) => "GuidingDithered",
            GuideEvent::LockPositionLost(_) => "LockPositionLost",
            GuideEvent::Alert(_) => "Alert",
            GuideEvent::GuideParamChange(_) => "GuideParamChange",
        }
    }

    /// The common envelope embedded in every event.
    #[must_use]
    pub fn envelope(&self) -> &Envelope {
        match self {
            GuideEvent::Version(e) => &e.envelope,
            GuideEvent::CalibrationComplete(e) => &e.envelope,
            GuideEvent::AppState(e) => &e.envelope,
            GuideEvent::LockPositionSet(e) => &e.envelope,
            GuideEvent::Calibrating(e) => &e.envelope,
            GuideEvent::StarSelected(e) => &e.envelope,
            GuideEvent::StartCalibration(e) => &e.envelope,
            GuideEvent::CalibrationFailed(e) => &e.envelope,
            GuideEvent::CalibrationDataFlipped(e) => &e.envelope,
            GuideEvent::LoopingExposures(e) => &e.envelope,
            GuideEvent::Settling(e) => &e.envelope,
            GuideEvent::SettleDone(e) => &e.envelope,
            GuideEvent::StarLost(e) => &e.envelope,
            GuideEvent::GuideStep(e) => &e.envelope,
            GuideEvent::GuidingDithered(e) => &e.envelope,
            GuideEvent::Alert(e) => &e.envelope,
            GuideEvent::GuideParamChange(e) => &e.envelope,
            GuideEvent::Paused(e)
            | GuideEvent::StartGuiding(e)
            | GuideEvent::LoopingExposuresStopped(e)
            | GuideEvent::SettleBegin(e)
            | GuideEvent::GuidingStopped(e)
            | GuideEvent::LockPositionLost(e) => e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = r#""Timestamp":1589324327.222,"Host":"obsy","Inst":1"#;

    fn decode(line: &str) -> GuideEvent {
        serde_json::from_str(line).unwrap()
    }

    #[test]
    fn test_envelope_fields() {
        let evt = decode(&format!(r#"{{"Event":"Paused",{ENVELOPE}}}"#));
        let env = evt.envelope();
        assert!((env.timestamp - 1589324327.222).abs() < 1e-6);
        assert_eq!(env.host, "obsy");
        assert_eq!(env.inst, 1);
        assert_eq!(evt.name(), "Paused");
    }

    #[test]
    fn test_decode_version() {
        let evt = decode(&format!(
            r#"{{"Event":"Version",{ENVELOPE},"PHDVersion":"2.6.11","PHDSubver":"dev4","MsgVersion":1}}"#
        ));
        let GuideEvent::Version(v) = evt else {
            panic!("expected Version, got {evt:?}");
        };
        assert_eq!(v.phd_version, "2.6.11");
        assert_eq!(v.phd_subver, "dev4");
        assert_eq!(v.msg_version, 1);
    }

    #[test]
    fn test_decode_app_state() {
        let evt = decode(&format!(r#"{{"Event":"AppState",{ENVELOPE},"State":"Guiding"}}"#));
        let GuideEvent::AppState(s) = evt else {
            panic!("expected AppState");
        };
        assert_eq!(s.state, "Guiding");
    }

    #[test]
    fn test_decode_calibrating() {
        let evt = decode(&format!(
            r#"{{"Event":"Calibrating",{ENVELOPE},"Mount":"EQ6","dir":"West","dist":12,"dx":3,"dy":4,"pos":[320,240],"step":5,"State":"West step 5"}}"#
        ));
        let GuideEvent::Calibrating(c) = evt else {
            panic!("expected Calibrating");
        };
        assert_eq!(c.mount, "EQ6");
        assert_eq!(c.dir, "West");
        assert_eq!(c.pos, vec![320, 240]);
        assert_eq!(c.step, 5);
    }

    #[test]
    fn test_decode_guide_step_with_limits() {
        let evt = decode(&format!(
            r#"{{"Event":"GuideStep",{ENVELOPE},"Frame":42,"Time":13.5,"Mount":"EQ6","dx":0.1,"dy":-0.2,"RADistanceRaw":0.3,"DecDistanceRaw":-0.4,"RADistanceGuide":0.3,"DecDistanceGuide":-0.4,"RADuration":120,"RADirection":"East","DECDuration":30,"DECDirection":"North","StarMass":5500.0,"SNR":25.4,"AvgDist":0.5,"RALimited":true,"ErrorCode":0}}"#
        ));
        let GuideEvent::GuideStep(s) = evt else {
            panic!("expected GuideStep");
        };
        assert_eq!(s.frame, 42);
        assert_eq!(s.ra_direction, "East");
        assert_eq!(s.dec_duration, 30);
        assert!(s.ra_limited);
        assert!(!s.dec_limited, "absent DecLimited defaults to false");
    }

    #[test]
    fn test_decode_guide_step_without_optional_fields() {
        let evt = decode(&format!(
            r#"{{"Event":"GuideStep",{ENVELOPE},"Frame":1,"Time":1.0,"Mount":"EQ6","dx":0.0,"dy":0.0,"RADistanceRaw":0.0,"DecDistanceRaw":0.0,"RADistanceGuide":0.0,"DecDistanceGuide":0.0,"RADuration":0,"RADirection":"East","DECDuration":0,"DECDirection":"North","StarMass":100.0,"SNR":10.0,"AvgDist":0.1,"ErrorCode":0}}"#
        ));
        let GuideEvent::GuideStep(s) = evt else {
            panic!("expected GuideStep");
        };
        assert!(!s.ra_limited);
        assert!(!s.dec_limited);
    }

    #[test]
    fn test_decode_settle_done_without_error_field() {
        let evt = decode(&format!(
            r#"{{"Event":"SettleDone",{ENVELOPE},"Status":0,"TotalFrames":8,"DroppedFrames":0}}"#
        ));
        let GuideEvent::SettleDone(d) = evt else {
            panic!("expected SettleDone");
        };
        assert_eq!(d.status, 0);
        assert_eq!(d.error, "");
        assert_eq!(d.total_frames, 8);
    }

    #[test]
    fn test_decode_star_lost() {
        let evt = decode(&format!(
            r#"{{"Event":"StarLost",{ENVELOPE},"Frame":99,"Time":50.1,"StarMass":120.0,"SNR":2.1,"AvgDist":3.2,"ErrorCode":2,"Status":"low SNR"}}"#
        ));
        let GuideEvent::StarLost(s) = evt else {
            panic!("expected StarLost");
        };
        assert_eq!(s.frame, 99);
        assert_eq!(s.status, "low SNR");
    }

    #[test]
    fn test_decode_alert() {
        let evt = decode(&format!(
            r#"{{"Event":"Alert",{ENVELOPE},"Msg":"camera disconnected","Type":"error"}}"#
        ));
        let GuideEvent::Alert(a) = evt else {
            panic!("expected Alert");
        };
        assert_eq!(a.msg, "camera disconnected");
        assert_eq!(a.kind, "error");
    }

    #[test]
    fn test_decode_guiding_dithered() {
        let evt = decode(&format!(r#"{{"Event":"GuidingDithered",{ENVELOPE},"dx":3,"dy":-2}}"#));
        let GuideEvent::GuidingDithered(d) = evt else {
            panic!("expected GuidingDithered");
        };
        assert_eq!(d.dx, 3);
        assert_eq!(d.dy, -2);
    }

    #[test]
    fn test_unknown_event_fails_to_decode() {
        let result: Result<GuideEvent, _> = serde_json::from_str(&format!(
            r#"{{"Event":"ConfigurationChange",{ENVELOPE}}}"#
        ));
        assert!(result.is_err());
    }

    #[test]
    fn test_recognition_covers_whole_catalog() {
        assert_eq!(EVENT_NAMES.len(), 23);
        for name in EVENT_NAMES {
            assert!(GuideEvent::is_recognized(name), "{name} not recognized");
        }
        assert!(!GuideEvent::is_recognized("Resumed"));
        assert!(!GuideEvent::is_recognized(""));
        assert!(!GuideEvent::is_recognized("guidestep"));
    }

    #[test]
    fn test_names_match_variants() {
        for name in EVENT_NAMES {
            // Envelope-only payloads decode for every name; richer payloads
            // need their required fields, so just check the tag routes.
            let line = format!(r#"{{"Event":"{name}",{ENVELOPE}}}"#);
            if let Ok(evt) = serde_json::from_str::<GuideEvent>(&line) {
                assert_eq!(evt.name(), *name);
            }
        }
    }
}
