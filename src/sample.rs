//! Wire sample model
//!
//! The phone sends one JSON object per sample over the transport. Two
//! shapes exist, selected by the `"mode"` field:
//!
//! - `"raw"` — gyroscope (rad/s) + accelerometer (m/s²) + the reported
//!   inter-sample interval (s), to be fused by the Madgwick filter.
//! - `"fused"` — the device's own fused roll/pitch/yaw (degrees), which
//!   bypasses the filter.
//!
//! Parsing is deliberately lenient, matching live sensor ingestion: any
//! missing numeric field defaults to 0.0 (interval to 0.02), and a missing
//! mode means fused. Only structurally invalid JSON or an unrecognized
//! mode is rejected.

use serde::Deserialize;

/// Nominal DeviceMotion interval when the phone does not report one.
const DEFAULT_INTERVAL_S: f64 = 0.02;

/// One orientation sample as received from the phone.
///
/// The mode may switch between consecutive samples within a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrientationSample {
    /// Raw IMU reading, routed through the orientation filter.
    RawImu {
        /// Gyroscope angular rate (rad/s)
        gx: f64,
        gy: f64,
        gz: f64,
        /// Accelerometer specific force (m/s²)
        ax: f64,
        ay: f64,
        az: f64,
        /// Reported inter-sample interval (s)
        interval: f64,
    },
    /// Device-fused orientation (degrees), routed straight to the session.
    FusedOrientation { roll: f64, pitch: f64, yaw: f64 },
}

/// Sample rejection reasons.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleError {
    /// The payload was not valid JSON.
    InvalidJson(String),
    /// The `"mode"` field named neither `"raw"` nor `"fused"`.
    UnknownMode(String),
}

/// Raw wire shape with lenient field defaults.
#[derive(Deserialize)]
struct WireSample {
    #[serde(default = "default_mode")]
    mode: String,
    #[serde(default)]
    roll: f64,
    #[serde(default)]
    pitch: f64,
    #[serde(default)]
    yaw: f64,
    #[serde(default)]
    gx: f64,
    #[serde(default)]
    gy: f64,
    #[serde(default)]
    gz: f64,
    #[serde(default)]
    ax: f64,
    #[serde(default)]
    ay: f64,
    #[serde(default)]
    az: f64,
    #[serde(default = "default_interval")]
    interval: f64,
}

fn default_mode() -> String {
    "fused".to_string()
}

fn default_interval() -> f64 {
    DEFAULT_INTERVAL_S
}

impl OrientationSample {
    /// Parse one JSON sample from the transport.
    pub fn from_json(text: &str) -> Result<Self, SampleError> {
        let wire: WireSample =
            serde_json::from_str(text).map_err(|e| SampleError::InvalidJson(e.to_string()))?;

        match wire.mode.as_str() {
            "raw" => Ok(Self::RawImu {
                gx: wire.gx,
                gy: wire.gy,
                gz: wire.gz,
                ax: wire.ax,
                ay: wire.ay,
                az: wire.az,
                interval: wire.interval,
            }),
            "fused" => Ok(Self::FusedOrientation {
                roll: wire.roll,
                pitch: wire.pitch,
                yaw: wire.yaw,
            }),
            other => Err(SampleError::UnknownMode(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_sample() {
        let s = OrientationSample::from_json(
            r#"{"mode":"raw","gx":0.1,"gy":-0.2,"gz":0.3,"ax":0.5,"ay":-0.5,"az":-9.8,"interval":0.01}"#,
        )
        .unwrap();

        assert_eq!(
            s,
            OrientationSample::RawImu {
                gx: 0.1,
                gy: -0.2,
                gz: 0.3,
                ax: 0.5,
                ay: -0.5,
                az: -9.8,
                interval: 0.01,
            }
        );
    }

    #[test]
    fn test_parse_fused_sample() {
        let s = OrientationSample::from_json(r#"{"mode":"fused","roll":12.5,"pitch":-3.0,"yaw":180.0}"#)
            .unwrap();

        assert_eq!(
            s,
            OrientationSample::FusedOrientation {
                roll: 12.5,
                pitch: -3.0,
                yaw: 180.0,
            }
        );
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let s = OrientationSample::from_json(r#"{"mode":"raw","gx":0.4}"#).unwrap();

        assert_eq!(
            s,
            OrientationSample::RawImu {
                gx: 0.4,
                gy: 0.0,
                gz: 0.0,
                ax: 0.0,
                ay: 0.0,
                az: 0.0,
                interval: DEFAULT_INTERVAL_S,
            }
        );
    }

    #[test]
    fn test_missing_mode_means_fused() {
        let s = OrientationSample::from_json(r#"{"roll":1.0,"pitch":2.0,"yaw":3.0}"#).unwrap();

        assert_eq!(
            s,
            OrientationSample::FusedOrientation {
                roll: 1.0,
                pitch: 2.0,
                yaw: 3.0,
            }
        );
    }

    #[test]
    fn test_invalid_json_rejected() {
        let err = OrientationSample::from_json("not json").unwrap_err();
        assert!(matches!(err, SampleError::InvalidJson(_)));
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = OrientationSample::from_json(r#"{"mode":"magnetometer"}"#).unwrap_err();
        assert_eq!(err, SampleError::UnknownMode("magnetometer".to_string()));
    }
}
