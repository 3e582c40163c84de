//! Calibrated head-orientation estimation from streamed phone IMU data.
//!
//! A phone strapped to an operator's head streams motion samples as JSON:
//! either raw gyroscope/accelerometer readings or the device's own fused
//! roll/pitch/yaw. This crate turns that stream into a zero-referenced,
//! range-limited orientation signal suitable for driving a robot head:
//!
//! - [`MadgwickFilter`] fuses raw IMU samples into an attitude quaternion
//!   using the gradient-descent AHRS algorithm.
//! - [`AngleSession`] zeroes the orientation against the first sample of a
//!   connection and confines each axis to ±90°, unwrapping smoothly at the
//!   range boundaries instead of clamping flat.
//! - [`OrientationTracker`] combines both behind a per-connection facade
//!   with JSON in and JSON out.
//!
//! Transport is deliberately out of scope: the embedding server owns the
//! socket and hands each message to the tracker.
//!
//! ```
//! use head_orientation::OrientationTracker;
//!
//! let mut tracker = OrientationTracker::default();
//! tracker.connect();
//!
//! // First sample calibrates the zero orientation
//! let zero = tracker
//!     .ingest_json(r#"{"mode":"fused","roll":20.0,"pitch":-5.0,"yaw":140.0}"#)
//!     .unwrap();
//! assert!(zero.roll.abs() < 1e-9);
//!
//! // Later samples are reported relative to it
//! let out = tracker
//!     .ingest_json(r#"{"mode":"fused","roll":30.0,"pitch":-5.0,"yaw":140.0}"#)
//!     .unwrap();
//! assert!((out.roll - 10.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod madgwick;
pub mod sample;
pub mod session;
pub mod tracker;
pub mod types;

pub use config::{FilterConfig, SessionConfig, TrackerConfig};
pub use madgwick::MadgwickFilter;
pub use sample::{OrientationSample, SampleError};
pub use session::AngleSession;
pub use tracker::OrientationTracker;
pub use types::{EulerAngles, Quaternion};
