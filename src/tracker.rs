//! Connection-scoped orientation tracker
//!
//! Owns one Madgwick filter and one calibration session and routes incoming
//! samples between them. Raw IMU samples go through the filter first; fused
//! samples skip it. Either way the absolute orientation is handed to the
//! session, which zeroes it against the calibration offset and confines it
//! to the output range.
//!
//! The tracker is the unit an embedding server holds per client: call
//! [`connect`](OrientationTracker::connect) when a client attaches,
//! [`ingest_json`](OrientationTracker::ingest_json) per message, and
//! [`disconnect`](OrientationTracker::disconnect) when it drops, so the next
//! client starts from a fresh calibration.

use log::{info, warn};

use crate::config::TrackerConfig;
use crate::madgwick::MadgwickFilter;
use crate::sample::{OrientationSample, SampleError};
use crate::session::AngleSession;
use crate::types::EulerAngles;

pub struct OrientationTracker {
    filter: MadgwickFilter,
    session: AngleSession,
    angles: EulerAngles,
}

impl OrientationTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            filter: MadgwickFilter::new(config.filter),
            session: AngleSession::new(config.session),
            angles: EulerAngles::default(),
        }
    }

    /// Start a fresh tracking session.
    ///
    /// Resets the filter to identity and clears calibration, so the first
    /// sample of the new connection defines the zero orientation.
    pub fn connect(&mut self) {
        self.filter.reset();
        self.session.reset();
        self.angles = EulerAngles::default();
        info!("orientation session started, awaiting calibration sample");
    }

    /// End the current session.
    ///
    /// Calibration does not survive a disconnect; the next session
    /// recalibrates from its own first sample.
    pub fn disconnect(&mut self) {
        self.session.reset();
        info!("orientation session ended, calibration cleared");
    }

    /// Ingest one parsed sample and return the calibrated angles.
    pub fn ingest(&mut self, sample: OrientationSample) -> EulerAngles {
        let absolute = match sample {
            OrientationSample::RawImu {
                gx,
                gy,
                gz,
                ax,
                ay,
                az,
                interval,
            } => {
                self.filter.set_sample_interval(interval);
                self.filter.update([gx, gy, gz], [ax, ay, az])
            }
            OrientationSample::FusedOrientation { roll, pitch, yaw } => {
                EulerAngles::new(roll, pitch, yaw)
            }
        };

        let freshly_calibrated = !self.session.is_calibrated();
        self.angles = self.session.ingest(absolute);
        if freshly_calibrated {
            let o = self.session.offsets();
            info!(
                "calibrated zero orientation: roll={:.2} pitch={:.2} yaw={:.2}",
                o.roll, o.pitch, o.yaw
            );
        }
        self.angles
    }

    /// Parse and ingest one JSON message from the transport.
    ///
    /// A rejected message leaves the tracker untouched; the previous output
    /// remains current.
    pub fn ingest_json(&mut self, text: &str) -> Result<EulerAngles, SampleError> {
        match OrientationSample::from_json(text) {
            Ok(sample) => Ok(self.ingest(sample)),
            Err(e) => {
                warn!("dropping unparseable sample: {:?}", e);
                Err(e)
            }
        }
    }

    /// Most recent calibrated angles.
    pub fn angles(&self) -> EulerAngles {
        self.angles
    }

    /// Most recent calibrated angles as a JSON object with `roll`, `pitch`
    /// and `yaw` keys.
    pub fn angles_json(&self) -> String {
        serde_json::json!({
            "roll": self.angles.roll,
            "pitch": self.angles.pitch,
            "yaw": self.angles.yaw,
        })
        .to_string()
    }

    /// Whether the current session has captured its zero orientation.
    pub fn is_calibrated(&self) -> bool {
        self.session.is_calibrated()
    }

    pub fn filter(&self) -> &MadgwickFilter {
        &self.filter
    }

    pub fn session(&self) -> &AngleSession {
        &self.session
    }
}

impl Default for OrientationTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
