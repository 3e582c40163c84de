//! Calibration and angle normalization session
//!
//! Converts an absolute orientation stream into a zero-referenced signal
//! confined to a fixed output range. The first sample of a session defines
//! the zero orientation; every later sample is reported relative to it,
//! wrapped smoothly through the range boundaries instead of clamping flat.
//!
//! One session corresponds to one logical connection. On disconnect the
//! owner calls [`AngleSession::reset`] so the next connection recalibrates;
//! stale offsets never leak across connections.

use crate::config::SessionConfig;
use crate::types::{wrap_degrees, EulerAngles};

/// Per-axis unwrap state.
///
/// Tracks the previous raw relative angle (for motion direction), the
/// previous normalized output (for boundary detection) and how many
/// consecutive samples landed at a range bound.
#[derive(Debug, Clone, Copy, Default)]
struct UnwrapState {
    prev_raw: f64,
    prev_norm: f64,
    boundary_hits: u32,
}

impl UnwrapState {
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Normalize one relative angle into `[min_deg, max_deg]`.
    ///
    /// The candidate is first wrapped into [-180, 180) and unwrapped against
    /// the previous sample so consecutive outputs stay continuous across the
    /// ±180° branch cut. Near a range bound the value is remapped to the
    /// opposite side when the motion direction says the rotation continued
    /// past the bound; if the signal sits pinned at a bound for
    /// `stuck_samples` consecutive calls the crossing is forced regardless
    /// of direction.
    fn normalize(&mut self, relative: f64, cfg: &SessionConfig) -> f64 {
        let mut angle = wrap_degrees(relative);
        let prev_raw = wrap_degrees(self.prev_raw);

        // Unwrap against the previous sample: a jump of more than 180° is a
        // branch-cut artifact, not real motion
        let diff = angle - prev_raw;
        if diff > 180.0 {
            angle -= 360.0;
        } else if diff < -180.0 {
            angle += 360.0;
        }

        let at_max = (self.prev_norm - cfg.max_deg).abs() < cfg.boundary_tolerance;
        let at_min = (self.prev_norm - cfg.min_deg).abs() < cfg.boundary_tolerance;

        // Motion direction, measured after the branch-cut adjustment
        let raw_diff = angle - prev_raw;

        let lands_at_max = angle >= cfg.max_deg - cfg.motion_tolerance;
        let lands_at_min = angle <= cfg.min_deg + cfg.motion_tolerance;

        if lands_at_max || lands_at_min {
            self.boundary_hits += 1;
        } else {
            self.boundary_hits = 0;
        }
        let force_unwrap = self.boundary_hits >= cfg.stuck_samples;

        if (at_max || lands_at_max)
            && (raw_diff > cfg.motion_tolerance || angle > cfg.max_deg || force_unwrap)
        {
            // Continue past the max bound onto the min side. The result is
            // held at or below the range center to limit overshoot.
            let excess = (angle - cfg.max_deg).max(0.0);
            angle = (cfg.min_deg + excess).min(0.0);
            if force_unwrap {
                self.boundary_hits = 0;
            }
        } else if (at_min || lands_at_min)
            && (raw_diff < -cfg.motion_tolerance || angle < cfg.min_deg || force_unwrap)
        {
            let excess = (cfg.min_deg - angle).max(0.0);
            angle = (cfg.max_deg - excess).max(0.0);
            if force_unwrap {
                self.boundary_hits = 0;
            }
        }

        let out = angle.clamp(cfg.min_deg, cfg.max_deg);
        self.prev_raw = relative;
        self.prev_norm = out;
        out
    }
}

/// Calibration offsets plus three axes of unwrap state.
pub struct AngleSession {
    config: SessionConfig,
    offsets: EulerAngles,
    calibrated: bool,
    roll: UnwrapState,
    pitch: UnwrapState,
    yaw: UnwrapState,
    last_raw: EulerAngles,
}

impl AngleSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            offsets: EulerAngles::default(),
            calibrated: false,
            roll: UnwrapState::default(),
            pitch: UnwrapState::default(),
            yaw: UnwrapState::default(),
            last_raw: EulerAngles::default(),
        }
    }

    /// Ingest one raw orientation triplet and return the calibrated,
    /// normalized result.
    ///
    /// The first call after construction or [`reset`](Self::reset) captures
    /// the incoming triplet as the calibration offset, so it normalizes to
    /// (0, 0, 0). Unwrap state mutates on every call; there is no read-only
    /// peek.
    pub fn ingest(&mut self, raw: EulerAngles) -> EulerAngles {
        if !self.calibrated {
            self.offsets = raw;
            self.calibrated = true;
        }
        self.last_raw = raw;

        let cfg = self.config;
        EulerAngles {
            roll: self.roll.normalize(raw.roll - self.offsets.roll, &cfg),
            pitch: self.pitch.normalize(raw.pitch - self.offsets.pitch, &cfg),
            yaw: self.yaw.normalize(raw.yaw - self.offsets.yaw, &cfg),
        }
    }

    /// Clear calibration and all unwrap state. The next [`ingest`](Self::ingest)
    /// treats its input as the new zero orientation.
    pub fn reset(&mut self) {
        self.offsets = EulerAngles::default();
        self.calibrated = false;
        self.roll.reset();
        self.pitch.reset();
        self.yaw.reset();
        self.last_raw = EulerAngles::default();
    }

    /// Whether a calibration offset has been captured this session.
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Calibration offsets captured at the start of this session.
    pub fn offsets(&self) -> EulerAngles {
        self.offsets
    }

    /// Last raw (uncalibrated) triplet ingested.
    pub fn last_raw(&self) -> EulerAngles {
        self.last_raw
    }
}

impl Default for AngleSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
