//! Configuration for the orientation pipeline
//!
//! Defaults match the reference tuning used with phone sensor streams:
//! moderate filter gain, 50 Hz nominal rate, ±90° output range.

/// Madgwick filter parameters.
#[derive(Debug, Clone, Copy)]
pub struct FilterConfig {
    /// Algorithm gain (beta). Lower = more stable but slower convergence.
    /// Typical range 0.01 - 0.5.
    pub beta: f64,
    /// Nominal sample frequency in Hz. Used whenever the source does not
    /// report a usable inter-sample interval.
    pub sample_freq: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            beta: 0.1,
            sample_freq: 50.0,
        }
    }
}

/// Angle normalization parameters.
///
/// The session confines each axis to `[min_deg, max_deg]` after zeroing
/// against the calibration offset, unwrapping smoothly at the range
/// boundaries instead of clamping flat.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Lower output bound (degrees).
    pub min_deg: f64,
    /// Upper output bound (degrees).
    pub max_deg: f64,
    /// How close (degrees) the previous normalized output must sit to a
    /// bound to count as "at the boundary".
    pub boundary_tolerance: f64,
    /// How close (degrees) the incoming candidate must land to a bound to
    /// count as a boundary hit, and the minimum per-sample motion that
    /// counts as directional movement.
    pub motion_tolerance: f64,
    /// Consecutive boundary hits before the unwrap is forced regardless of
    /// motion direction (recovers a signal stuck at the clamp).
    pub stuck_samples: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_deg: -90.0,
            max_deg: 90.0,
            boundary_tolerance: 1.0,
            motion_tolerance: 0.1,
            stuck_samples: 2,
        }
    }
}

/// Master configuration for an [`OrientationTracker`](crate::tracker::OrientationTracker).
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackerConfig {
    pub filter: FilterConfig,
    pub session: SessionConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cfg = TrackerConfig::default();
        assert_eq!(cfg.filter.beta, 0.1);
        assert_eq!(cfg.filter.sample_freq, 50.0);
        assert_eq!(cfg.session.min_deg, -90.0);
        assert_eq!(cfg.session.max_deg, 90.0);
        assert_eq!(cfg.session.stuck_samples, 2);
    }
}
