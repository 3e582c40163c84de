//! Gradient-descent orientation filter (Madgwick AHRS)
//!
//! Fuses gyroscope angular rate and accelerometer specific force into an
//! attitude quaternion. The accelerometer supplies a gravity-alignment
//! correction; the beta gain trades convergence speed against noise
//! sensitivity.
//!
//! This is the 6-DOF formulation without magnetometer or gyro-bias terms:
//! the correction is the raw gravity residual, normalized, subtracted from
//! the first three quaternion-rate components only.
//!
//! Reference: Madgwick, S. O. H. (2010). "An efficient orientation filter
//! for inertial and inertial/magnetic sensor arrays."

use crate::config::FilterConfig;
use crate::types::{EulerAngles, Quaternion};

/// Madgwick AHRS filter for one IMU stream.
pub struct MadgwickFilter {
    q: Quaternion,
    config: FilterConfig,
    /// Current sample frequency in Hz. Updated per-sample from the source's
    /// reported interval; falls back to `config.sample_freq`.
    sample_freq: f64,
}

impl MadgwickFilter {
    pub fn new(config: FilterConfig) -> Self {
        Self {
            q: Quaternion::identity(),
            sample_freq: config.sample_freq,
            config,
        }
    }

    /// Update with one sample and return the new orientation estimate.
    ///
    /// `gyro` is angular rate in rad/s, `accel` is specific force in m/s².
    /// A zero accelerometer vector is a defined no-op: the quaternion is
    /// left untouched (no gyro integration either) and the current estimate
    /// is returned.
    pub fn update(&mut self, gyro: [f64; 3], accel: [f64; 3]) -> EulerAngles {
        let [gx, gy, gz] = gyro;
        let [mut ax, mut ay, mut az] = accel;
        let (q1, q2, q3, q4) = (self.q.w, self.q.x, self.q.y, self.q.z);

        // Normalize accelerometer measurement
        let norm = (ax * ax + ay * ay + az * az).sqrt();
        if norm == 0.0 {
            return self.q.to_euler();
        }
        ax /= norm;
        ay /= norm;
        az /= norm;

        // Gravity-alignment residual (objective function gradient)
        let mut s1 = 2.0 * q2 * q4 - 2.0 * q1 * q3 - ax;
        let mut s2 = 2.0 * q1 * q2 + 2.0 * q3 * q4 - ay;
        let mut s3 = 1.0 - 2.0 * q2 * q2 - 2.0 * q3 * q3 - az;

        // Normalize step magnitude, skipping silently when already zero
        let step_norm = (s1 * s1 + s2 * s2 + s3 * s3).sqrt();
        if step_norm != 0.0 {
            s1 /= step_norm;
            s2 /= step_norm;
            s3 /= step_norm;
        }

        // Rate of change of quaternion: gyroscopic term minus the feedback
        // step. The w-rate carries no gradient correction.
        let beta = self.config.beta;
        let q_dot1 = 0.5 * (-q2 * gx - q3 * gy - q4 * gz) - beta * s1;
        let q_dot2 = 0.5 * (q1 * gx + q3 * gz - q4 * gy) - beta * s2;
        let q_dot3 = 0.5 * (q1 * gy - q2 * gz + q4 * gx) - beta * s3;
        let q_dot4 = 0.5 * (q1 * gz + q2 * gy - q3 * gx);

        // Integrate and renormalize
        let dt = 1.0 / self.sample_freq;
        self.q = Quaternion {
            w: q1 + q_dot1 * dt,
            x: q2 + q_dot2 * dt,
            y: q3 + q_dot3 * dt,
            z: q4 + q_dot4 * dt,
        }
        .normalized();

        self.q.to_euler()
    }

    /// Derive the sample frequency from the source's reported inter-sample
    /// interval (seconds). Non-positive intervals fall back to the
    /// configured nominal frequency.
    pub fn set_sample_interval(&mut self, interval: f64) {
        self.sample_freq = if interval > 0.0 {
            1.0 / interval
        } else {
            self.config.sample_freq
        };
    }

    /// Current sample frequency in Hz.
    pub fn sample_freq(&self) -> f64 {
        self.sample_freq
    }

    /// Current attitude quaternion.
    pub fn quaternion(&self) -> Quaternion {
        self.q
    }

    /// Current orientation estimate without advancing the filter.
    pub fn euler_angles(&self) -> EulerAngles {
        self.q.to_euler()
    }

    /// Restore the identity quaternion and nominal sample rate.
    pub fn reset(&mut self) {
        self.q = Quaternion::identity();
        self.sample_freq = self.config.sample_freq;
    }
}

impl Default for MadgwickFilter {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_identity() {
        let filter = MadgwickFilter::default();
        assert_eq!(filter.quaternion(), Quaternion::identity());
        assert_eq!(filter.sample_freq(), 50.0);
    }

    #[test]
    fn test_zero_accel_is_noop() {
        let mut filter = MadgwickFilter::default();
        let e = filter.update([0.5, -0.2, 0.1], [0.0, 0.0, 0.0]);

        // Neither the correction nor the gyro integration ran
        assert_eq!(filter.quaternion(), Quaternion::identity());
        assert!(e.roll.abs() < 1e-12 && e.pitch.abs() < 1e-12 && e.yaw.abs() < 1e-12);
    }

    #[test]
    fn test_unit_norm_preserved() {
        let mut filter = MadgwickFilter::default();

        for i in 0..500 {
            let t = i as f64 * 0.02;
            let gyro = [(t * 3.0).sin(), (t * 2.0).cos() * 0.5, 0.3];
            let accel = [t.sin() * 2.0, t.cos() * 2.0, -9.5];
            filter.update(gyro, accel);

            let n = filter.quaternion().norm();
            assert!((n - 1.0).abs() < 1e-9, "norm drifted at step {}: {}", i, n);
        }
    }

    #[test]
    fn test_level_at_rest_stays_level() {
        // Gravity along +z matches the residual's reference direction, so
        // the identity orientation is the filter's equilibrium.
        let mut filter = MadgwickFilter::default();

        for _ in 0..200 {
            let e = filter.update([0.0, 0.0, 0.0], [0.0, 0.0, 9.81]);
            assert!(e.roll.abs() < 1e-6, "roll should stay 0: {}", e.roll);
            assert!(e.pitch.abs() < 1e-6, "pitch should stay 0: {}", e.pitch);
        }
    }

    #[test]
    fn test_inverted_gravity_converges_without_nan() {
        // Accel (0, 0, -1) is the farthest point from the reference; the
        // correction rotates the estimate through the pitch-90 singularity
        // to the flipped equilibrium. Every intermediate output must stay
        // finite and the final pitch must settle back near zero.
        let mut filter = MadgwickFilter::default();

        let mut last = EulerAngles::default();
        for i in 0..2500 {
            last = filter.update([0.0, 0.0, 0.0], [0.0, 0.0, -1.0]);
            assert!(
                last.roll.is_finite() && last.pitch.is_finite() && last.yaw.is_finite(),
                "non-finite output at step {}: {:?}",
                i,
                last
            );
            let n = filter.quaternion().norm();
            assert!((n - 1.0).abs() < 1e-9, "norm drifted: {}", n);
        }

        assert!(last.pitch.abs() < 2.0, "pitch should settle near 0: {}", last.pitch);
        assert!(last.roll.abs() > 170.0, "roll should settle near ±180: {}", last.roll);
    }

    #[test]
    fn test_gyro_integration_accumulates_yaw() {
        let mut filter = MadgwickFilter::default();

        // Rotate about z at 0.5 rad/s for 2 seconds at 50 Hz
        let mut e = EulerAngles::default();
        for _ in 0..100 {
            e = filter.update([0.0, 0.0, 0.5], [0.0, 0.0, 9.81]);
        }

        // ~1 rad of yaw, gravity correction does not fight z rotation
        assert!((e.yaw - 57.3).abs() < 3.0, "yaw should be ~57°: {}", e.yaw);
    }

    #[test]
    fn test_sample_interval_update() {
        let mut filter = MadgwickFilter::default();

        filter.set_sample_interval(0.01);
        assert_eq!(filter.sample_freq(), 100.0);

        filter.set_sample_interval(0.0);
        assert_eq!(filter.sample_freq(), 50.0, "zero interval falls back to nominal");

        filter.set_sample_interval(-0.5);
        assert_eq!(filter.sample_freq(), 50.0, "negative interval falls back to nominal");
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut filter = MadgwickFilter::default();
        for _ in 0..50 {
            filter.update([0.3, 0.1, -0.2], [1.0, 2.0, 9.0]);
        }
        filter.set_sample_interval(0.005);

        filter.reset();

        assert_eq!(filter.quaternion(), Quaternion::identity());
        assert_eq!(filter.sample_freq(), 50.0);
    }
}
