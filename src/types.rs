//! Shared orientation types
//!
//! Plain numeric structures passed between the filter, the session and the
//! embedding application. All angles are degrees; all quaternion math is
//! 64-bit.

use serde::Serialize;

/// Attitude quaternion in (w, x, y, z) order, w scalar.
///
/// The filter keeps this at unit norm; a freshly constructed value is the
/// identity rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    /// Identity quaternion (no rotation).
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Euclidean norm of the four components.
    pub fn norm(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Scale to unit length.
    ///
    /// Divides unconditionally; the caller guarantees a nonzero norm. The
    /// filter always integrates from a unit quaternion, so the norm stays
    /// near 1 and never collapses to zero for finite input.
    pub fn normalized(self) -> Self {
        let n = self.norm();
        Self {
            w: self.w / n,
            x: self.x / n,
            y: self.y / n,
            z: self.z / n,
        }
    }

    /// Convert to Euler angles (roll, pitch, yaw) in degrees.
    ///
    /// Right-handed body-frame convention. The pitch asin argument is
    /// clamped so that gimbal lock yields exactly ±90° instead of NaN.
    pub fn to_euler(&self) -> EulerAngles {
        let (q1, q2, q3, q4) = (self.w, self.x, self.y, self.z);

        // Roll (x-axis rotation)
        let sinr_cosp = 2.0 * (q1 * q2 + q3 * q4);
        let cosr_cosp = 1.0 - 2.0 * (q2 * q2 + q3 * q3);
        let roll = sinr_cosp.atan2(cosr_cosp);

        // Pitch (y-axis rotation)
        let sinp = 2.0 * (q1 * q3 - q4 * q2);
        let pitch = if sinp.abs() >= 1.0 {
            std::f64::consts::FRAC_PI_2.copysign(sinp)
        } else {
            sinp.asin()
        };

        // Yaw (z-axis rotation)
        let siny_cosp = 2.0 * (q1 * q4 + q2 * q3);
        let cosy_cosp = 1.0 - 2.0 * (q3 * q3 + q4 * q4);
        let yaw = siny_cosp.atan2(cosy_cosp);

        EulerAngles {
            roll: roll.to_degrees(),
            pitch: pitch.to_degrees(),
            yaw: yaw.to_degrees(),
        }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

/// Roll/pitch/yaw triplet in degrees.
///
/// Before normalization there is no range invariant: a fused source may
/// report yaw in 0..360 and drift can push values past ±180.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct EulerAngles {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl EulerAngles {
    pub fn new(roll: f64, pitch: f64, yaw: f64) -> Self {
        Self { roll, pitch, yaw }
    }
}

/// Wrap an angle into [-180, 180) degrees.
pub(crate) fn wrap_degrees(angle: f64) -> f64 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}
