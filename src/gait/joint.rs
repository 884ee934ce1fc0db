//! Oscillator value to joint angle mapping.
//!
//! Both joints clamp the raw command after it has been computed; the leg joint
//! additionally moves its pivot along a circle of radius [`PIVOT_RADIUS`].

use nalgebra::Vector3;

/// Allowed brace rotation, radians about the vertical axis.
pub const BRACE_LIMITS: (f64, f64) = (-0.5, 0.4);
/// Allowed leg rotation, radians.
pub const LEG_LIMITS: (f64, f64) = (-1.6, 1.6);
/// Distance from the brace to the leg pivot.
pub const PIVOT_RADIUS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointKind {
    Brace,
    Leg,
}

impl JointKind {
    pub fn limits(self) -> (f64, f64) {
        match self {
            JointKind::Brace => BRACE_LIMITS,
            JointKind::Leg => LEG_LIMITS,
        }
    }

    /// Clamps a raw command into the joint range. NaN stays NaN.
    #[inline]
    pub fn clamp(self, raw: f64) -> f64 {
        let (lo, hi) = self.limits();
        raw.clamp(lo, hi)
    }

    pub fn label(self) -> &'static str {
        match self {
            JointKind::Brace => "brace",
            JointKind::Leg => "leg",
        }
    }
}

#[inline]
pub fn brace_angle(raw: f64) -> f64 {
    JointKind::Brace.clamp(raw)
}

#[inline]
pub fn leg_angle(raw: f64) -> f64 {
    JointKind::Leg.clamp(raw)
}

/// Leg pivot offset for a raw leg command.
///
/// `(k cos a * sign_x, k sin a, k cos a * sign_y)` with `a` the clamped angle,
/// so the foot sweeps an arc in the vertical plane pointing away from the body.
pub fn leg_pivot(raw: f64, sign_x: f64, sign_y: f64) -> Vector3<f64> {
    let angle = leg_angle(raw);
    let reach = PIVOT_RADIUS * angle.cos();
    Vector3::new(reach * sign_x, PIVOT_RADIUS * angle.sin(), reach * sign_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn brace_clamps_both_ends() {
        assert_eq!(brace_angle(0.9), 0.4);
        assert_eq!(brace_angle(-3.0), -0.5);
        assert_eq!(brace_angle(0.1), 0.1);
        assert!(brace_angle(f64::NAN).is_nan());
    }

    #[test]
    fn leg_pivot_traces_the_circle_in_each_vertical_plane() {
        for &raw in &[-1.6, -0.7, 0.0, 0.1, 1.2, 1.6] {
            let p = leg_pivot(raw, 1.0, -1.0);
            assert_abs_diff_eq!(p.x.hypot(p.y), PIVOT_RADIUS, epsilon = 1e-12);
            assert_abs_diff_eq!(p.z.hypot(p.y), PIVOT_RADIUS, epsilon = 1e-12);
        }
        // Both horizontal axes carry the reach, so the 3D length is k * sqrt(1 + cos^2 a).
        let flat = leg_pivot(0.0, 1.0, -1.0);
        assert_abs_diff_eq!(flat.norm(), PIVOT_RADIUS * 2f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn leg_pivot_uses_clamped_angle() {
        let clamped = leg_pivot(1.6, -1.0, 1.0);
        let beyond = leg_pivot(3.0, -1.0, 1.0);
        assert_eq!(clamped, beyond);

        let forward = leg_pivot(0.5, -1.0, 1.0);
        assert!(forward.x < 0.0 && forward.z > 0.0 && forward.y > 0.0);
    }

    #[test]
    fn limits_per_kind() {
        assert_eq!(JointKind::Brace.limits(), (-0.5, 0.4));
        assert_eq!(JointKind::Leg.limits(), (-1.6, 1.6));
    }
}
