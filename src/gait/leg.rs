use nalgebra::{Vector2, Vector3};

use super::joint::{brace_angle, leg_pivot};

/// Half the body width: braces sit on the body corners at `(±4.5, ±4.5)`.
pub const MOUNT_INSET: f64 = 4.5;
/// Initial command for both joints of a freshly assembled leg.
pub const REST_ROTATION: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LegId {
    FrontLeft,
    FrontRight,
    BackLeft,
    BackRight,
}

impl LegId {
    pub const ALL: [LegId; 4] = [
        LegId::FrontLeft,
        LegId::FrontRight,
        LegId::BackLeft,
        LegId::BackRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            LegId::FrontLeft => "front left",
            LegId::FrontRight => "front right",
            LegId::BackLeft => "back left",
            LegId::BackRight => "back right",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            LegId::FrontLeft => "fl",
            LegId::FrontRight => "fr",
            LegId::BackLeft => "bl",
            LegId::BackRight => "br",
        }
    }

    pub fn is_front(self) -> bool {
        matches!(self, LegId::FrontLeft | LegId::FrontRight)
    }

    /// Direction of the leg away from the body, `(sign_x, sign_y)`.
    ///
    /// `x` points forward and `y` (world `z`) to the right.
    pub fn signs(self) -> Vector2<f64> {
        match self {
            LegId::FrontLeft => Vector2::new(1.0, -1.0),
            LegId::FrontRight => Vector2::new(1.0, 1.0),
            LegId::BackLeft => Vector2::new(-1.0, -1.0),
            LegId::BackRight => Vector2::new(-1.0, 1.0),
        }
    }

    /// Brace position on the body in the horizontal plane.
    pub fn mount(self) -> Vector2<f64> {
        self.signs() * MOUNT_INSET
    }
}

/// Joint state of one leg assembly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotLeg {
    id: LegId,
    brace_rotation: f64,
    leg_command: f64,
    pivot: Vector3<f64>,
}

impl BotLeg {
    pub fn new(id: LegId) -> Self {
        let mut leg = Self {
            id,
            brace_rotation: 0.0,
            leg_command: 0.0,
            pivot: Vector3::zeros(),
        };
        leg.set_brace_rotation(REST_ROTATION);
        leg.set_leg_rotation(REST_ROTATION);
        leg
    }

    pub fn id(&self) -> LegId {
        self.id
    }

    /// Clamped brace angle currently applied to the assembly.
    pub fn brace_rotation(&self) -> f64 {
        self.brace_rotation
    }

    /// Last leg command as received, before clamping.
    pub fn leg_command(&self) -> f64 {
        self.leg_command
    }

    /// Leg pivot offset relative to the assembly, from the clamped leg angle.
    pub fn pivot(&self) -> Vector3<f64> {
        self.pivot
    }

    pub fn set_brace_rotation(&mut self, raw: f64) {
        self.brace_rotation = brace_angle(raw);
    }

    pub fn set_leg_rotation(&mut self, raw: f64) {
        self.leg_command = raw;
        let s = self.id.signs();
        self.pivot = leg_pivot(raw, s.x, s.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gait::joint::PIVOT_RADIUS;

    #[test]
    fn mounts_sit_on_body_corners() {
        assert_eq!(LegId::FrontLeft.mount(), Vector2::new(4.5, -4.5));
        assert_eq!(LegId::BackRight.mount(), Vector2::new(-4.5, 4.5));
        for id in LegId::ALL {
            assert_eq!(LegId::ALL[id.index()], id);
        }
    }

    #[test]
    fn brace_is_stored_clamped_leg_is_stored_raw() {
        let mut leg = BotLeg::new(LegId::FrontRight);
        leg.set_brace_rotation(2.0);
        leg.set_leg_rotation(5.0);
        assert_eq!(leg.brace_rotation(), 0.4);
        assert_eq!(leg.leg_command(), 5.0);
        let p = leg.pivot();
        assert!((p.x.hypot(p.y) - PIVOT_RADIUS).abs() < 1e-12);
        assert!((p.z.hypot(p.y) - PIVOT_RADIUS).abs() < 1e-12);
        // Pivot follows the clamped angle, not the raw command.
        assert!((p.y - PIVOT_RADIUS * 1.6f64.sin()).abs() < 1e-12);
    }

    #[test]
    fn new_leg_rests_at_small_angle() {
        let leg = BotLeg::new(LegId::BackLeft);
        assert_eq!(leg.brace_rotation(), REST_ROTATION);
        assert_eq!(leg.leg_command(), REST_ROTATION);
        assert!(leg.pivot().x < 0.0 && leg.pivot().z < 0.0);
    }
}
