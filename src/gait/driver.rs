//! Alternating diagonal gait.
//!
//! Braces follow their oscillators every frame. Legs are driven in diagonal
//! pairs: front-left with back-right during even half-cycles, front-right with
//! back-left during odd ones. A pair that is not driven keeps its last angle.

use tracing::debug;

use super::leg::{BotLeg, LegId};
use crate::config::GaitConfig;
use crate::core::oscillator::{Oscillator, OscillatorError};
use crate::core::trace::{SideGate, side_at};

/// Length of one gait half-cycle, in the driver's time unit (ms).
pub const SIDE_BUCKET: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GaitSide {
    /// Even half-cycle: front-left and back-right legs move.
    FrontLeftBackRight,
    /// Odd half-cycle: front-right and back-left legs move.
    FrontRightBackLeft,
}

impl GaitSide {
    pub fn at(t: f64) -> Self {
        Self::from_index(side_at(t, SIDE_BUCKET))
    }

    pub fn from_index(index: u8) -> Self {
        if index == 0 {
            GaitSide::FrontLeftBackRight
        } else {
            GaitSide::FrontRightBackLeft
        }
    }

    pub fn index(self) -> u8 {
        match self {
            GaitSide::FrontLeftBackRight => 0,
            GaitSide::FrontRightBackLeft => 1,
        }
    }

    /// Side during which `leg` is driven.
    pub fn of_leg(leg: LegId) -> Self {
        match leg {
            LegId::FrontLeft | LegId::BackRight => GaitSide::FrontLeftBackRight,
            LegId::FrontRight | LegId::BackLeft => GaitSide::FrontRightBackLeft,
        }
    }

    pub fn drives(self, leg: LegId) -> bool {
        Self::of_leg(leg) == self
    }

    /// Gate that opens a trace only during this side's half-cycles.
    pub fn gate(self) -> SideGate {
        SideGate::new(self.index(), SIDE_BUCKET)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegOscillators {
    pub brace: Oscillator,
    pub leg: Oscillator,
}

/// The eight oscillators of the gait, indexed by [`LegId`].
#[derive(Debug, Clone, PartialEq)]
pub struct GaitOscillators {
    legs: [LegOscillators; 4],
}

impl GaitOscillators {
    pub fn new(legs: [LegOscillators; 4]) -> Self {
        Self { legs }
    }

    pub fn from_config(cfg: &GaitConfig) -> Result<Self, OscillatorError> {
        let build = |id: LegId| -> Result<LegOscillators, OscillatorError> {
            let brace_phase = if id.is_front() {
                cfg.front_brace_phase
            } else {
                cfg.back_brace_phase
            };
            Ok(LegOscillators {
                brace: Oscillator::new(cfg.brace_amplitude, brace_phase, 0.0, cfg.brace_period, 0.0)?,
                leg: Oscillator::new(
                    cfg.leg_amplitude,
                    cfg.leg_phase,
                    cfg.leg_offset,
                    cfg.leg_period,
                    0.0,
                )?,
            })
        };
        Ok(Self {
            legs: [
                build(LegId::FrontLeft)?,
                build(LegId::FrontRight)?,
                build(LegId::BackLeft)?,
                build(LegId::BackRight)?,
            ],
        })
    }

    pub fn get(&self, id: LegId) -> &LegOscillators {
        &self.legs[id.index()]
    }

    pub fn get_mut(&mut self, id: LegId) -> &mut LegOscillators {
        &mut self.legs[id.index()]
    }
}

impl Default for GaitOscillators {
    fn default() -> Self {
        // Defaults are finite with nonzero periods.
        Self::from_config(&GaitConfig::default()).unwrap_or_else(|_| {
            let osc = LegOscillators {
                brace: Oscillator::default(),
                leg: Oscillator::default(),
            };
            Self { legs: [osc; 4] }
        })
    }
}

/// Joint state of the whole robot at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct GaitFrame {
    pub t: f64,
    pub side: GaitSide,
    pub legs: [BotLeg; 4],
}

impl GaitFrame {
    pub fn leg(&self, id: LegId) -> &BotLeg {
        &self.legs[id.index()]
    }
}

#[derive(Debug, Clone)]
pub struct GaitDriver {
    oscillators: GaitOscillators,
    legs: [BotLeg; 4],
    last_side: Option<GaitSide>,
}

impl GaitDriver {
    pub fn new(oscillators: GaitOscillators) -> Self {
        Self {
            oscillators,
            legs: LegId::ALL.map(BotLeg::new),
            last_side: None,
        }
    }

    pub fn oscillators(&self) -> &GaitOscillators {
        &self.oscillators
    }

    pub fn oscillators_mut(&mut self) -> &mut GaitOscillators {
        &mut self.oscillators
    }

    pub fn leg(&self, id: LegId) -> &BotLeg {
        &self.legs[id.index()]
    }

    /// Advances the pose to time `t` and returns a snapshot of it.
    pub fn step(&mut self, t: f64) -> GaitFrame {
        for id in LegId::ALL {
            let brace = self.oscillators.get(id).brace.value_at(t);
            self.legs[id.index()].set_brace_rotation(brace);
        }

        let side = GaitSide::at(t);
        if self.last_side != Some(side) {
            debug!(t, ?side, "gait side switch");
            self.last_side = Some(side);
        }
        for id in LegId::ALL.into_iter().filter(|id| side.drives(*id)) {
            let leg = self.oscillators.get(id).leg.value_at(t);
            self.legs[id.index()].set_leg_rotation(leg);
        }

        GaitFrame {
            t,
            side,
            legs: self.legs,
        }
    }

    /// Returns every leg to its rest pose.
    pub fn reset(&mut self) {
        self.legs = LegId::ALL.map(BotLeg::new);
        self.last_side = None;
    }
}

impl Default for GaitDriver {
    fn default() -> Self {
        Self::new(GaitOscillators::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gait::joint::BRACE_LIMITS;

    #[test]
    fn side_alternates_every_bucket() {
        assert_eq!(GaitSide::at(0.0), GaitSide::FrontLeftBackRight);
        assert_eq!(GaitSide::at(499.0), GaitSide::FrontLeftBackRight);
        assert_eq!(GaitSide::at(500.0), GaitSide::FrontRightBackLeft);
        assert_eq!(GaitSide::at(1000.0), GaitSide::FrontLeftBackRight);
        assert_eq!(GaitSide::at(-10.0), GaitSide::FrontRightBackLeft);
    }

    #[test]
    fn diagonal_pairs() {
        let even = GaitSide::FrontLeftBackRight;
        assert!(even.drives(LegId::FrontLeft) && even.drives(LegId::BackRight));
        assert!(!even.drives(LegId::FrontRight) && !even.drives(LegId::BackLeft));
        for id in LegId::ALL {
            assert_eq!(GaitSide::of_leg(id).gate().active_side, GaitSide::of_leg(id).index());
        }
    }

    #[test]
    fn inactive_pair_holds_last_angle() {
        let mut driver = GaitDriver::default();
        let first = driver.step(100.0);
        let held = first.leg(LegId::FrontRight).leg_command();

        let second = driver.step(300.0);
        assert_eq!(second.side, GaitSide::FrontLeftBackRight);
        assert_eq!(second.leg(LegId::FrontRight).leg_command(), held);
        assert_eq!(second.leg(LegId::BackLeft).leg_command(), held);

        let osc = driver.oscillators().get(LegId::FrontLeft).leg;
        assert_eq!(second.leg(LegId::FrontLeft).leg_command(), osc.value_at(300.0));
    }

    #[test]
    fn braces_update_every_frame() {
        let mut driver = GaitDriver::default();
        for t in [0.0, 250.0, 600.0, 900.0] {
            let frame = driver.step(t);
            for id in LegId::ALL {
                let raw = driver.oscillators().get(id).brace.value_at(t);
                let applied = frame.leg(id).brace_rotation();
                assert_eq!(applied, raw.clamp(BRACE_LIMITS.0, BRACE_LIMITS.1));
            }
        }
    }
}
