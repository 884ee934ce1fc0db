//! Quadruped joint model and the alternating gait that drives it.

pub mod driver;
pub mod joint;
pub mod leg;

pub use driver::{GaitDriver, GaitFrame, GaitOscillators, GaitSide, LegOscillators, SIDE_BUCKET};
pub use joint::JointKind;
pub use leg::{BotLeg, LegId};
