//! Time-domain primitives with no knowledge of the robot.

pub mod oscillator;
pub mod phase;
pub mod trace;
