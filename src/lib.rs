//! MiniKame gait lab.
//!
//! Sine oscillators drive the brace and leg joints of a four-legged robot.
//! Legs move in diagonal pairs that swap every half-cycle, and every
//! oscillator can be inspected on its own scope and tweaked live.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod gait;
pub mod headless;
pub mod ui;
