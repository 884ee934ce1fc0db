//! Parametric sine generator evaluated at an absolute time.
//!
//! An [`Oscillator`] carries no history: `value_at` is a closed-form function
//! of its five fields, so the same oscillator can be sampled for a live joint
//! angle, a scrolling scope and an offline plot without any coordination.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned when an oscillator parameter would make `value_at` undefined.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum OscillatorError {
    /// Period is zero or not finite.
    #[error("oscillator period must be finite and nonzero (got {0})")]
    InvalidPeriod(f64),
    /// A field other than the period received NaN or an infinity.
    #[error("oscillator {field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },
}

/// Plain, unvalidated oscillator fields as they appear in config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorParams {
    pub amplitude: f64,
    #[serde(default)]
    pub phase: f64,
    #[serde(default)]
    pub offset: f64,
    pub period: f64,
    #[serde(default)]
    pub t0: f64,
}

/// `offset + amplitude * sin(phase + 2π * ((t - t0) mod period) / period)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OscillatorParams", into = "OscillatorParams")]
pub struct Oscillator {
    amplitude: f64,
    phase: f64,
    offset: f64,
    period: f64,
    t0: f64,
}

fn finite(field: &'static str, value: f64) -> Result<f64, OscillatorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OscillatorError::NonFinite { field, value })
    }
}

fn valid_period(period: f64) -> Result<f64, OscillatorError> {
    if period.is_finite() && period != 0.0 {
        Ok(period)
    } else {
        Err(OscillatorError::InvalidPeriod(period))
    }
}

impl Oscillator {
    pub fn new(
        amplitude: f64,
        phase: f64,
        offset: f64,
        period: f64,
        t0: f64,
    ) -> Result<Self, OscillatorError> {
        Ok(Self {
            amplitude: finite("amplitude", amplitude)?,
            phase: finite("phase", phase)?,
            offset: finite("offset", offset)?,
            period: valid_period(period)?,
            t0: finite("t0", t0)?,
        })
    }

    /// Evaluates the wave at time `t` (same unit as `period`, milliseconds in the UI).
    ///
    /// The remainder is the truncated one, so for `t < t0` the phase runs
    /// backwards through the same cycle; `sin` makes the result periodic either way.
    #[inline]
    pub fn value_at(&self, t: f64) -> f64 {
        let dt = (t - self.t0) % self.period;
        self.offset + self.amplitude * (self.phase + dt * TAU / self.period).sin()
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn t0(&self) -> f64 {
        self.t0
    }

    pub fn set_amplitude(&mut self, amplitude: f64) -> Result<(), OscillatorError> {
        self.amplitude = finite("amplitude", amplitude)?;
        Ok(())
    }

    pub fn set_phase(&mut self, phase: f64) -> Result<(), OscillatorError> {
        self.phase = finite("phase", phase)?;
        Ok(())
    }

    pub fn set_offset(&mut self, offset: f64) -> Result<(), OscillatorError> {
        self.offset = finite("offset", offset)?;
        Ok(())
    }

    pub fn set_period(&mut self, period: f64) -> Result<(), OscillatorError> {
        self.period = valid_period(period)?;
        Ok(())
    }

    pub fn set_t0(&mut self, t0: f64) -> Result<(), OscillatorError> {
        self.t0 = finite("t0", t0)?;
        Ok(())
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self {
            amplitude: 1.0,
            phase: 0.0,
            offset: 0.0,
            period: 1000.0,
            t0: 0.0,
        }
    }
}

impl TryFrom<OscillatorParams> for Oscillator {
    type Error = OscillatorError;

    fn try_from(p: OscillatorParams) -> Result<Self, Self::Error> {
        Self::new(p.amplitude, p.phase, p.offset, p.period, p.t0)
    }
}

impl From<Oscillator> for OscillatorParams {
    fn from(o: Oscillator) -> Self {
        Self {
            amplitude: o.amplitude,
            phase: o.phase,
            offset: o.offset,
            period: o.period,
            t0: o.t0,
        }
    }
}
