//! Sampled windows of an oscillator, shared by the scopes, the 3D traces and
//! the PNG exporter.

use super::oscillator::Oscillator;

/// Which half-cycle `t` falls into: `floor(t / bucket) mod 2`.
///
/// Euclidean modulo, so negative time keeps alternating (`side_at(-1.0, 500.0) == 1`).
#[inline]
pub fn side_at(t: f64, bucket: f64) -> u8 {
    if (t / bucket).floor().rem_euclid(2.0) < 1.0 {
        0
    } else {
        1
    }
}

/// Restricts a trace to the half-cycles of one side; the other side reads as 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideGate {
    pub active_side: u8,
    pub bucket: f64,
}

impl SideGate {
    pub fn new(active_side: u8, bucket: f64) -> Self {
        Self {
            active_side,
            bucket,
        }
    }

    #[inline]
    pub fn is_open(&self, t: f64) -> bool {
        side_at(t, self.bucket) == self.active_side
    }
}

/// `ticks` consecutive samples of an oscillator, one per time unit from `start`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub start: f64,
    pub samples: Vec<f64>,
    /// Value at `start`, `None` when the gate is closed there.
    pub head: Option<f64>,
}

impl Trace {
    pub fn sample(osc: &Oscillator, start: f64, ticks: usize, gate: Option<SideGate>) -> Self {
        let open = |t: f64| gate.is_none_or(|g| g.is_open(t));
        let samples = (0..ticks)
            .map(|i| {
                let t = start + i as f64;
                if open(t) { osc.value_at(t) } else { 0.0 }
            })
            .collect();
        let head = open(start).then(|| osc.value_at(start));
        Self {
            start,
            samples,
            head,
        }
    }

    /// Min and max over the samples; `None` for an empty trace.
    pub fn extrema(&self) -> Option<(f64, f64)> {
        if self.samples.is_empty() {
            return None;
        }
        let lo = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some((lo, hi))
    }

    /// Samples as `[x, y]` pairs with `x = i * x_step` and `y = value * y_scale`.
    pub fn scaled_points(&self, x_step: f64, y_scale: f64) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.samples
            .iter()
            .enumerate()
            .map(move |(i, v)| [i as f64 * x_step, v * y_scale])
    }
}
