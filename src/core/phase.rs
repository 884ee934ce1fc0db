use std::f64::consts::{PI, TAU};

#[inline]
pub fn wrap_0_tau(x: f64) -> f64 {
    x.rem_euclid(TAU)
}

/// Human readable phase: radians, whole degrees and the nearest half-π
/// multiple when the phase sits close to one.
pub fn describe_phase(phase: f64) -> String {
    let degrees = (phase * 180.0 / PI).trunc();
    let over_pi = phase / PI;
    let digits = over_pi - over_pi.floor();
    let mut label = format!("{phase:.3} rad / {degrees} deg");
    if (0.0..=0.05).contains(&digits) {
        label.push_str(&format!(" / ~{}π", over_pi.floor()));
    }
    if (0.48..=0.52).contains(&digits) {
        label.push_str(&format!(" / ~{}π", over_pi.floor() + 0.5));
    }
    label
}
