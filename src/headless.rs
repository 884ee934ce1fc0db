//! Windowless run of the gait driver at a fixed frame interval.

use std::io::{self, Write};

use tracing::info;

use crate::gait::joint::leg_angle;
use crate::gait::{GaitDriver, GaitFrame, GaitSide, LegId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessOptions {
    pub duration_ms: f64,
    pub frame_ms: f64,
    pub csv: bool,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            frame_ms: 16.0,
            csv: false,
        }
    }
}

pub fn csv_header() -> String {
    let mut header = String::from("t,side");
    for id in LegId::ALL {
        header.push_str(&format!(",{0}_brace,{0}_leg", id.short()));
    }
    header
}

/// One CSV row: time, side index, then the applied brace and leg angle per leg.
pub fn csv_row(frame: &GaitFrame) -> String {
    let mut row = format!("{:.3},{}", frame.t, frame.side.index());
    for id in LegId::ALL {
        let leg = frame.leg(id);
        row.push_str(&format!(
            ",{:.6},{:.6}",
            leg.brace_rotation(),
            leg_angle(leg.leg_command())
        ));
    }
    row
}

/// Steps `driver` from 0 to `duration_ms` inclusive and returns the frame count.
pub fn run<W: Write>(driver: &mut GaitDriver, opts: &HeadlessOptions, out: &mut W) -> io::Result<usize> {
    if !opts.frame_ms.is_finite() || opts.frame_ms <= 0.0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("frame interval must be positive (got {})", opts.frame_ms),
        ));
    }
    if !opts.duration_ms.is_finite() || opts.duration_ms < 0.0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("duration must be non-negative (got {})", opts.duration_ms),
        ));
    }

    if opts.csv {
        writeln!(out, "{}", csv_header())?;
    }

    let mut frames = 0usize;
    let mut last_side: Option<GaitSide> = None;
    loop {
        let t = frames as f64 * opts.frame_ms;
        if t > opts.duration_ms {
            break;
        }
        let frame = driver.step(t);
        if opts.csv {
            writeln!(out, "{}", csv_row(&frame))?;
        } else if last_side != Some(frame.side) {
            info!(
                t,
                side = frame.side.index(),
                fl = leg_angle(frame.leg(LegId::FrontLeft).leg_command()),
                fr = leg_angle(frame.leg(LegId::FrontRight).leg_command()),
                bl = leg_angle(frame.leg(LegId::BackLeft).leg_command()),
                br = leg_angle(frame.leg(LegId::BackRight).leg_command()),
                "half-cycle"
            );
        }
        last_side = Some(frame.side);
        frames += 1;
    }
    info!(frames, duration_ms = opts.duration_ms, "headless run finished");
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lists_every_joint() {
        assert_eq!(
            csv_header(),
            "t,side,fl_brace,fl_leg,fr_brace,fr_leg,bl_brace,bl_leg,br_brace,br_leg"
        );
    }

    #[test]
    fn run_counts_inclusive_frames() {
        let mut driver = GaitDriver::default();
        let opts = HeadlessOptions {
            duration_ms: 1000.0,
            frame_ms: 100.0,
            csv: true,
        };
        let mut out = Vec::new();
        let frames = run(&mut driver, &opts, &mut out).unwrap();
        assert_eq!(frames, 11);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert!(lines[1].starts_with("0.000,0,"));
        assert!(lines[6].starts_with("500.000,1,"));
        assert_eq!(lines[1].split(',').count(), 10);
    }

    #[test]
    fn rejects_non_positive_frame_interval() {
        let mut driver = GaitDriver::default();
        let opts = HeadlessOptions {
            frame_ms: 0.0,
            ..HeadlessOptions::default()
        };
        let err = run(&mut driver, &opts, &mut io::sink()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
