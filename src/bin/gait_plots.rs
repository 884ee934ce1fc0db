use std::error::Error;
use std::fs::{create_dir_all, write};
use std::path::Path;

use plotters::prelude::*;

use minikame::config::AppConfig;
use minikame::core::oscillator::Oscillator;
use minikame::core::trace::{SideGate, Trace};
use minikame::gait::{GaitDriver, GaitOscillators, GaitSide, JointKind, LegId};
use minikame::headless::{self, HeadlessOptions};

const TICKS: usize = 2000;

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = Path::new("target/plots/gait");
    create_dir_all(out_dir)?;

    let config = AppConfig::load_or_default("minikame.toml");
    let oscillators = GaitOscillators::from_config(&config.gait)?;

    plot_joint_kind(out_dir, &oscillators, JointKind::Brace)?;
    plot_joint_kind(out_dir, &oscillators, JointKind::Leg)?;
    export_angles_csv(out_dir, oscillators)?;

    println!("Saved gait plots to {}", out_dir.display());
    Ok(())
}

fn plot_joint_kind(
    out_dir: &Path,
    oscillators: &GaitOscillators,
    kind: JointKind,
) -> Result<(), Box<dyn Error>> {
    let out_path = out_dir.join(format!("gait_{}.png", kind.label().to_lowercase()));
    let root = BitMapBackend::new(&out_path, (1200, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((4, 1));

    for (panel, id) in panels.iter().zip(LegId::ALL) {
        let legs = oscillators.get(id);
        let (osc, gate) = match kind {
            JointKind::Brace => (&legs.brace, None),
            JointKind::Leg => (&legs.leg, Some(GaitSide::of_leg(id).gate())),
        };
        render_trace_panel(panel, osc, gate, kind, id)?;
    }

    root.present()?;
    Ok(())
}

/// Y range covering the sampled wave and the joint limits, with a margin.
fn y_bounds(trace: &Trace, kind: JointKind) -> (f64, f64) {
    let (lo, hi) = kind.limits();
    let (wave_lo, wave_hi) = trace.extrema().unwrap_or((lo, hi));
    (wave_lo.min(lo) - 0.1, wave_hi.max(hi) + 0.1)
}

fn render_trace_panel(
    panel: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    osc: &Oscillator,
    gate: Option<SideGate>,
    kind: JointKind,
    id: LegId,
) -> Result<(), Box<dyn Error>> {
    let trace = Trace::sample(osc, 0.0, TICKS, gate);
    let (y_lo, y_hi) = y_bounds(&trace, kind);
    let (lo, hi) = kind.limits();

    let mut chart = ChartBuilder::on(panel)
        .caption(
            format!("{} {} (period {} ms)", id.label(), kind.label(), osc.period()),
            ("sans-serif", 18),
        )
        .margin(8)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..TICKS as f64, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("t (ms)")
        .y_desc("rad")
        .draw()?;

    for limit in [lo, hi] {
        chart.draw_series(LineSeries::new(
            [(0.0, limit), (TICKS as f64, limit)],
            RED.mix(0.6),
        ))?;
    }
    chart.draw_series(LineSeries::new(
        [(0.0, 0.0), (TICKS as f64, 0.0)],
        BLACK.mix(0.3),
    ))?;

    let raw: Vec<(f64, f64)> = trace
        .scaled_points(1.0, 1.0)
        .map(|[x, y]| (x, y))
        .collect();
    chart.draw_series(LineSeries::new(raw, &BLUE))?;

    let clamped: Vec<(f64, f64)> = trace
        .scaled_points(1.0, 1.0)
        .map(|[x, y]| (x, kind.clamp(y)))
        .collect();
    chart.draw_series(LineSeries::new(clamped, GREEN.stroke_width(2)))?;

    Ok(())
}

fn export_angles_csv(out_dir: &Path, oscillators: GaitOscillators) -> Result<(), Box<dyn Error>> {
    let mut driver = GaitDriver::new(oscillators);
    let opts = HeadlessOptions {
        duration_ms: TICKS as f64,
        frame_ms: 10.0,
        csv: true,
    };
    let mut csv = Vec::new();
    headless::run(&mut driver, &opts, &mut csv)?;
    write(out_dir.join("gait_angles.csv"), csv)?;
    Ok(())
}
