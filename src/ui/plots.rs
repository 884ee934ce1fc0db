use egui::{Align2, Color32};
use egui_plot::{HLine, Line, LineStyle, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::core::oscillator::Oscillator;
use crate::core::trace::{SideGate, Trace};

const WAVE_COLOR: Color32 = Color32::from_rgb(0xff, 0x00, 0x00);
const GUIDE_COLOR: Color32 = Color32::from_rgb(0x00, 0x00, 0xff);
const LIMIT_COLOR: Color32 = Color32::from_rgb(0xaa, 0x00, 0x00);

/// Display settings of one oscilloscope; the oscillator itself is passed per draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeView {
    pub ticks: usize,
    /// Half height of the y range; `None` uses the oscillator amplitude.
    pub max_y: Option<f64>,
    pub display_ticks: bool,
    pub spaced_x_labels: Vec<String>,
    /// Cycle length used for side gating, the gate bucket is half of it.
    pub period: f64,
    pub active_side: Option<u8>,
    /// Joint limits drawn as solid lines, if any.
    pub limits: Option<(f64, f64)>,
    pub height: f32,
}

impl Default for ScopeView {
    fn default() -> Self {
        Self {
            ticks: 1000,
            max_y: None,
            display_ticks: false,
            spaced_x_labels: Vec::new(),
            period: 1000.0,
            active_side: None,
            limits: None,
            height: 120.0,
        }
    }
}

impl ScopeView {
    /// Scope over `ticks` samples with a fixed y range and tick labels.
    pub fn ticked(ticks: usize, max_y: f64) -> Self {
        Self {
            ticks,
            max_y: Some(max_y),
            display_ticks: true,
            period: ticks as f64,
            ..Self::default()
        }
    }

    pub fn gate(&self) -> Option<SideGate> {
        self.active_side
            .map(|side| SideGate::new(side, self.period / 2.0))
    }

    pub fn resolved_max_y(&self, osc: &Oscillator) -> f64 {
        self.max_y.unwrap_or_else(|| osc.amplitude())
    }

    pub fn sample(&self, osc: &Oscillator, time: f64) -> Trace {
        Trace::sample(osc, time, self.ticks, self.gate())
    }
}

fn trim_label(v: f64) -> String {
    let s = format!("{v}");
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}

/// Draws the oscillator window starting at `time`: zero and ±max guides, the
/// waveform and a marker at the current value.
pub fn scope(ui: &mut egui::Ui, id: &str, view: &ScopeView, osc: &Oscillator, time: f64) {
    let trace = view.sample(osc, time);
    let max_y = view.resolved_max_y(osc);
    let ticks = view.ticks.max(1) as f64;

    Plot::new(id)
        .height(view.height)
        .allow_scroll(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show_axes([false, false])
        .show_grid(false)
        .include_x(0.0)
        .include_x(ticks)
        .include_y(-max_y * 1.1)
        .include_y(max_y * 1.1)
        .show(ui, |plot_ui| {
            let dashed = LineStyle::dashed_loose();
            plot_ui.hline(HLine::new("zero", 0.0).color(GUIDE_COLOR).width(0.5).style(dashed));
            plot_ui.hline(HLine::new("max", max_y).color(GUIDE_COLOR).width(0.5).style(dashed));
            plot_ui.hline(HLine::new("min", -max_y).color(GUIDE_COLOR).width(0.5).style(dashed));

            if let Some((lo, hi)) = view.limits {
                plot_ui.hline(HLine::new("lower limit", lo).color(LIMIT_COLOR));
                plot_ui.hline(HLine::new("upper limit", hi).color(LIMIT_COLOR));
            }

            for (y, label) in [(0.0, "0".to_string()), (max_y, trim_label(max_y)), (-max_y, trim_label(-max_y))] {
                plot_ui.text(
                    Text::new(label.clone(), PlotPoint::new(0.0, y), label)
                        .anchor(Align2::LEFT_CENTER)
                        .color(Color32::BLACK),
                );
            }

            if view.display_ticks {
                plot_ui.text(
                    Text::new("start", PlotPoint::new(0.0, -max_y * 1.1), "0 ticks")
                        .anchor(Align2::LEFT_BOTTOM),
                );
                plot_ui.text(
                    Text::new("end", PlotPoint::new(ticks, -max_y * 1.1), format!("{} ticks", view.ticks))
                        .anchor(Align2::RIGHT_BOTTOM),
                );
            }

            if view.spaced_x_labels.len() > 1 {
                let interval = ticks / (view.spaced_x_labels.len() - 1) as f64;
                for (i, label) in view.spaced_x_labels.iter().enumerate() {
                    plot_ui.text(
                        Text::new(label.clone(), PlotPoint::new(i as f64 * interval, -max_y * 1.05), label.clone())
                            .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            }

            let points: PlotPoints = trace.scaled_points(1.0, 1.0).collect();
            plot_ui.line(Line::new("wave", points).color(WAVE_COLOR).width(1.0));

            if let Some(head) = trace.head {
                plot_ui.points(
                    Points::new("now", vec![[0.0, head]])
                        .radius(5.0)
                        .filled(true)
                        .color(WAVE_COLOR),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_follows_oscillator_amplitude() {
        let osc = Oscillator::new(0.3, 0.0, 0.0, 1000.0, 0.0).unwrap();
        let view = ScopeView::default();
        assert_eq!(view.resolved_max_y(&osc), 0.3);
        assert_eq!(view.gate(), None);
        assert_eq!(ScopeView::ticked(2000, 2.0).resolved_max_y(&osc), 2.0);
    }

    #[test]
    fn gate_bucket_is_half_the_period() {
        let view = ScopeView {
            period: 1000.0,
            active_side: Some(1),
            ..ScopeView::default()
        };
        assert_eq!(view.gate(), Some(SideGate::new(1, 500.0)));
        let osc = Oscillator::default();
        let trace = view.sample(&osc, 0.0);
        assert_eq!(trace.head, None);
        assert_eq!(trace.samples[499], 0.0);
        assert_eq!(trace.samples[500], osc.value_at(500.0));
    }

    #[test]
    fn labels_drop_trailing_zero() {
        assert_eq!(trim_label(2.0), "2");
        assert_eq!(trim_label(-0.5), "-0.5");
    }
}
