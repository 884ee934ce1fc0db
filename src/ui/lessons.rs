//! The step-by-step panels that build up to the full gait: a bare sine, one
//! brace, four braces in diagonal pairs, and a brace with its foot.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use egui::{DragValue, Grid, Sense, Slider, Vec2};
use tracing::warn;

use crate::core::oscillator::{Oscillator, OscillatorError};
use crate::core::phase::describe_phase;
use crate::core::trace::side_at;
use crate::ui::plots::{ScopeView, scope};
use crate::ui::sketch::{self, FourBraceAngles};

fn accept(result: Result<(), OscillatorError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!(%err, "rejected oscillator edit");
            false
        }
    }
}

fn osc(amplitude: f64, phase: f64, offset: f64, period: f64) -> Oscillator {
    Oscillator::new(amplitude, phase, offset, period, 0.0).unwrap_or_default()
}

/// Drag fields for the four wave parameters. Returns true when a value changed.
pub fn oscillator_controls(ui: &mut egui::Ui, id: &str, osc: &mut Oscillator) -> bool {
    let mut changed = false;
    let mut amplitude = osc.amplitude();
    let mut phase = osc.phase();
    let mut offset = osc.offset();
    let mut period = osc.period();

    Grid::new(id).num_columns(3).show(ui, |ui| {
        ui.label("amplitude");
        if ui.add(DragValue::new(&mut amplitude).speed(0.01)).changed() {
            changed |= accept(osc.set_amplitude(amplitude));
        }
        ui.label(format!("{}", osc.amplitude()));
        ui.end_row();

        ui.label("phase");
        if ui.add(DragValue::new(&mut phase).speed(0.01)).changed() {
            changed |= accept(osc.set_phase(phase));
        }
        ui.label(describe_phase(osc.phase()));
        ui.end_row();

        ui.label("offset");
        if ui.add(DragValue::new(&mut offset).speed(0.01)).changed() {
            changed |= accept(osc.set_offset(offset));
        }
        ui.label(format!("{}", osc.offset()));
        ui.end_row();

        ui.label("period");
        if ui.add(DragValue::new(&mut period).speed(10.0)).changed() {
            changed |= accept(osc.set_period(period));
        }
        ui.label(format!("{} ticks", osc.period()));
        ui.end_row();
    });
    changed
}

/// A single tweakable wave drawn from t = 0.
#[derive(Debug, Clone)]
pub struct SineLesson {
    pub oscillator: Oscillator,
    pub view: ScopeView,
}

impl Default for SineLesson {
    fn default() -> Self {
        Self {
            oscillator: Oscillator::default(),
            view: ScopeView {
                spaced_x_labels: ["0", "π/2", "π", "3π/2", "2π", "5π/2", "3π", "7π/2", "4π"]
                    .map(String::from)
                    .to_vec(),
                ..ScopeView::ticked(2000, 2.0)
            },
        }
    }
}

impl SineLesson {
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Sine wave");
        ui.label("value = offset + amplitude · sin(phase + 2π·t / period)");
        oscillator_controls(ui, "sine_controls", &mut self.oscillator);
        scope(ui, "sine_scope", &self.view, &self.oscillator, 0.0);
    }
}

/// One brace swinging back and forth on its corner.
#[derive(Debug, Clone)]
pub struct SingleBraceLesson {
    pub oscillator: Oscillator,
    pub view: ScopeView,
}

impl Default for SingleBraceLesson {
    fn default() -> Self {
        Self {
            oscillator: osc(1.0, 0.0, 0.4, 1000.0),
            view: ScopeView::ticked(2000, 2.0),
        }
    }
}

impl SingleBraceLesson {
    pub fn angle(&self, time: f64) -> f64 {
        self.oscillator.value_at(time)
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, time: f64) {
        ui.heading("Single brace");
        oscillator_controls(ui, "single_brace_controls", &mut self.oscillator);
        let (rect, _) = ui.allocate_exact_size(sketch::SINGLE_BRACE_SIZE, Sense::hover());
        sketch::single_brace(ui.painter(), rect, sketch::SINGLE_BRACE_SIZE, self.angle(time));
        scope(ui, "single_brace_scope", &self.view, &self.oscillator, time);
    }
}

/// Four braces; back-right/front-left and back-left/front-right share a phase.
#[derive(Debug, Clone)]
pub struct BracePairsLesson {
    pub back_right: Oscillator,
    pub front_left: Oscillator,
    pub back_left: Oscillator,
    pub front_right: Oscillator,
    pub view: ScopeView,
}

impl Default for BracePairsLesson {
    fn default() -> Self {
        Self {
            back_right: osc(0.8, FRAC_PI_2, 0.4, 1000.0),
            front_left: osc(0.8, FRAC_PI_2, -0.1, 1000.0),
            back_left: osc(0.8, 1.5 * PI, 0.4, 1000.0),
            front_right: osc(0.8, 1.5 * PI, -0.1, 1000.0),
            view: ScopeView::ticked(2000, 2.0),
        }
    }
}

impl BracePairsLesson {
    pub fn set_phase_brfl(&mut self, phase: f64) -> Result<(), OscillatorError> {
        self.back_right.set_phase(phase)?;
        self.front_left.set_phase(phase)
    }

    pub fn set_phase_blfr(&mut self, phase: f64) -> Result<(), OscillatorError> {
        self.back_left.set_phase(phase)?;
        self.front_right.set_phase(phase)
    }

    pub fn angles(&self, time: f64) -> FourBraceAngles {
        FourBraceAngles {
            front_left: self.front_left.value_at(time),
            front_right: self.front_right.value_at(time),
            back_left: self.back_left.value_at(time),
            back_right: self.back_right.value_at(time),
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, time: f64) {
        ui.heading("Brace pairs");
        let (rect, _) = ui.allocate_exact_size(Vec2::new(288.0, 144.0), Sense::hover());
        sketch::four_braces(ui.painter(), rect, self.angles(time));

        let mut brfl = self.back_right.phase();
        ui.horizontal(|ui| {
            ui.label("BR / FL phase");
            if ui.add(Slider::new(&mut brfl, 0.0..=TAU)).changed() {
                accept(self.set_phase_brfl(brfl));
            }
            ui.label(describe_phase(self.back_right.phase()));
        });
        scope(ui, "brfl_scope", &self.view, &self.back_right, time);

        let mut blfr = self.back_left.phase();
        ui.horizontal(|ui| {
            ui.label("BL / FR phase");
            if ui.add(Slider::new(&mut blfr, 0.0..=TAU)).changed() {
                accept(self.set_phase_blfr(blfr));
            }
            ui.label(describe_phase(self.back_left.phase()));
        });
        scope(ui, "blfr_scope", &self.view, &self.back_left, time);
    }
}

/// Brace and foot at a time picked with a slider instead of the clock.
#[derive(Debug, Clone)]
pub struct FootAndBraceLesson {
    pub brace: Oscillator,
    pub foot: Oscillator,
    pub time: f64,
    pub active_side: Option<u8>,
    pub brace_view: ScopeView,
    pub foot_view: ScopeView,
}

impl Default for FootAndBraceLesson {
    fn default() -> Self {
        Self {
            brace: osc(1.0, FRAC_PI_2, 0.4, 1000.0),
            foot: osc(10.0, FRAC_PI_2, 10.0, 500.0),
            time: 0.0,
            active_side: None,
            brace_view: ScopeView::ticked(3000, 2.0),
            foot_view: ScopeView {
                period: 1000.0,
                ..ScopeView::ticked(3000, 20.0)
            },
        }
    }
}

impl FootAndBraceLesson {
    /// Gait cycle shared by both oscilloscopes.
    const CYCLE: f64 = 1000.0;

    pub fn set_active_side(&mut self, side: Option<u8>) {
        self.active_side = side;
        self.foot_view.active_side = side;
    }

    /// How far the foot is lifted, `None` while its side is resting.
    pub fn foot_lift(&self) -> Option<f64> {
        let side = side_at(self.time, Self::CYCLE / 2.0);
        match self.active_side {
            Some(active) if active != side => None,
            _ => Some(self.foot.value_at(self.time)),
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Foot and brace");
        ui.horizontal(|ui| {
            ui.add(Slider::new(&mut self.time, 0.0..=3000.0).step_by(1.0).text("time"));
            let mut gated = self.active_side == Some(0);
            if ui.checkbox(&mut gated, "only lift on side 0").changed() {
                self.set_active_side(gated.then_some(0));
            }
        });

        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(sketch::FOOT_PANEL_SIZE, Sense::hover());
            sketch::single_brace(ui.painter(), rect, sketch::FOOT_PANEL_SIZE, self.brace.value_at(self.time));
            let (rect, _) = ui.allocate_exact_size(sketch::FOOT_PANEL_SIZE, Sense::hover());
            sketch::foot_and_brace(ui.painter(), rect, self.foot_lift());
        });
        scope(ui, "foot_brace_scope", &self.brace_view, &self.brace, self.time);
        scope(ui, "foot_scope", &self.foot_view, &self.foot, self.time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_phase_moves_both_braces() {
        let mut lesson = BracePairsLesson::default();
        lesson.set_phase_brfl(1.0).unwrap();
        assert_eq!(lesson.back_right.phase(), 1.0);
        assert_eq!(lesson.front_left.phase(), 1.0);
        assert_eq!(lesson.back_left.phase(), 1.5 * PI);

        assert!(lesson.set_phase_blfr(f64::NAN).is_err());
        assert_eq!(lesson.front_right.phase(), 1.5 * PI);
    }

    #[test]
    fn foot_rests_off_side() {
        let mut lesson = FootAndBraceLesson::default();
        lesson.time = 600.0;
        assert!(lesson.foot_lift().is_some());

        lesson.set_active_side(Some(0));
        assert_eq!(lesson.foot_view.active_side, Some(0));
        assert_eq!(lesson.foot_lift(), None);

        lesson.time = 200.0;
        assert_eq!(lesson.foot_lift(), Some(lesson.foot.value_at(200.0)));
    }

    #[test]
    fn single_brace_swings_unclamped() {
        let lesson = SingleBraceLesson::default();
        assert!((lesson.angle(0.0) - 0.4).abs() < 1e-12);
        assert!((lesson.angle(250.0) - 1.4).abs() < 1e-12);
    }

    #[test]
    fn sine_lesson_labels_every_half_pi() {
        let lesson = SineLesson::default();
        assert_eq!(lesson.view.spaced_x_labels.len(), 9);
        assert_eq!(lesson.view.ticks, 2000);
    }

    #[test]
    fn controls_leave_out_of_turn_phase_alone() {
        let mut osc = Oscillator::new(0.5, -1.0, 0.1, 500.0, 0.0).unwrap();
        let ctx = egui::Context::default();
        let mut changed = true;
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    changed = oscillator_controls(ui, "phase_controls", &mut osc);
                });
            });
        }
        assert!(!changed);
        assert_eq!(osc.phase(), -1.0);
    }
}
