use std::time::Instant;

use egui::{CentralPanel, ScrollArea, SidePanel, TopBottomPanel};

use crate::core::oscillator::Oscillator;
use crate::gait::joint::JointKind;
use crate::gait::{GaitSide, LegId};
use crate::ui::lessons::oscillator_controls;
use crate::ui::plots::{ScopeView, scope};
use crate::ui::viewdata::{LabState, LessonTab, PlaybackState};

fn gait_scope(lab: &LabState, leg: LegId, kind: JointKind) -> ScopeView {
    ScopeView {
        ticks: lab.scope_ticks,
        height: lab.scope_height,
        limits: Some(kind.limits()),
        active_side: match kind {
            JointKind::Brace => None,
            JointKind::Leg => Some(GaitSide::of_leg(leg).index()),
        },
        ..ScopeView::default()
    }
}

fn gait_controls(ui: &mut egui::Ui, lab: &mut LabState) {
    ui.heading("Oscillators");
    ScrollArea::vertical().show(ui, |ui| {
        for leg in LegId::ALL {
            ui.collapsing(leg.label(), |ui| {
                let oscs = lab.driver.oscillators_mut().get_mut(leg);
                ui.label("brace");
                oscillator_controls(ui, &format!("{}_brace", leg.short()), &mut oscs.brace);
                ui.label("leg");
                oscillator_controls(ui, &format!("{}_leg", leg.short()), &mut oscs.leg);
            });
        }
    });
}

fn gait_panel(ui: &mut egui::Ui, lab: &mut LabState) {
    let side = lab.frame.side;
    ui.label(format!(
        "t = {:.0} ms, driving {}",
        lab.frame.t,
        match side {
            GaitSide::FrontLeftBackRight => "front left + back right",
            GaitSide::FrontRightBackLeft => "front right + back left",
        }
    ));

    let oscillators = lab.driver.oscillators().clone();
    lab.scene.show(ui, &lab.frame, &oscillators);

    ui.separator();
    ui.columns(2, |cols| {
        for (col, kind) in [(0, JointKind::Brace), (1, JointKind::Leg)] {
            let ui = &mut cols[col];
            for leg in LegId::ALL {
                let osc: &Oscillator = match kind {
                    JointKind::Brace => &oscillators.get(leg).brace,
                    JointKind::Leg => &oscillators.get(leg).leg,
                };
                let view = gait_scope(lab, leg, kind);
                ui.label(format!("{} {}", leg.label(), kind.label()));
                scope(ui, &format!("{}_{}_scope", leg.short(), kind.label()), &view, osc, lab.frame.t);
            }
        }
    });
}

/// === Main window ===
pub fn main_window(ctx: &egui::Context, lab: &mut LabState) {
    TopBottomPanel::top("top").show(ctx, |ui| {
        ui.heading("MiniKame gait oscillators");
        ui.horizontal(|ui| {
            for tab in LessonTab::ALL {
                ui.selectable_value(&mut lab.tab, tab, tab.title());
            }
            ui.separator();
            let now = Instant::now();
            let label = match lab.playback.state {
                PlaybackState::Playing => "pause",
                PlaybackState::Paused => "play",
            };
            if ui.button(label).clicked() {
                lab.playback.toggle(now);
            }
            if ui.button("rewind").clicked() {
                lab.playback.rewind(now);
                lab.driver.reset();
            }
            let mut scale = lab.playback.time_scale;
            if ui
                .add(egui::Slider::new(&mut scale, 0.05..=4.0).logarithmic(true).text("speed"))
                .changed()
            {
                lab.playback.set_time_scale(now, scale);
            }
        });
    });

    if lab.tab == LessonTab::Gait {
        SidePanel::right("gait_controls")
            .default_width(320.0)
            .show(ctx, |ui| gait_controls(ui, lab));
    }

    let time = lab.frame.t;
    CentralPanel::default().show(ctx, |ui| {
        ScrollArea::vertical().show(ui, |ui| match lab.tab {
            LessonTab::Gait => gait_panel(ui, lab),
            LessonTab::Sine => lab.lessons.sine.ui(ui),
            LessonTab::SingleBrace => lab.lessons.single_brace.ui(ui, time),
            LessonTab::BracePairs => lab.lessons.brace_pairs.ui(ui, time),
            LessonTab::FootAndBrace => lab.lessons.foot_and_brace.ui(ui),
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn gait_scopes_gate_legs_only() {
        let lab = LabState::new(&AppConfig::default(), Instant::now());
        let brace = gait_scope(&lab, LegId::FrontLeft, JointKind::Brace);
        assert_eq!(brace.active_side, None);
        assert_eq!(brace.limits, Some((-0.5, 0.4)));

        let leg = gait_scope(&lab, LegId::BackLeft, JointKind::Leg);
        assert_eq!(leg.active_side, Some(1));
        // 1000 tick cycle: legs flip every 500.
        assert_eq!(leg.gate().map(|g| g.bucket), Some(500.0));
    }
}
