use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};

use tracing::*;

use crate::config::AppConfig;
use crate::ui::viewdata::LabState;

pub struct App {
    lab: LabState,
    repaint: Duration,
    exiting: Arc<AtomicBool>,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &AppConfig, stop_flag: Arc<AtomicBool>) -> Self {
        cc.egui_ctx.set_pixels_per_point(config.view.pixels_per_point);
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        Self {
            lab: LabState::new(config, Instant::now()),
            repaint: Duration::from_millis(config.playback.repaint_ms),
            exiting: stop_flag,
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.exiting.load(Ordering::SeqCst) {
            info!("SIGINT received: closing window.");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        // One gait step per rendered frame; the lessons read the same clock.
        let t = self.lab.advance(Instant::now());
        trace!(t, "frame");
        crate::ui::windows::main_window(ctx, &mut self.lab);
        ctx.request_repaint_after(self.repaint);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        debug!(t = self.lab.frame.t, "App drop");
    }
}
