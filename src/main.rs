// Entry point: launches the egui/eframe gait lab, or steps the gait headless.
use clap::Parser;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use minikame::app::App;
use minikame::cli::Args;
use minikame::config::AppConfig;
use minikame::gait::{GaitDriver, GaitOscillators};
use minikame::headless::{self, HeadlessOptions};
use tracing::{error, warn};

fn run_headless(args: &Args, config: &AppConfig) -> std::io::Result<()> {
    let oscillators = GaitOscillators::from_config(&config.gait).unwrap_or_else(|err| {
        warn!(%err, "invalid [gait] config, using built-in oscillators");
        GaitOscillators::default()
    });
    let mut driver = GaitDriver::new(oscillators);
    let opts = HeadlessOptions {
        duration_ms: args.duration_ms,
        frame_ms: args.frame_ms,
        csv: args.csv,
    };
    let stdout = std::io::stdout();
    headless::run(&mut driver, &opts, &mut stdout.lock())?;
    Ok(())
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load_or_default(&args.config);
    if let Some(paused) = args.paused {
        config.playback.start_paused = paused;
    }

    if args.nogui {
        if let Err(err) = run_headless(&args, &config) {
            error!(%err, "headless run failed");
            std::process::exit(1);
        }
        return Ok(());
    }

    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_for_ctrlc = stop_flag.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        stop_flag_for_ctrlc.store(true, Ordering::SeqCst);
    }) {
        warn!(%err, "could not install Ctrl-C handler");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.view.window_width, config.view.window_height]),
        ..Default::default()
    };

    eframe::run_native(
        "MiniKame",
        native_options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, &config, stop_flag.clone())))),
    )
}
