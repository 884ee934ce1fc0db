use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML (written with commented defaults if missing)
    #[arg(long, default_value = "minikame.toml")]
    pub config: String,

    /// Run without GUI (headless): step the gait and print joint angles
    #[arg(long, default_value_t = false)]
    pub nogui: bool,

    /// Simulated duration in headless mode, milliseconds
    #[arg(long, default_value_t = 2000.0)]
    pub duration_ms: f64,

    /// Time between headless frames, milliseconds
    #[arg(long, default_value_t = 16.0)]
    pub frame_ms: f64,

    /// Print one CSV row per headless frame
    #[arg(long, default_value_t = false)]
    pub csv: bool,

    /// Start the window with the animation paused (overrides config)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub paused: Option<bool>,
}
