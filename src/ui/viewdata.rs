use std::time::Instant;

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::gait::{GaitDriver, GaitFrame, GaitOscillators};
use crate::ui::lessons::{BracePairsLesson, FootAndBraceLesson, SineLesson, SingleBraceLesson};
use crate::ui::scene::Scene3d;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LessonTab {
    #[default]
    Gait,
    Sine,
    SingleBrace,
    BracePairs,
    FootAndBrace,
}

impl LessonTab {
    pub const ALL: [LessonTab; 5] = [
        LessonTab::Gait,
        LessonTab::Sine,
        LessonTab::SingleBrace,
        LessonTab::BracePairs,
        LessonTab::FootAndBrace,
    ];

    pub fn title(self) -> &'static str {
        match self {
            LessonTab::Gait => "Gait",
            LessonTab::Sine => "Sine",
            LessonTab::SingleBrace => "Single brace",
            LessonTab::BracePairs => "Brace pairs",
            LessonTab::FootAndBrace => "Foot and brace",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Playing,
    Paused,
}

/// Animation clock in milliseconds, scaled and pausable.
#[derive(Clone, Debug)]
pub struct Playback {
    pub state: PlaybackState,
    pub time_scale: f64,
    resumed_at: Instant,
    base_ms: f64,
}

impl Playback {
    pub fn new(start: Instant, time_scale: f64, paused: bool) -> Self {
        Self {
            state: if paused {
                PlaybackState::Paused
            } else {
                PlaybackState::Playing
            },
            time_scale,
            resumed_at: start,
            base_ms: 0.0,
        }
    }

    pub fn time_at(&self, now: Instant) -> f64 {
        match self.state {
            PlaybackState::Paused => self.base_ms,
            PlaybackState::Playing => {
                let elapsed = now.saturating_duration_since(self.resumed_at);
                self.base_ms + elapsed.as_secs_f64() * 1000.0 * self.time_scale
            }
        }
    }

    pub fn toggle(&mut self, now: Instant) {
        match self.state {
            PlaybackState::Playing => {
                self.base_ms = self.time_at(now);
                self.state = PlaybackState::Paused;
            }
            PlaybackState::Paused => {
                self.resumed_at = now;
                self.state = PlaybackState::Playing;
            }
        }
    }

    /// Changes speed without a jump in the displayed time.
    pub fn set_time_scale(&mut self, now: Instant, time_scale: f64) {
        self.base_ms = self.time_at(now);
        self.resumed_at = now;
        self.time_scale = time_scale;
    }

    pub fn rewind(&mut self, now: Instant) {
        self.base_ms = 0.0;
        self.resumed_at = now;
    }
}

#[derive(Clone, Debug, Default)]
pub struct Lessons {
    pub sine: SineLesson,
    pub single_brace: SingleBraceLesson,
    pub brace_pairs: BracePairsLesson,
    pub foot_and_brace: FootAndBraceLesson,
}

/// Everything the window draws, owned by the app between frames.
#[derive(Clone, Debug)]
pub struct LabState {
    pub tab: LessonTab,
    pub playback: Playback,
    pub lessons: Lessons,
    pub driver: GaitDriver,
    pub scene: Scene3d,
    pub frame: GaitFrame,
    pub scope_height: f32,
    pub scope_ticks: usize,
}

impl LabState {
    pub fn new(cfg: &AppConfig, start: Instant) -> Self {
        let oscillators = GaitOscillators::from_config(&cfg.gait).unwrap_or_else(|err| {
            warn!(%err, "invalid [gait] config, using built-in oscillators");
            GaitOscillators::default()
        });
        let mut driver = GaitDriver::new(oscillators);
        let frame = driver.step(0.0);
        info!(
            time_scale = cfg.playback.time_scale,
            paused = cfg.playback.start_paused,
            "gait lab ready"
        );
        Self {
            tab: LessonTab::default(),
            playback: Playback::new(start, cfg.playback.time_scale, cfg.playback.start_paused),
            lessons: Lessons::default(),
            driver,
            scene: Scene3d::new(&cfg.scene),
            frame,
            scope_height: cfg.view.scope_height,
            scope_ticks: cfg.view.scope_ticks,
        }
    }

    /// Steps the gait to the playback time at `now`.
    pub fn advance(&mut self, now: Instant) -> f64 {
        let t = self.playback.time_at(now);
        self.frame = self.driver.step(t);
        t
    }
}
