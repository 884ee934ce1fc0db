use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaitConfig {
    #[serde(default = "GaitConfig::default_brace_amplitude")]
    pub brace_amplitude: f64,
    #[serde(default = "GaitConfig::default_brace_period")]
    pub brace_period: f64,
    #[serde(default = "GaitConfig::default_front_brace_phase")]
    pub front_brace_phase: f64,
    #[serde(default = "GaitConfig::default_back_brace_phase")]
    pub back_brace_phase: f64,
    #[serde(default = "GaitConfig::default_leg_amplitude")]
    pub leg_amplitude: f64,
    #[serde(default = "GaitConfig::default_leg_phase")]
    pub leg_phase: f64,
    #[serde(default = "GaitConfig::default_leg_offset")]
    pub leg_offset: f64,
    #[serde(default = "GaitConfig::default_leg_period")]
    pub leg_period: f64,
}

impl GaitConfig {
    fn default_brace_amplitude() -> f64 {
        0.3
    }
    fn default_brace_period() -> f64 {
        1000.0
    }
    fn default_front_brace_phase() -> f64 {
        1.5 * PI
    }
    fn default_back_brace_phase() -> f64 {
        FRAC_PI_2
    }
    fn default_leg_amplitude() -> f64 {
        0.5
    }
    fn default_leg_phase() -> f64 {
        FRAC_PI_2
    }
    fn default_leg_offset() -> f64 {
        0.1
    }
    fn default_leg_period() -> f64 {
        500.0
    }
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            brace_amplitude: Self::default_brace_amplitude(),
            brace_period: Self::default_brace_period(),
            front_brace_phase: Self::default_front_brace_phase(),
            back_brace_phase: Self::default_back_brace_phase(),
            leg_amplitude: Self::default_leg_amplitude(),
            leg_phase: Self::default_leg_phase(),
            leg_offset: Self::default_leg_offset(),
            leg_period: Self::default_leg_period(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "ViewConfig::default_window_width")]
    pub window_width: f32,
    #[serde(default = "ViewConfig::default_window_height")]
    pub window_height: f32,
    #[serde(default = "ViewConfig::default_pixels_per_point")]
    pub pixels_per_point: f32,
    #[serde(default = "ViewConfig::default_scope_height")]
    pub scope_height: f32,
    #[serde(default = "ViewConfig::default_scope_ticks")]
    pub scope_ticks: usize,
}

impl ViewConfig {
    fn default_window_width() -> f32 {
        1400.0
    }
    fn default_window_height() -> f32 {
        1000.0
    }
    fn default_pixels_per_point() -> f32 {
        1.25
    }
    fn default_scope_height() -> f32 {
        120.0
    }
    fn default_scope_ticks() -> usize {
        1000
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            window_width: Self::default_window_width(),
            window_height: Self::default_window_height(),
            pixels_per_point: Self::default_pixels_per_point(),
            scope_height: Self::default_scope_height(),
            scope_ticks: Self::default_scope_ticks(),
        }
    }
}

/// Layout of the 3D oscilloscope traces and the initial orbit camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "SceneConfig::default_trace_points")]
    pub trace_points: usize,
    #[serde(default = "SceneConfig::default_trace_z_offset")]
    pub trace_z_offset: f64,
    #[serde(default = "SceneConfig::default_trace_x_scale")]
    pub trace_x_scale: f64,
    #[serde(default = "SceneConfig::default_trace_y_scale")]
    pub trace_y_scale: f64,
    #[serde(default = "SceneConfig::default_camera_distance")]
    pub camera_distance: f64,
    #[serde(default = "SceneConfig::default_camera_yaw")]
    pub camera_yaw: f64,
    #[serde(default = "SceneConfig::default_camera_pitch")]
    pub camera_pitch: f64,
}

impl SceneConfig {
    fn default_trace_points() -> usize {
        2000
    }
    fn default_trace_z_offset() -> f64 {
        5.0
    }
    fn default_trace_x_scale() -> f64 {
        0.002
    }
    fn default_trace_y_scale() -> f64 {
        5.0
    }
    fn default_camera_distance() -> f64 {
        // |(-50, 45, 35)|
        75.83
    }
    fn default_camera_yaw() -> f64 {
        2.53
    }
    fn default_camera_pitch() -> f64 {
        0.636
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            trace_points: Self::default_trace_points(),
            trace_z_offset: Self::default_trace_z_offset(),
            trace_x_scale: Self::default_trace_x_scale(),
            trace_y_scale: Self::default_trace_y_scale(),
            camera_distance: Self::default_camera_distance(),
            camera_yaw: Self::default_camera_yaw(),
            camera_pitch: Self::default_camera_pitch(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default = "PlaybackConfig::default_time_scale")]
    pub time_scale: f64,
    #[serde(default = "PlaybackConfig::default_start_paused")]
    pub start_paused: bool,
    #[serde(default = "PlaybackConfig::default_repaint_ms")]
    pub repaint_ms: u64,
}

impl PlaybackConfig {
    fn default_time_scale() -> f64 {
        1.0
    }
    fn default_start_paused() -> bool {
        false
    }
    fn default_repaint_ms() -> u64 {
        16
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            time_scale: Self::default_time_scale(),
            start_paused: Self::default_start_paused(),
            repaint_ms: Self::default_repaint_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub gait: GaitConfig,
    #[serde(default)]
    pub view: ViewConfig,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl AppConfig {
    fn round_f64(x: f64) -> f64 {
        (x * 1_000_000.0).round() / 1_000_000.0
    }

    fn rounded(mut self) -> Self {
        let g = &mut self.gait;
        for v in [
            &mut g.brace_amplitude,
            &mut g.brace_period,
            &mut g.front_brace_phase,
            &mut g.back_brace_phase,
            &mut g.leg_amplitude,
            &mut g.leg_phase,
            &mut g.leg_offset,
            &mut g.leg_period,
        ] {
            *v = Self::round_f64(*v);
        }
        self.scene.trace_x_scale = Self::round_f64(self.scene.trace_x_scale);
        self.playback.time_scale = Self::round_f64(self.playback.time_scale);
        self
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => {
                        info!(path, "loaded config");
                        return cfg;
                    }
                    Err(err) => {
                        warn!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    warn!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default().rounded();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, Self::commented(&text)) {
                    warn!("Failed to write default config to {path}: {err}");
                } else {
                    info!(path, "wrote default config");
                }
            }
            Err(err) => warn!("Failed to serialize default config ({err}); continuing with defaults"),
        }
        default_cfg
    }

    /// Comments out every key so the written file documents the defaults
    /// without pinning them. Section headers stay live.
    fn commented(text: &str) -> String {
        let mut commented = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if !trimmed.is_empty() && !(trimmed.starts_with('[') && trimmed.ends_with(']')) {
                commented.push_str("# ");
            }
            commented.push_str(line);
            commented.push('\n');
        }
        commented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn unique_path(name: &str) -> std::path::PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "minikame_config_test_{}_{}",
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        p
    }

    #[test]
    fn load_or_default_writes_defaults_cleanly() {
        let path = unique_path("defaults.toml");
        let path_str = path.to_string_lossy().to_string();
        let _ = fs::remove_file(&path);

        let cfg = AppConfig::load_or_default(&path_str);
        assert!(path.exists(), "config file should be created");
        assert_eq!(cfg.gait.brace_amplitude, 0.3);
        assert_eq!(cfg.gait.leg_period, 500.0);
        assert_eq!(cfg.gait.leg_offset, 0.1);
        assert!((cfg.gait.front_brace_phase - 4.712389).abs() < 1e-6);
        assert_eq!(cfg.scene.trace_points, 2000);
        assert!(!cfg.playback.start_paused);

        let contents = fs::read_to_string(&path).expect("read written config");
        assert!(contents.contains("[gait]"), "sections stay uncommented");
        assert!(
            contents.contains("# brace_amplitude = 0.3"),
            "should write commented brace_amplitude"
        );
        assert!(
            contents.contains("# front_brace_phase = 4.712389"),
            "should round phases to six decimals"
        );
        assert!(
            contents.contains("# leg_period = 500.0"),
            "should keep a decimal point on whole floats"
        );
        assert!(
            contents.contains("# start_paused = false"),
            "should write commented start_paused"
        );

        // A fully commented file parses back to the defaults.
        let reparsed = AppConfig::load_or_default(&path_str);
        assert_eq!(reparsed.gait.leg_amplitude, 0.5);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_or_default_reads_existing() {
        let path = unique_path("custom.toml");
        let path_str = path.to_string_lossy().to_string();
        let mut custom = AppConfig::default();
        custom.gait.leg_amplitude = 0.8;
        custom.gait.brace_period = 1500.0;
        custom.view.scope_ticks = 3000;
        custom.playback.start_paused = true;
        fs::write(&path, toml::to_string_pretty(&custom).unwrap()).unwrap();

        let cfg = AppConfig::load_or_default(&path_str);
        assert_eq!(cfg.gait.leg_amplitude, 0.8);
        assert_eq!(cfg.gait.brace_period, 1500.0);
        assert_eq!(cfg.view.scope_ticks, 3000);
        assert!(cfg.playback.start_paused);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unparsable_file_falls_back_to_defaults() {
        let path = unique_path("broken.toml");
        let path_str = path.to_string_lossy().to_string();
        fs::write(&path, "[gait\nbrace_amplitude = ").unwrap();

        let cfg = AppConfig::load_or_default(&path_str);
        assert_eq!(cfg.gait.brace_amplitude, 0.3);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn commented_keeps_sections_live() {
        let text = "[gait]\nleg_period = 500.0\n\n[playback]\nstart_paused = false\n";
        assert_eq!(
            AppConfig::commented(text),
            "[gait]\n# leg_period = 500.0\n\n[playback]\n# start_paused = false\n"
        );
    }
}
