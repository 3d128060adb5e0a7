// src/config.rs

//! Configuration for the presentation engine.
//!
//! All settings have defaults suitable for a 60 Hz projector on the primary
//! X display; a capture rig overrides them through a JSON file named by the
//! `GLIMSHOW_CONFIG` environment variable.

use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Process-global configuration, loaded once on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_or_default);

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Output selection and surface appearance.
    pub display: DisplayConfig,
    /// Refresh pacing and timeout bounds.
    pub timing: TimingConfig,
}

/// Defines which output is claimed and how the surface is prepared.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// X display name to claim (e.g. ":0.1"). `None` uses `$DISPLAY`,
    /// i.e. the primary output.
    pub monitor: Option<String>,
    /// Hide the OS cursor while the surface is up.
    pub hide_cursor: bool,
    /// Number of background frames presented during construction so the
    /// output pipeline settles before the first real image.
    pub warmup_frames: u32,
    /// Gray level of the warm-up background.
    pub background_gray: u8,
    /// Geometry reported by the headless driver (tests, CI).
    pub headless_width: u32,
    /// See `headless_width`.
    pub headless_height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            monitor: None,
            hide_cursor: true,
            warmup_frames: 32,
            background_gray: 128,
            headless_width: 1920,
            headless_height: 1080,
        }
    }
}

/// Defines refresh pacing for presents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Output refresh rate in Hz. Presents are paced to this interval.
    pub refresh_rate_hz: f64,
    /// Bounded wait for a present, in refresh intervals. A present that has
    /// not latched within this window fails instead of hanging the producer.
    pub present_timeout_intervals: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            refresh_rate_hz: 60.0,
            present_timeout_intervals: 2,
        }
    }
}

impl Config {
    /// Load from the file named by `GLIMSHOW_CONFIG`, falling back to
    /// defaults if the variable is unset or the file is unreadable.
    pub fn load_or_default() -> Self {
        let path = match std::env::var("GLIMSHOW_CONFIG") {
            Ok(path) => path,
            Err(_) => return Self::default(),
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Config: failed to parse '{}': {}; using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Config: failed to read '{}': {}; using defaults", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.timing.refresh_rate_hz, 60.0);
        assert_eq!(config.timing.present_timeout_intervals, 2);
        assert_eq!(config.display.warmup_frames, 32);
        assert_eq!(config.display.background_gray, 128);
        assert!(config.display.hide_cursor);
        assert!(config.display.monitor.is_none());
    }

    #[test]
    fn partial_json_overrides_merge_with_defaults() {
        let json = r#"{ "timing": { "refresh_rate_hz": 120.0 } }"#;
        let config: Config = serde_json::from_str(json).expect("valid config");
        assert_eq!(config.timing.refresh_rate_hz, 120.0);
        // Untouched fields keep their defaults.
        assert_eq!(config.timing.present_timeout_intervals, 2);
        assert_eq!(config.display.warmup_frames, 32);
    }
}
