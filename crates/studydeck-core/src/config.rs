//! Configuration management for studydeck
//!
//! Config lives in `~/.config/studydeck/config.json`. Every field has a
//! default, so a missing file or a partial one is fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Timer durations applied when the app starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Focus phase length (minutes)
    pub focus_minutes: u32,
    /// Break after an ordinary focus session (minutes)
    pub short_break_minutes: u32,
    /// Break after every third focus session (minutes)
    pub long_break_minutes: u32,
    /// Cycle between focus and break; when off the timer counts down once
    pub use_pomodoro_mode: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 20,
            use_pomodoro_mode: true,
        }
    }
}

/// Global studydeck configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between countdown ticks
    #[serde(default = "default_tick_interval")]
    pub tick_interval: f64,

    /// Label shown in the dashboard header (the exam or course being studied)
    #[serde(default = "default_label")]
    pub label: String,

    #[serde(default)]
    pub timer: TimerConfig,
}

fn default_tick_interval() -> f64 {
    1.0
}

fn default_label() -> String {
    "UPSC CSE".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: default_tick_interval(),
            label: default_label(),
            timer: TimerConfig::default(),
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }
}
