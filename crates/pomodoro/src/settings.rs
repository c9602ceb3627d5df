//! Pomodoro settings
//!
//! Durations are whole minutes. The engine only ever sees positive values:
//! zero is treated as a configuration error and clamped to one minute.

use serde::{Deserialize, Serialize};
use std::fmt;
use studydeck_core::TimerConfig;
use thiserror::Error;
use tracing::{debug, warn};

/// Minutes added or removed by one press of the dialog's +/- controls
pub const ADJUST_STEP: u32 = 5;

/// Floor for dialog adjustments
pub const MIN_ADJUSTED_MINUTES: u32 = 5;

/// Floor for misconfigured durations
pub const MIN_DURATION_MINUTES: u32 = 1;

/// A duration the user can change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingField {
    Focus,
    ShortBreak,
    LongBreak,
}

impl SettingField {
    pub const ALL: [SettingField; 3] = [
        SettingField::Focus,
        SettingField::ShortBreak,
        SettingField::LongBreak,
    ];

    /// Label used by the settings dialog
    pub fn label(&self) -> &'static str {
        match self {
            SettingField::Focus => "Pomodoro Length",
            SettingField::ShortBreak => "Short Break Length",
            SettingField::LongBreak => "Long Break Length",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingField::Focus => "focus",
            SettingField::ShortBreak => "short_break",
            SettingField::LongBreak => "long_break",
        }
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{field} duration must be at least 1 minute")]
    NonPositiveDuration { field: SettingField },
}

/// User-configurable timer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    pub use_pomodoro_mode: bool,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self::from_config(&TimerConfig::default())
    }
}

impl PomodoroSettings {
    pub fn from_config(config: &TimerConfig) -> Self {
        Self {
            focus_minutes: config.focus_minutes,
            short_break_minutes: config.short_break_minutes,
            long_break_minutes: config.long_break_minutes,
            use_pomodoro_mode: config.use_pomodoro_mode,
        }
    }

    pub fn minutes(&self, field: SettingField) -> u32 {
        match field {
            SettingField::Focus => self.focus_minutes,
            SettingField::ShortBreak => self.short_break_minutes,
            SettingField::LongBreak => self.long_break_minutes,
        }
    }

    fn minutes_mut(&mut self, field: SettingField) -> &mut u32 {
        match field {
            SettingField::Focus => &mut self.focus_minutes,
            SettingField::ShortBreak => &mut self.short_break_minutes,
            SettingField::LongBreak => &mut self.long_break_minutes,
        }
    }

    /// Report the first duration that is not positive
    pub fn validate(&self) -> Result<(), SettingsError> {
        match SettingField::ALL
            .into_iter()
            .find(|field| self.minutes(*field) < MIN_DURATION_MINUTES)
        {
            Some(field) => Err(SettingsError::NonPositiveDuration { field }),
            None => Ok(()),
        }
    }

    /// Copy with every non-positive duration raised to one minute
    pub fn sanitized(mut self) -> Self {
        for field in SettingField::ALL {
            let minutes = self.minutes_mut(field);
            if *minutes < MIN_DURATION_MINUTES {
                warn!(%field, "Non-positive duration configured, using {} minute", MIN_DURATION_MINUTES);
                *minutes = MIN_DURATION_MINUTES;
            }
        }
        self
    }

    /// Length of `field` in seconds, never zero. Saturates at `u32::MAX`.
    pub fn seconds(&self, field: SettingField) -> u32 {
        self.minutes(field).max(MIN_DURATION_MINUTES).saturating_mul(60)
    }
}

/// Mutable settings with the adjustment policy of the settings dialog
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: PomodoroSettings,
}

impl SettingsStore {
    pub fn new(settings: PomodoroSettings) -> Self {
        Self {
            settings: settings.sanitized(),
        }
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    /// Add one step; there is no upper bound
    pub fn increment(&mut self, field: SettingField) -> u32 {
        let minutes = self.settings.minutes_mut(field);
        *minutes = minutes.saturating_add(ADJUST_STEP);
        debug!(%field, minutes = *minutes, "Setting increased");
        *minutes
    }

    /// Remove one step, stopping at the floor. A value already below the
    /// floor is left alone rather than raised.
    pub fn decrement(&mut self, field: SettingField) -> u32 {
        let minutes = self.settings.minutes_mut(field);
        let lowered = minutes.saturating_sub(ADJUST_STEP).max(MIN_ADJUSTED_MINUTES);
        *minutes = lowered.min(*minutes);
        debug!(%field, minutes = *minutes, "Setting decreased");
        *minutes
    }

    pub fn toggle_mode(&mut self) -> bool {
        self.settings.use_pomodoro_mode = !self.settings.use_pomodoro_mode;
        debug!(enabled = self.settings.use_pomodoro_mode, "Pomodoro mode toggled");
        self.settings.use_pomodoro_mode
    }
}
