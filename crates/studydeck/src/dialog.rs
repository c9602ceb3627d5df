//! Pomodoro settings dialog
//!
//! The first row toggles pomodoro mode. Duration rows are only shown while
//! the mode is on.

use pomodoro::{PomodoroSettings, SettingField, SettingsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogRow {
    Mode,
    Duration(SettingField),
}

#[derive(Debug, Clone, Default)]
pub struct SettingsDialog {
    cursor: usize,
}

impl SettingsDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(settings: &PomodoroSettings) -> Vec<DialogRow> {
        let mut rows = vec![DialogRow::Mode];
        if settings.use_pomodoro_mode {
            rows.extend(SettingField::ALL.into_iter().map(DialogRow::Duration));
        }
        rows
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self, settings: &PomodoroSettings) -> DialogRow {
        let rows = Self::rows(settings);
        rows[self.cursor.min(rows.len() - 1)]
    }

    pub fn next(&mut self, settings: &PomodoroSettings) {
        let last = Self::rows(settings).len() - 1;
        self.cursor = (self.cursor + 1).min(last);
    }

    pub fn prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// "+" on the current row. On the mode row this toggles the mode.
    pub fn increase(&mut self, store: &mut SettingsStore) {
        match self.current(store.settings()) {
            DialogRow::Mode => self.toggle_mode(store),
            DialogRow::Duration(field) => {
                store.increment(field);
            }
        }
    }

    /// "-" on the current row. On the mode row this toggles the mode.
    pub fn decrease(&mut self, store: &mut SettingsStore) {
        match self.current(store.settings()) {
            DialogRow::Mode => self.toggle_mode(store),
            DialogRow::Duration(field) => {
                store.decrement(field);
            }
        }
    }

    /// Enter/Space: toggles the mode row, ignored elsewhere
    pub fn activate(&mut self, store: &mut SettingsStore) {
        if self.current(store.settings()) == DialogRow::Mode {
            self.toggle_mode(store);
        }
    }

    fn toggle_mode(&mut self, store: &mut SettingsStore) {
        store.toggle_mode();
        let last = Self::rows(store.settings()).len() - 1;
        self.cursor = self.cursor.min(last);
    }
}
