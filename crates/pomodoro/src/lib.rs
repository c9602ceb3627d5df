//! pomodoro - countdown engine and study data for studydeck
//!
//! - `engine`: the focus/break state machine, driven one tick per second
//! - `settings`: durations and the bounded adjustments the settings dialog makes
//! - `subject`: read-only study subjects
//! - `ledger`: focused time per day for the current run
//!
//! Nothing here touches a clock or a terminal; callers pass settings and
//! dates in explicitly.

pub mod engine;
pub mod ledger;
pub mod settings;
pub mod subject;

pub use engine::{Phase, PomodoroEngine, TickOutcome, TimerState, Transition};
pub use ledger::StudyLedger;
pub use settings::{PomodoroSettings, SettingField, SettingsError, SettingsStore};
pub use subject::{Subject, SubjectCatalog, SubjectError};
