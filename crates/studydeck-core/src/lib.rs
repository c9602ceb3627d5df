//! studydeck core - shared functionality for the studydeck crates
//!
//! A terminal study tracker: subjects, a date strip and a Pomodoro timer.

pub mod config;
pub mod format;
pub mod logging;
pub mod paths;

pub use config::{Config, TimerConfig};
pub use paths::Paths;
