//! Standard paths used by studydeck

use std::path::{Path, PathBuf};

/// Standard studydeck paths
pub struct Paths {
    /// Data directory (~/.local/share/studydeck)
    pub data: PathBuf,
    /// Config directory (~/.config/studydeck)
    pub config: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}

impl Paths {
    pub fn new() -> Self {
        let data = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("studydeck");

        let config = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("studydeck");

        Self { data, config }
    }

    /// Paths under an arbitrary root instead of the user's home
    pub fn rooted(root: &Path) -> Self {
        Self {
            data: root.join("data"),
            config: root.join("config"),
        }
    }

    /// Main configuration file
    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.json")
    }

    /// Optional subject list
    pub fn subjects_file(&self) -> PathBuf {
        self.config.join("subjects.json")
    }

    /// Default log file. The TUI owns the terminal, so logs go here.
    pub fn log_file(&self) -> PathBuf {
        self.data.join("studydeck.log")
    }
}
