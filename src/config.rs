//! Outline configuration persistence
//!
//! Stores user preferences in `~/.config/scope-tree/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::tree::DEFAULT_INDENT_WIDTH;

/// Settings that persist across runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineConfig {
    /// Spaces per nesting level in the rendered outline
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    /// Console log filter used when RUST_LOG is not set (e.g. "info", "debug")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Write logs to this file instead of the daily log in the logs directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,

    /// Truncate `log_file` on startup
    #[serde(default)]
    pub reset_log: bool,
}

fn default_indent_width() -> usize {
    DEFAULT_INDENT_WIDTH
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
            log_level: default_log_level(),
            log_file: None,
            reset_log: false,
        }
    }
}

impl OutlineConfig {
    /// Load config from disk.
    ///
    /// A missing file gives the defaults. A file that can't be read or parsed
    /// is an error, returned rather than logged since this runs before
    /// logging is set up.
    pub fn load() -> Result<Self, String> {
        match crate::config_paths::config_file() {
            Some(path) => Self::load_or_default(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from `path`, or the defaults if nothing is there
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config at {}: {}", path.display(), e))?;
        serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse config at {}: {}", path.display(), e))
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating its parent directory
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
