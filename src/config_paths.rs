//! Where scope-tree keeps its files
//!
//! One per-user directory holds `config.yaml` and a `logs/` directory for
//! the daily rolling log. A `log_file` set in the config replaces the daily
//! log with a single file, see [`LogTarget`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::OutlineConfig;

const APP_DIR: &str = "scope-tree";

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Daily logs are named `scope-tree.log.YYYY-MM-DD`
pub const LOG_FILE_PREFIX: &str = "scope-tree.log";

/// `$XDG_CONFIG_HOME/scope-tree` (or `~/.config/scope-tree`), and the
/// roaming app data directory on Windows
pub fn config_dir() -> Option<PathBuf> {
    user_config_root().map(|root| root.join(APP_DIR))
}

#[cfg(target_os = "windows")]
fn user_config_root() -> Option<PathBuf> {
    dirs::config_dir()
}

// XDG layout on macOS too, rather than ~/Library/Application Support
#[cfg(not(target_os = "windows"))]
fn user_config_root() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// Destination of the file log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// The config's `log_file`, emptied first when `truncate` is set
    File { path: PathBuf, truncate: bool },
    /// Files named after [`LOG_FILE_PREFIX`] in `dir`, one per day
    Daily { dir: PathBuf },
}

impl LogTarget {
    /// Target for `config`, `None` when there is neither a `log_file` nor a
    /// config directory to hold the daily log
    pub fn for_config(config: &OutlineConfig) -> Option<Self> {
        match &config.log_file {
            Some(path) => Some(LogTarget::File {
                path: path.clone(),
                truncate: config.reset_log,
            }),
            None => logs_dir().map(|dir| LogTarget::Daily { dir }),
        }
    }

    /// Directory the target writes into, if it names one
    pub fn dir(&self) -> Option<&Path> {
        match self {
            LogTarget::File { path, .. } => path.parent().filter(|p| !p.as_os_str().is_empty()),
            LogTarget::Daily { dir } => Some(dir.as_path()),
        }
    }

    /// Create the target's directory
    pub fn prepare(&self) -> Result<(), String> {
        let Some(dir) = self.dir() else {
            return Ok(());
        };
        fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create log directory {}: {}", dir.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_log_file_wins() {
        let config = OutlineConfig {
            log_file: Some(PathBuf::from("/var/tmp/outline/run.log")),
            reset_log: true,
            ..OutlineConfig::default()
        };
        let target = LogTarget::for_config(&config).unwrap();
        assert_eq!(
            target,
            LogTarget::File {
                path: PathBuf::from("/var/tmp/outline/run.log"),
                truncate: true,
            }
        );
        assert_eq!(target.dir(), Some(Path::new("/var/tmp/outline")));
    }

    #[test]
    fn test_bare_log_file_name_needs_no_directory() {
        let target = LogTarget::File {
            path: PathBuf::from("run.log"),
            truncate: false,
        };
        assert_eq!(target.dir(), None);
        assert!(target.prepare().is_ok());
    }

    #[test]
    fn test_default_target_is_daily_log_in_logs_dir() {
        if let Some(logs) = logs_dir() {
            let target = LogTarget::for_config(&OutlineConfig::default()).unwrap();
            assert_eq!(target, LogTarget::Daily { dir: logs });
        }
    }

    #[test]
    fn test_prepare_creates_nested_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("a").join("b");
        let target = LogTarget::File {
            path: dir.join("run.log"),
            truncate: false,
        };
        target.prepare().unwrap();
        assert!(dir.is_dir());
    }
}
