//! Logging setup
//!
//! Console output goes to stderr so stdout carries only the outline.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable, which overrides the
//! configured `log_level`:
//! - `RUST_LOG=debug` - every inserted scope and render
//! - `RUST_LOG=scope_tree::tree=trace` - re-parenting details
//!
//! # Log Files
//!
//! Logs go to the configured `log_file`, or else to
//! `~/.config/scope-tree/logs/scope-tree.log` with daily rotation.
//! File logging uses debug level.

use std::fs::OpenOptions;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::OutlineConfig;
use crate::config_paths::{LogTarget, LOG_FILE_PREFIX};

/// Initialize tracing subscriber with console and file logging.
///
/// File lines are written on a background thread. Hold the returned guard
/// until exit: dropping it flushes whatever is still buffered.
pub fn init(config: &OutlineConfig) -> Option<WorkerGuard> {
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file = LogTarget::for_config(config)
        .ok_or_else(|| "No config directory available".to_string())
        .and_then(|target| file_writer(&target));
    let (file_layer, guard) = match file {
        Ok((writer, guard)) => (
            Some(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            ),
            Some(guard),
        ),
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    guard
}

/// Non-blocking writer for `target`, creating its directory first
pub fn file_writer(target: &LogTarget) -> Result<(NonBlocking, WorkerGuard), String> {
    target.prepare()?;
    match target {
        LogTarget::File { path, truncate } => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .append(!truncate)
                .truncate(*truncate)
                .open(path)
                .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;
            Ok(tracing_appender::non_blocking(file))
        }
        LogTarget::Daily { dir } => Ok(tracing_appender::non_blocking(
            tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_line(target: &LogTarget, line: &str) {
        let (mut writer, guard) = file_writer(target).unwrap();
        writeln!(writer, "{}", line).unwrap();
        drop(guard);
    }

    #[test]
    fn test_buffered_lines_reach_file_when_guard_drops() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("run.log");
        let target = LogTarget::File {
            path: path.clone(),
            truncate: false,
        };

        write_line(&target, "first run");
        write_line(&target, "second run");

        let log = std::fs::read_to_string(&path).unwrap();
        assert_eq!(log, "first run\nsecond run\n");
    }

    #[test]
    fn test_truncate_starts_a_fresh_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        std::fs::write(&path, "stale\n").unwrap();

        let target = LogTarget::File {
            path: path.clone(),
            truncate: true,
        };
        write_line(&target, "fresh");

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_daily_log_written_under_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("logs");
        write_line(&LogTarget::Daily { dir: logs.clone() }, "rolled");

        let names: Vec<String> = std::fs::read_dir(&logs)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].starts_with(LOG_FILE_PREFIX));
    }
}
