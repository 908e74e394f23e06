//! File logging through the global subscriber
//!
//! `tracing::init` installs the global subscriber, which can happen once per
//! process, so this binary holds a single test.

use scope_tree::config::OutlineConfig;
use scope_tree::span::Span;
use scope_tree::ScopeTree;

#[test]
fn test_file_log_holds_every_line_after_guard_drops() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, "indent_width: [oops\n").unwrap();
    let log_path = dir.path().join("logs").join("run.log");

    // Same order as the binary: load, start logging, then report the load
    let config_error = OutlineConfig::load_or_default(&config_path).unwrap_err();
    let config = OutlineConfig {
        log_file: Some(log_path.clone()),
        reset_log: true,
        ..OutlineConfig::default()
    };
    let guard = scope_tree::tracing::init(&config);
    assert!(guard.is_some());

    tracing::warn!("{}; using defaults", config_error);
    let mut tree = ScopeTree::new(20);
    tree.insert(Span::new(0, 10), "main").unwrap();
    tree.render();
    tracing::info!("Parsed {} scope(s)", tree.size());
    drop(guard);

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Failed to parse config"), "log was: {}", log);
    assert!(log.contains("Rendered 1 scope(s)"), "log was: {}", log);
    assert!(log.contains("Parsed 1 scope(s)"), "log was: {}", log);
}
