//! Integration tests for logging initialization
//!
//! The global subscriber can only be installed once per process, so the whole
//! lifecycle is exercised in a single test.

use caredesk::config::LoggingConfig;
use caredesk::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_file_logging_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().into_owned(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).unwrap();
    assert!(log_path.is_dir());

    // init_logging reports itself through the caredesk target
    drop(guard);

    let written = std::fs::read_to_string(log_path.join("caredesk.log")).unwrap();
    assert!(written.contains("Logging initialized"));

    assert!(init_logging("info", &LoggingConfig::default()).is_err());
}
