//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` so they do not
//! interfere with each other.

use caredesk::config::load_config;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for var in [
        "CAREDESK_APPLICATION_LOG_LEVEL",
        "CAREDESK_DATABASE_PATH",
        "CAREDESK_SECURITY_PBKDF2_ITERATIONS",
        "CAREDESK_SECURITY_BOOTSTRAP_ENABLED",
        "CAREDESK_SECURITY_BOOTSTRAP_PASSWORD",
        "CAREDESK_SEARCH_HISTORY_SIZE",
        "TEST_BOOTSTRAP_PASSWORD",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"

[database]
path = "/var/lib/caredesk/clinic.db"

[security]
pbkdf2_iterations = 310000

[security.bootstrap]
enabled = true
username = "admin"
password = "change-me"
role = "admin"

[recommendations]
path = "guidance.toml"

[search]
history_size = 10

[logging]
local_enabled = true
local_path = "/var/log/caredesk"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.database.path, "/var/lib/caredesk/clinic.db");
    assert_eq!(config.security.pbkdf2_iterations, 310_000);
    assert_eq!(config.security.bootstrap.username, "admin");
    assert_eq!(config.security.bootstrap.role, "admin");
    assert_eq!(
        config.security.bootstrap.password.expose_secret().as_ref(),
        "change-me"
    );
    assert_eq!(config.recommendations.path.as_deref(), Some("guidance.toml"));
    assert_eq!(config.search.history_size, 10);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_empty_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.database.path, "caredesk.db");
    assert_eq!(config.security.pbkdf2_iterations, 600_000);
    assert!(config.security.bootstrap.enabled);
    assert_eq!(config.security.bootstrap.username, "doctor1");
    assert_eq!(config.search.history_size, 5);
    assert!(config.recommendations.path.is_none());
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_BOOTSTRAP_PASSWORD", "from-env");

    let file = write_config(
        r#"
[security.bootstrap]
password = "${TEST_BOOTSTRAP_PASSWORD}"
"#,
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(
        config.security.bootstrap.password.expose_secret().as_ref(),
        "from-env"
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config("[security.bootstrap]\npassword = \"${TEST_BOOTSTRAP_PASSWORD}\"\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_BOOTSTRAP_PASSWORD"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("CAREDESK_DATABASE_PATH", ":memory:");
    std::env::set_var("CAREDESK_SEARCH_HISTORY_SIZE", "7");
    std::env::set_var("CAREDESK_SECURITY_BOOTSTRAP_ENABLED", "false");
    std::env::set_var("CAREDESK_SECURITY_BOOTSTRAP_PASSWORD", "override");

    let file = write_config("[database]\npath = \"file.db\"\n\n[search]\nhistory_size = 3\n");
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.database.path, ":memory:");
    assert!(config.database.is_in_memory());
    assert_eq!(config.search.history_size, 7);
    assert!(!config.security.bootstrap.enabled);
    assert_eq!(
        config.security.bootstrap.password.expose_secret().as_ref(),
        "override"
    );

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for content in [
        "[security]\npbkdf2_iterations = 10\n",
        "[search]\nhistory_size = 0\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[application]\nlog_level = \"loud\"\n",
        "[database]\npath = [1, 2]\n",
    ] {
        let file = write_config(content);
        assert!(load_config(file.path()).is_err(), "{content}");
    }
}
