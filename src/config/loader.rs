//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CaredeskConfig;
use super::secret_string;
use crate::domain::errors::CaredeskError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`CaredeskConfig`]
/// 4. Applies environment variable overrides (`CAREDESK_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`CaredeskError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use caredesk::config::load_config;
///
/// let config = load_config("caredesk.toml").expect("Failed to load config");
/// println!("Database: {}", config.database.path);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CaredeskConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CaredeskError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CaredeskError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from TOML text, applying the same steps as [`load_config`]
pub fn load_config_from_str(contents: &str) -> Result<CaredeskConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CaredeskConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CaredeskError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    tracing::debug!(
        database = %config.database.path,
        history_size = config.search.history_size,
        "Configuration loaded"
    );

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CaredeskError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CaredeskError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `CAREDESK_*` prefix
///
/// Variables follow the pattern `CAREDESK_<SECTION>_<KEY>`, for example
/// `CAREDESK_DATABASE_PATH`. Unparseable numeric values are ignored.
fn apply_env_overrides(config: &mut CaredeskConfig) {
    if let Ok(val) = std::env::var("CAREDESK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("CAREDESK_DATABASE_PATH") {
        config.database.path = val;
    }

    if let Ok(val) = std::env::var("CAREDESK_SECURITY_PBKDF2_ITERATIONS") {
        if let Ok(iterations) = val.parse() {
            config.security.pbkdf2_iterations = iterations;
        }
    }
    if let Ok(val) = std::env::var("CAREDESK_SECURITY_BOOTSTRAP_ENABLED") {
        config.security.bootstrap.enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("CAREDESK_SECURITY_BOOTSTRAP_USERNAME") {
        config.security.bootstrap.username = val;
    }
    if let Ok(val) = std::env::var("CAREDESK_SECURITY_BOOTSTRAP_PASSWORD") {
        config.security.bootstrap.password = secret_string(val);
    }

    if let Ok(val) = std::env::var("CAREDESK_RECOMMENDATIONS_PATH") {
        config.recommendations.path = Some(val);
    }

    if let Ok(val) = std::env::var("CAREDESK_SEARCH_HISTORY_SIZE") {
        if let Ok(size) = val.parse() {
            config.search.history_size = size;
        }
    }

    if let Ok(val) = std::env::var("CAREDESK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CAREDESK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
