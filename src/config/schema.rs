//! Configuration schema types
//!
//! This module defines the configuration structure that maps to `caredesk.toml`.

use crate::config::{secret_string, SecretString};
use serde::Deserialize;

/// Lowest PBKDF2 iteration count accepted from configuration
pub const MIN_PBKDF2_ITERATIONS: u32 = 1_000;

/// Main Caredesk configuration
///
/// Every section has defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaredeskConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Patient and user database
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Password hashing and bootstrap account
    #[serde(default)]
    pub security: SecurityConfig,

    /// Recommendation table source
    #[serde(default)]
    pub recommendations: RecommendationsConfig,

    /// Recent-search log
    #[serde(default)]
    pub search: SearchConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CaredeskConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.database.validate()?;
        self.security.validate()?;
        self.search.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Database location
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path, or `:memory:` for a throwaway database
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.trim().is_empty() {
            return Err("database.path cannot be empty".to_string());
        }
        Ok(())
    }

    /// True when the database should live only in memory
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

/// Credential hashing settings
#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// PBKDF2-HMAC-SHA256 iteration count for new password hashes
    #[serde(default = "default_pbkdf2_iterations")]
    pub pbkdf2_iterations: u32,

    /// Default account created when the user table is empty
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            pbkdf2_iterations: default_pbkdf2_iterations(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

impl SecurityConfig {
    fn validate(&self) -> Result<(), String> {
        if self.pbkdf2_iterations < MIN_PBKDF2_ITERATIONS {
            return Err(format!(
                "security.pbkdf2_iterations must be >= {MIN_PBKDF2_ITERATIONS}"
            ));
        }
        self.bootstrap.validate()
    }
}

/// Bootstrap account settings
///
/// **SECURITY WARNING**: the default password is public. The account exists so
/// a fresh install can be logged into; its password must be changed before the
/// database holds real patient data.
#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    /// Create the account when no users exist
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Bootstrap username
    #[serde(default = "default_bootstrap_username")]
    pub username: String,

    /// Bootstrap password
    #[serde(default = "default_bootstrap_password")]
    pub password: SecretString,

    /// Bootstrap role
    #[serde(default = "default_bootstrap_role")]
    pub role: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            username: default_bootstrap_username(),
            password: default_bootstrap_password(),
            role: default_bootstrap_role(),
        }
    }
}

impl BootstrapConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if !self.enabled {
            return Ok(());
        }
        if self.username.trim().is_empty() {
            return Err("security.bootstrap.username cannot be empty".to_string());
        }
        if self.password.expose_secret().is_empty() {
            return Err("security.bootstrap.password cannot be empty".to_string());
        }
        self.role
            .parse::<crate::domain::Role>()
            .map_err(|_| format!("Invalid security.bootstrap.role '{}'", self.role))?;
        Ok(())
    }
}

/// Recommendation table source
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationsConfig {
    /// TOML file replacing the built-in table
    #[serde(default)]
    pub path: Option<String>,
}

/// Recent-search log settings
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Number of recent search terms kept for display
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            history_size: default_history_size(),
        }
    }
}

impl SearchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.history_size == 0 {
            return Err("search.history_size must be > 0".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to rolling files
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_database_path() -> String {
    "caredesk.db".to_string()
}

fn default_pbkdf2_iterations() -> u32 {
    600_000
}

fn default_true() -> bool {
    true
}

fn default_bootstrap_username() -> String {
    "doctor1".to_string()
}

fn default_bootstrap_password() -> SecretString {
    secret_string("password123")
}

fn default_bootstrap_role() -> String {
    "doctor".to_string()
}

fn default_history_size() -> usize {
    5
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_valid() {
        let config: CaredeskConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.path, "caredesk.db");
        assert_eq!(config.search.history_size, 5);
        assert_eq!(config.security.bootstrap.username, "doctor1");
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pbkdf2_iterations_floor() {
        let mut config = SecurityConfig::default();
        config.pbkdf2_iterations = 10;
        assert!(config.validate().is_err());

        config.pbkdf2_iterations = MIN_PBKDF2_ITERATIONS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bootstrap_role_validation() {
        let mut config = BootstrapConfig::default();
        config.role = "janitor".to_string();
        assert!(config.validate().is_err());

        config.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_history_size_validation() {
        let config = SearchConfig { history_size: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_in_memory_database() {
        let config = DatabaseConfig {
            path: ":memory:".to_string(),
        };
        assert!(config.is_in_memory());
        assert!(!DatabaseConfig::default().is_in_memory());
    }
}
