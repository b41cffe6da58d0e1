//! Validate config command implementation
//!
//! Loads the configuration file and the recommendation table it names, and
//! prints a summary.

use crate::config::load_config;
use crate::core::recommendations::RecommendationTable;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("  Error: {e}");
                return Ok(2);
            }
        };

        let table = match RecommendationTable::from_config(&config.recommendations) {
            Ok(t) => t,
            Err(e) => {
                println!("Recommendation table could not be loaded");
                println!("  Error: {e}");
                return Ok(2);
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Database: {}", config.database.path);
        println!(
            "  PBKDF2 Iterations: {}",
            config.security.pbkdf2_iterations
        );
        println!(
            "  Bootstrap Account: {}",
            if config.security.bootstrap.enabled {
                config.security.bootstrap.username.as_str()
            } else {
                "disabled"
            }
        );
        println!(
            "  Recommendations: {} ({} conditions)",
            config
                .recommendations
                .path
                .as_deref()
                .unwrap_or("built-in"),
            table.len()
        );
        println!("  Search History: {}", config.search.history_size);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                config.logging.local_path.as_str()
            } else {
                "disabled"
            }
        );
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[database]\npath = \":memory:\"\n").unwrap();
        file.flush().unwrap();

        let code = ValidateArgs {}
            .execute(&file.path().to_string_lossy())
            .unwrap();
        assert_eq!(code, 0);
    }

    #[test]
    fn test_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[security]\npbkdf2_iterations = 1\n").unwrap();
        file.flush().unwrap();

        let code = ValidateArgs {}
            .execute(&file.path().to_string_lossy())
            .unwrap();
        assert_eq!(code, 2);
    }

    #[test]
    fn test_missing_file() {
        let code = ValidateArgs {}.execute("does-not-exist.toml").unwrap();
        assert_eq!(code, 2);
    }
}
