//! Init command implementation
//!
//! Writes a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "caredesk.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("Use --force to overwrite");
            return Ok(2);
        }

        let content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        if let Err(e) = fs::write(&self.output, content) {
            println!("Failed to write configuration file: {e}");
            return Ok(5);
        }

        println!("Configuration file created: {}", self.output);
        println!();
        println!("Next steps:");
        println!("  1. Edit {} with your settings", self.output);
        println!("  2. Set CAREDESK_BOOTSTRAP_PASSWORD before the first run");
        println!("  3. Validate configuration: caredesk validate-config");
        println!("  4. Log in: CAREDESK_PASSWORD=... caredesk list -u doctor1");
        Ok(0)
    }

    fn generate_minimal_config() -> String {
        r#"# Caredesk Configuration File

[application]
log_level = "info"

[database]
path = "caredesk.db"

[security]
pbkdf2_iterations = 600000

[security.bootstrap]
enabled = true
username = "doctor1"
password = "${CAREDESK_BOOTSTRAP_PASSWORD}"
role = "doctor"

[search]
history_size = 5

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    fn generate_config_with_examples() -> String {
        r#"# Caredesk Configuration File
#
# Values of the form ${VAR} are replaced from the environment when the file
# is loaded. Any key can also be overridden with CAREDESK_<SECTION>_<KEY>,
# e.g. CAREDESK_DATABASE_PATH.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[database]
# SQLite database file; ":memory:" keeps everything in memory
path = "caredesk.db"

[security]
# PBKDF2-HMAC-SHA256 rounds for new password hashes (minimum 1000)
pbkdf2_iterations = 600000

# Account created when the database has no users yet.
# The default password is public knowledge: override it here or through
# CAREDESK_SECURITY_BOOTSTRAP_PASSWORD and change it after first login.
[security.bootstrap]
enabled = true
username = "doctor1"
password = "${CAREDESK_BOOTSTRAP_PASSWORD}"
role = "doctor"  # doctor | nurse | receptionist | admin

[recommendations]
# Optional TOML file replacing the built-in condition guidance table.
# Each condition is a section with medications, treatments and diet lists:
#
#   [Diabetes]
#   medications = ["Metformin", "Insulin if needed"]
#   treatments = ["Blood sugar monitoring", "Exercise", "Regular check-ups"]
#   diet = ["Low-carb, high-protein diet", "Avoid sugary foods and drinks"]
#
# path = "recommendations.toml"

[search]
# Number of recent search terms kept per session
history_size = 5

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "logs"

# Rotation: daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
