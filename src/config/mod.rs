//! Configuration management for Caredesk.
//!
//! Caredesk reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CAREDESK_<SECTION>_<KEY>` environment overrides
//! - Defaults for every setting
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [database]
//! path = "caredesk.db"
//!
//! [security]
//! pbkdf2_iterations = 600000
//!
//! [security.bootstrap]
//! enabled = true
//! username = "doctor1"
//! password = "${CAREDESK_BOOTSTRAP_PASSWORD}"
//! role = "doctor"
//!
//! [recommendations]
//! # path = "recommendations.toml"
//!
//! [search]
//! history_size = 5
//!
//! [logging]
//! local_enabled = false
//! local_path = "logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_from_str};
pub use schema::{
    ApplicationConfig, BootstrapConfig, CaredeskConfig, DatabaseConfig, LoggingConfig,
    RecommendationsConfig, SearchConfig, SecurityConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
