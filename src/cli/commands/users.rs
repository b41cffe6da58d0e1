//! User management commands

use super::{load_settings, PASSWORD_ENV};
use crate::config::secret_string;
use crate::core::session::Session;
use crate::domain::{CaredeskError, Role};
use clap::Args;

/// Arguments for the add-user command
#[derive(Args, Debug)]
pub struct AddUserArgs {
    /// Username for the new account
    pub username: String,

    /// Role: doctor, nurse, receptionist or admin
    #[arg(short, long, default_value = "nurse")]
    pub role: Role,
}

impl AddUserArgs {
    /// Register the account with the password from `CAREDESK_PASSWORD`
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_settings(config_path)?;
        let session = Session::open(&config)?;

        let password = std::env::var(PASSWORD_ENV).map_err(|_| {
            CaredeskError::Validation(format!("{PASSWORD_ENV} must hold the new password"))
        })?;
        session
            .credentials()
            .register(&self.username, &secret_string(password), self.role)?;

        println!("Created {} account: {}", self.role, self.username);
        Ok(0)
    }
}
