//! Credential store: account registration, login verification and the
//! bootstrap account

use super::hasher::PasswordHasher;
use crate::adapters::database::UserStorage;
use crate::config::{BootstrapConfig, SecretString};
use crate::domain::{CaredeskError, Result, Role, User, Username};
use chrono::Utc;
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Registers caretakers and verifies their passwords
pub struct CredentialStore {
    storage: Arc<dyn UserStorage + Send + Sync>,
    hasher: PasswordHasher,
}

impl CredentialStore {
    pub fn new(storage: Arc<dyn UserStorage + Send + Sync>, hasher: PasswordHasher) -> Self {
        Self { storage, hasher }
    }

    /// Create an account
    ///
    /// # Errors
    ///
    /// - [`CaredeskError::Validation`] for a blank username or empty password
    /// - [`CaredeskError::DuplicateUser`] if the username is taken
    pub fn register(&self, username: &str, password: &SecretString, role: Role) -> Result<()> {
        let username = Username::new(username)?;
        if password.expose_secret().is_empty() {
            return Err(CaredeskError::Validation(
                "Password cannot be empty".to_string(),
            ));
        }

        let user = User {
            secret_hash: self.hasher.hash(password),
            username,
            role,
            created_at: Utc::now(),
        };
        self.storage.insert_user(&user)?;

        tracing::info!(username = %user.username, role = %role, "User registered");
        Ok(())
    }

    /// Check a login attempt
    ///
    /// Returns the account's role on success. An unknown username and a wrong
    /// password both yield `Ok(None)` after the same amount of hashing work.
    /// A successful check re-hashes the password if it was stored under a
    /// different iteration count.
    ///
    /// # Errors
    ///
    /// Only storage failures are reported as errors.
    pub fn verify(&self, username: &str, password: &SecretString) -> Result<Option<Role>> {
        let user = match Username::new(username) {
            Ok(name) => self.storage.find_user(&name)?,
            Err(_) => None,
        };

        let Some(user) = user else {
            self.hasher.verify_dummy(password);
            tracing::debug!("Login rejected");
            return Ok(None);
        };

        if self.hasher.verify(password, &user.secret_hash)? {
            tracing::debug!(username = %user.username, "Login verified");
            if self.hasher.needs_rehash(&user.secret_hash) {
                let rehashed = self.hasher.hash(password);
                self.storage.update_secret_hash(&user.username, &rehashed)?;
                tracing::info!(
                    username = %user.username,
                    iterations = self.hasher.iterations(),
                    "Password hash upgraded to configured iteration count"
                );
            }
            Ok(Some(user.role))
        } else {
            tracing::debug!("Login rejected");
            Ok(None)
        }
    }

    /// Create the bootstrap account if no accounts exist yet
    ///
    /// Returns `true` when the account was created. The bootstrap password is
    /// a published default; a warning is logged every time it is used to seed
    /// a database.
    pub fn ensure_bootstrap_account(&self, config: &BootstrapConfig) -> Result<bool> {
        if !config.enabled || self.storage.count_users()? > 0 {
            return Ok(false);
        }

        let role = config.role.parse::<Role>()?;
        self.register(&config.username, &config.password, role)?;

        tracing::warn!(
            username = %config.username,
            role = %role,
            "Created bootstrap account with the configured default password; change it before storing real patient data"
        );
        Ok(true)
    }

    /// Number of registered accounts
    pub fn user_count(&self) -> Result<u64> {
        self.storage.count_users()
    }
}
