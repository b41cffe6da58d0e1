//! Credential verification
//!
//! Accounts are stored with salted PBKDF2 hashes only; plaintext passwords
//! arrive as [`crate::config::SecretString`] and are never persisted or logged.

pub mod hasher;
pub mod store;

pub use hasher::PasswordHasher;
pub use store::CredentialStore;
