//! Secret handling for caretaker passwords
//!
//! Plaintext passwords (login attempts, registrations, the bootstrap account
//! password in the config file) travel through the crate as [`SecretString`].
//! The inner buffer is zeroed on drop, `Debug` prints a redaction marker, and
//! reading the value requires an explicit `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use caredesk::config::secret_string;
//! use secrecy::ExposeSecret;
//!
//! let password = secret_string("password123");
//! assert_eq!(password.expose_secret().as_ref(), "password123");
//! assert!(!format!("{password:?}").contains("password123"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, Secret};
use serde::{Deserialize, Deserializer};
use zeroize::Zeroize;

/// Plaintext secret bytes, zeroed on drop
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}

impl SecretValue {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// A plaintext password wrapped so it cannot leak through logs
pub type SecretString = Secret<SecretValue>;

/// Wraps a plaintext value as a [`SecretString`]
#[inline]
pub fn secret_string(value: impl Into<String>) -> SecretString {
    Secret::new(SecretValue::from(value.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("test-password");
        assert_eq!(secret.expose_secret().as_ref(), "test-password");
        assert_eq!(secret.expose_secret().as_bytes(), b"test-password");
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-data");
        let debug_output = format!("{secret:?}");
        assert!(!debug_output.contains("sensitive-data"));
        assert!(debug_output.contains("REDACTED"));
    }

    #[test]
    fn test_secret_deserialize() {
        #[derive(Deserialize)]
        struct Section {
            password: SecretString,
        }

        let section: Section = toml::from_str(r#"password = "hunter2""#).unwrap();
        assert_eq!(section.password.expose_secret().as_ref(), "hunter2");
    }
}
