//! Domain error types
//!
//! This module defines the error hierarchy for Caredesk. Every failure the core
//! can report is recoverable: the caller may prompt and retry. Errors carry
//! plain strings and never expose third-party types.

use thiserror::Error;

/// Main Caredesk error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum CaredeskError {
    /// A required field is missing or empty; nothing was persisted
    #[error("Validation error: {0}")]
    Validation(String),

    /// Registration attempted with a username that already exists
    #[error("User already exists: {0}")]
    DuplicateUser(String),

    /// An update or lookup targeted a record that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A patient operation was attempted without an authenticated session
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A field could not be parsed into its typed value
    #[error("Malformed input for field '{field}': {value:?}")]
    MalformedInput { field: String, value: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Storage errors
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl CaredeskError {
    /// Builds a [`CaredeskError::MalformedInput`] for a named field
    pub fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        CaredeskError::MalformedInput {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Exit code used by the command-line front end for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CaredeskError::Configuration(_) => 2,
            CaredeskError::Unauthorized(_) => 3,
            CaredeskError::Validation(_)
            | CaredeskError::DuplicateUser(_)
            | CaredeskError::NotFound(_)
            | CaredeskError::MalformedInput { .. } => 4,
            CaredeskError::Database(_)
            | CaredeskError::Serialization(_)
            | CaredeskError::Io(_) => 5,
        }
    }
}

impl From<rusqlite::Error> for CaredeskError {
    fn from(err: rusqlite::Error) -> Self {
        CaredeskError::Database(err.to_string())
    }
}

impl From<std::io::Error> for CaredeskError {
    fn from(err: std::io::Error) -> Self {
        CaredeskError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CaredeskError {
    fn from(err: serde_json::Error) -> Self {
        CaredeskError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CaredeskError {
    fn from(err: toml::de::Error) -> Self {
        CaredeskError::Configuration(format!("TOML parse error: {err}"))
    }
}
