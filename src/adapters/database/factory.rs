//! Storage factory
//!
//! Opens the configured database once and hands out the same connection
//! behind both storage traits.

use crate::adapters::database::traits::{PatientStorage, UserStorage};
use crate::adapters::sqlite::SqliteStorage;
use crate::config::DatabaseConfig;
use crate::domain::Result;
use std::path::Path;
use std::sync::Arc;

/// Open the configured database and return user and patient storage over it
///
/// # Errors
///
/// Returns [`crate::domain::CaredeskError::Database`] if the database cannot
/// be opened or migrated.
pub fn create_storage(
    config: &DatabaseConfig,
) -> Result<(
    Arc<dyn UserStorage + Send + Sync>,
    Arc<dyn PatientStorage + Send + Sync>,
)> {
    let storage = if config.is_in_memory() {
        tracing::info!("Opening in-memory database");
        SqliteStorage::open_in_memory()?
    } else {
        tracing::info!(path = %config.path, "Opening database");
        SqliteStorage::open(Path::new(&config.path))?
    };

    let storage = Arc::new(storage);
    Ok((
        storage.clone() as Arc<dyn UserStorage + Send + Sync>,
        storage as Arc<dyn PatientStorage + Send + Sync>,
    ))
}
