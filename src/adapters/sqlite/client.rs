//! SQLite connection handling and schema migrations

use crate::domain::{CaredeskError, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Ordered schema migrations; each runs once, tracked in `schema_version`
const MIGRATIONS: &[(i64, &str)] = &[(
    1,
    include_str!("../../../resources/migrations/001_initial.sql"),
)];

/// SQLite-backed implementation of the storage traits
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open (or create) a database file and run pending migrations
    ///
    /// # Errors
    ///
    /// Returns [`CaredeskError::Database`] if the file cannot be opened or a
    /// migration fails.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a throwaway in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Lock the connection for one operation
    pub(super) fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CaredeskError::Database("storage lock poisoned".to_string()))
    }

    /// Current schema version (0 before the first migration)
    pub fn schema_version(&self) -> Result<i64> {
        let conn = self.conn()?;
        current_version(&conn)
    }
}

fn run_migrations(conn: &Connection) -> Result<()> {
    apply_migrations(conn, MIGRATIONS)
}

/// Apply each pending migration in its own transaction
fn apply_migrations(conn: &Connection, migrations: &[(i64, &str)]) -> Result<()> {
    let current = current_version(conn)?;

    for (version, sql) in migrations {
        if *version > current {
            tracing::info!(version, "Running migration");
            let tx = conn.unchecked_transaction()?;
            tx.execute_batch(sql).map_err(|e| {
                CaredeskError::Database(format!("Migration v{version} failed: {e}"))
            })?;
            tx.commit()?;
        }
    }

    Ok(())
}

fn current_version(conn: &Connection) -> Result<i64> {
    let tracked: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !tracked {
        return Ok(0);
    }

    let version: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}
