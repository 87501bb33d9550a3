//! Database operations for prompts and journal entries.
//!
//! This module provides SQLite database operations for the entry store. It
//! uses connection pooling via r2d2; every write commits before returning, so
//! a later read on any pooled connection observes it.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `entries`: Entry CRUD and queries
//! - `prompts`: Prompt CRUD, catalog merge and the delete hook
//!
//! # Example
//!
//! ```no_run
//! use daybook::db::Database;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/daybook.db"))?;
//! db.initialize_schema()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod entries;
pub mod prompts;
pub mod schema;

use crate::errors::{AppResult, DatabaseError};
use chrono::{DateTime, SecondsFormat, Utc};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database handle with connection pooling.
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates the SQLite entry store.
    ///
    /// If the database file doesn't exist, it will be created.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database file cannot be opened
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(4)
            .connection_customizer(Box::new(ConnectionPragmas))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        let conn = pool.get().map_err(DatabaseError::Pool)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .map_err(DatabaseError::Sqlite)?;
        drop(conn);

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema.
    ///
    /// Creates all necessary tables and indexes if they don't exist.
    /// This is idempotent and safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }
}

/// Connection customizer applied to every pooled connection.
#[derive(Debug)]
struct ConnectionPragmas;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        // Foreign keys are per-connection in SQLite
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(())
    }

    fn on_release(&self, _conn: Connection) {}
}

/// Formats a timestamp for storage.
pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses a stored timestamp from column `idx`.
pub(crate) fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Parses a stored UUID from column `idx`.
pub(crate) fn parse_uuid(idx: usize, value: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
