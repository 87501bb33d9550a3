//! Database schema definitions and initialization.
//!
//! This module defines the SQLite schema for prompts and journal entries.
//! Timestamps are stored as UTC RFC 3339 strings with fixed microsecond
//! precision, so lexical order equals chronological order.

use crate::errors::{AppResult, DatabaseError};
use rusqlite::Connection;
use tracing::{debug, info};

/// Current schema version.
///
/// Increment this whenever schema changes are made to support future migrations.
pub const SCHEMA_VERSION: i32 = 1;

/// Creates all database tables and indexes.
///
/// This function is idempotent - it uses `CREATE TABLE IF NOT EXISTS`
/// so it's safe to call multiple times.
///
/// # Tables
///
/// - `prompts`: Reflective questions merged from the catalog
/// - `entries`: Journal entries, optionally referencing a prompt
/// - `schema_version`: Applied schema versions
///
/// # Errors
///
/// Returns an error if any DDL statement fails.
pub fn create_tables(conn: &Connection) -> AppResult<()> {
    debug!("Creating database tables");

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(DatabaseError::Sqlite)?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS prompts (
            id TEXT PRIMARY KEY,
            text TEXT NOT NULL,
            category TEXT NOT NULL,
            scheduled_date DATE,
            last_used_at DATETIME
        );

        CREATE INDEX IF NOT EXISTS idx_prompts_text ON prompts(text);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    // No ON DELETE action: deleting a referenced prompt must go through
    // prompts::delete_prompt, which nullifies entries.prompt_id first.
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id TEXT PRIMARY KEY,
            content TEXT NOT NULL DEFAULT '',
            created_at DATETIME NOT NULL,
            updated_at DATETIME NOT NULL,
            mood TEXT,
            prompt_id TEXT REFERENCES prompts(id)
        );

        CREATE INDEX IF NOT EXISTS idx_entries_created_at ON entries(created_at DESC);
        CREATE INDEX IF NOT EXISTS idx_entries_prompt_id ON entries(prompt_id);
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL,
            applied_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .map_err(DatabaseError::Sqlite)?;

    let current_version = get_schema_version(conn)?;
    if current_version.is_none() {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?)",
            [SCHEMA_VERSION],
        )
        .map_err(DatabaseError::Sqlite)?;
        info!("Initialized database schema version {}", SCHEMA_VERSION);
    } else {
        debug!("Schema version already recorded: {:?}", current_version);
    }

    debug!("Database tables created successfully");
    Ok(())
}

/// Gets the current schema version from the database.
///
/// Returns `None` if the schema_version table doesn't exist or is empty.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than missing table.
pub fn get_schema_version(conn: &Connection) -> AppResult<Option<i32>> {
    let result = conn.query_row(
        "SELECT version FROM schema_version ORDER BY applied_at DESC LIMIT 1",
        [],
        |row| row.get(0),
    );

    match result {
        Ok(version) => Ok(Some(version)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) if e.to_string().contains("no such table") => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_create_tables() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        assert!(table_exists(&conn, "prompts"));
        assert!(table_exists(&conn, "entries"));
        assert!(table_exists(&conn, "schema_version"));
    }

    #[test]
    fn test_create_tables_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), Some(SCHEMA_VERSION));
        let versions: i32 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[test]
    fn test_schema_version_missing_table() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), None);
    }

    #[test]
    fn test_foreign_key_blocks_dangling_prompt() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO entries (id, created_at, updated_at, prompt_id) VALUES (?, ?, ?, ?)",
            ["e1", "2024-01-01T00:00:00.000000Z", "2024-01-01T00:00:00.000000Z", "missing"],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_foreign_key_blocks_deleting_referenced_prompt() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        conn.execute(
            "INSERT INTO prompts (id, text, category) VALUES ('p1', 'What went well?', 'reflection')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO entries (id, created_at, updated_at, prompt_id) VALUES (?, ?, ?, ?)",
            ["e1", "2024-01-01T00:00:00.000000Z", "2024-01-01T00:00:00.000000Z", "p1"],
        )
        .unwrap();

        let result = conn.execute("DELETE FROM prompts WHERE id = 'p1'", []);
        assert!(result.is_err());
    }
}
