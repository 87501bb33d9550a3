//! Entry CRUD operations.
//!
//! This module provides functions for creating, reading, updating, and querying
//! journal entries in the database. Entries are returned with their prompt
//! attached when one is linked.

use crate::db::prompts::prompt_from_row;
use crate::db::{format_timestamp, parse_timestamp, parse_uuid};
use crate::errors::{AppResult, DatabaseError};
use crate::models::{JournalEntry, Mood};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;
use uuid::Uuid;

const SELECT_ENTRY: &str = r#"
    SELECT e.id, e.content, e.created_at, e.updated_at, e.mood,
           p.id, p.text, p.category, p.scheduled_date, p.last_used_at
    FROM entries e
    LEFT JOIN prompts p ON p.id = e.prompt_id
"#;

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<JournalEntry> {
    let prompt = match row.get::<_, Option<String>>(5)? {
        Some(_) => Some(prompt_from_row(row, 5)?),
        None => None,
    };

    Ok(JournalEntry {
        id: parse_uuid(0, &row.get::<_, String>(0)?)?,
        content: row.get(1)?,
        created_at: parse_timestamp(2, &row.get::<_, String>(2)?)?,
        updated_at: parse_timestamp(3, &row.get::<_, String>(3)?)?,
        // Unknown stored moods read back as no mood
        mood: row
            .get::<_, Option<String>>(4)?
            .and_then(|raw| raw.parse::<Mood>().ok()),
        prompt,
    })
}

fn query_entries(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> AppResult<Vec<JournalEntry>> {
    let mut stmt = conn.prepare(sql).map_err(DatabaseError::Sqlite)?;
    let entries = stmt
        .query_map(params, entry_from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;
    Ok(entries)
}

/// Inserts a new entry.
///
/// # Errors
///
/// Returns an error if the database operation fails, including when the
/// linked prompt does not exist.
pub fn insert_entry(conn: &Connection, entry: &JournalEntry) -> AppResult<()> {
    debug!("Inserting entry {} created at {}", entry.id, entry.created_at);

    conn.execute(
        r#"
        INSERT INTO entries (id, content, created_at, updated_at, mood, prompt_id)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            entry.id.to_string(),
            entry.content,
            format_timestamp(&entry.created_at),
            format_timestamp(&entry.updated_at),
            entry.mood.map(|mood| mood.as_str()),
            entry.prompt.as_ref().map(|prompt| prompt.id.to_string()),
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(())
}

/// Saves new content and mood for an entry and bumps `updated_at`.
///
/// # Errors
///
/// Returns an error if the entry doesn't exist or the database operation fails.
pub fn update_entry(
    conn: &Connection,
    id: Uuid,
    content: &str,
    mood: Option<Mood>,
    updated_at: DateTime<Utc>,
) -> AppResult<()> {
    debug!("Updating entry {}", id);

    let rows_affected = conn
        .execute(
            "UPDATE entries SET content = ?1, mood = ?2, updated_at = ?3 WHERE id = ?4",
            params![
                content,
                mood.map(|mood| mood.as_str()),
                format_timestamp(&updated_at),
                id.to_string()
            ],
        )
        .map_err(DatabaseError::Sqlite)?;

    if rows_affected == 0 {
        return Err(DatabaseError::NotFound(format!("Entry with id {} not found", id)).into());
    }

    Ok(())
}

/// Retrieves an entry by id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if no entry has the given id.
pub fn get_entry(conn: &Connection, id: Uuid) -> AppResult<Option<JournalEntry>> {
    let sql = format!("{} WHERE e.id = ?1", SELECT_ENTRY);
    conn.query_row(&sql, params![id.to_string()], entry_from_row)
        .optional()
        .map_err(|e| DatabaseError::Sqlite(e).into())
}

/// Lists every entry, most recent first.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_entries(conn: &Connection) -> AppResult<Vec<JournalEntry>> {
    let sql = format!("{} ORDER BY e.created_at DESC", SELECT_ENTRY);
    let entries = query_entries(conn, &sql, [])?;
    debug!("Loaded {} entries", entries.len());
    Ok(entries)
}

/// Lists entries created within `[start, end]`, most recent first.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_entries_between(
    conn: &Connection,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<Vec<JournalEntry>> {
    let sql = format!(
        "{} WHERE e.created_at >= ?1 AND e.created_at <= ?2 ORDER BY e.created_at DESC",
        SELECT_ENTRY
    );
    query_entries(
        conn,
        &sql,
        params![format_timestamp(&start), format_timestamp(&end)],
    )
}

/// Counts all entries.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn count_entries(conn: &Connection) -> AppResult<usize> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
        .map_err(DatabaseError::Sqlite)?;
    Ok(count as usize)
}

/// Deletes an entry.
///
/// # Errors
///
/// Returns an error if the entry doesn't exist or the database operation fails.
pub fn delete_entry(conn: &Connection, id: Uuid) -> AppResult<()> {
    debug!("Deleting entry {}", id);

    let rows_affected = conn
        .execute("DELETE FROM entries WHERE id = ?1", params![id.to_string()])
        .map_err(DatabaseError::Sqlite)?;

    if rows_affected == 0 {
        return Err(DatabaseError::NotFound(format!("Entry with id {} not found", id)).into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::prompts::insert_prompt;
    use crate::models::{Prompt, PromptCategory};
    use chrono::{Duration, TimeZone};
    use rusqlite::Connection;

    fn setup_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::schema::create_tables(&conn).unwrap();
        conn
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_insert_and_get_entry() {
        let conn = setup_test_db();
        let prompt = Prompt::new("Who inspired you?", PromptCategory::Relationships);
        insert_prompt(&conn, &prompt).unwrap();

        let mut entry = JournalEntry::new(at(15, 9), Some(prompt.clone()));
        entry.content = "My sister".to_string();
        entry.mood = Some(Mood::Happy);
        insert_entry(&conn, &entry).unwrap();

        let loaded = get_entry(&conn, entry.id).unwrap().unwrap();
        assert_eq!(loaded, entry);
        assert_eq!(loaded.prompt.unwrap().text, "Who inspired you?");
    }

    #[test]
    fn test_get_entry_not_found() {
        let conn = setup_test_db();
        assert!(get_entry(&conn, Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_update_entry() {
        let conn = setup_test_db();
        let entry = JournalEntry::new(at(15, 9), None);
        insert_entry(&conn, &entry).unwrap();

        update_entry(&conn, entry.id, "Quiet day", Some(Mood::Neutral), at(15, 21)).unwrap();

        let loaded = get_entry(&conn, entry.id).unwrap().unwrap();
        assert_eq!(loaded.content, "Quiet day");
        assert_eq!(loaded.mood, Some(Mood::Neutral));
        assert_eq!(loaded.created_at, at(15, 9));
        assert_eq!(loaded.updated_at, at(15, 21));

        update_entry(&conn, entry.id, "Quiet day", None, at(15, 22)).unwrap();
        assert!(get_entry(&conn, entry.id).unwrap().unwrap().mood.is_none());
    }

    #[test]
    fn test_update_entry_not_found() {
        let conn = setup_test_db();
        let result = update_entry(&conn, Uuid::new_v4(), "x", None, at(1, 0));
        assert!(result.is_err());
    }

    #[test]
    fn test_list_entries_most_recent_first() {
        let conn = setup_test_db();
        for day in [3, 10, 7] {
            insert_entry(&conn, &JournalEntry::new(at(day, 8), None)).unwrap();
        }

        let days: Vec<DateTime<Utc>> = list_entries(&conn)
            .unwrap()
            .into_iter()
            .map(|e| e.created_at)
            .collect();
        assert_eq!(days, vec![at(10, 8), at(7, 8), at(3, 8)]);
    }

    #[test]
    fn test_list_entries_between_inclusive() {
        let conn = setup_test_db();
        let start = at(15, 0);
        let end = at(16, 0) - Duration::seconds(1);
        insert_entry(&conn, &JournalEntry::new(start, None)).unwrap();
        insert_entry(&conn, &JournalEntry::new(end, None)).unwrap();
        insert_entry(&conn, &JournalEntry::new(at(16, 0), None)).unwrap();
        insert_entry(&conn, &JournalEntry::new(start - Duration::seconds(1), None)).unwrap();

        let found = list_entries_between(&conn, start, end).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].created_at, end);
        assert_eq!(found[1].created_at, start);
    }

    #[test]
    fn test_unknown_mood_reads_as_none() {
        let conn = setup_test_db();
        let entry = JournalEntry::new(at(15, 9), None);
        insert_entry(&conn, &entry).unwrap();
        conn.execute(
            "UPDATE entries SET mood = 'ecstatic' WHERE id = ?1",
            params![entry.id.to_string()],
        )
        .unwrap();

        assert!(get_entry(&conn, entry.id).unwrap().unwrap().mood.is_none());
    }

    #[test]
    fn test_count_and_delete_entry() {
        let conn = setup_test_db();
        let entry = JournalEntry::new(at(15, 9), None);
        insert_entry(&conn, &entry).unwrap();
        insert_entry(&conn, &JournalEntry::new(at(14, 9), None)).unwrap();
        assert_eq!(count_entries(&conn).unwrap(), 2);

        delete_entry(&conn, entry.id).unwrap();
        assert_eq!(count_entries(&conn).unwrap(), 1);
        assert!(get_entry(&conn, entry.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_entry_not_found() {
        let conn = setup_test_db();
        assert!(delete_entry(&conn, Uuid::new_v4()).is_err());
    }
}
