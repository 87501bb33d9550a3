//! Prompt CRUD operations.
//!
//! This module provides functions for storing prompts, merging the bundled
//! catalog, tracking prompt usage, and deleting prompts without losing the
//! entries that reference them.

use crate::catalog::PromptSeed;
use crate::db::{format_timestamp, parse_timestamp, parse_uuid};
use crate::errors::{AppResult, DatabaseError};
use crate::models::{Prompt, PromptCategory};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashSet;
use tracing::{debug, info};
use uuid::Uuid;

const SCHEDULED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds a prompt from five consecutive columns starting at `start`:
/// id, text, category, scheduled_date, last_used_at.
pub(crate) fn prompt_from_row(row: &Row<'_>, start: usize) -> rusqlite::Result<Prompt> {
    let scheduled_date = row
        .get::<_, Option<String>>(start + 3)?
        .map(|value| {
            NaiveDate::parse_from_str(&value, SCHEDULED_DATE_FORMAT).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    start + 3,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })
        })
        .transpose()?;
    let last_used_at = row
        .get::<_, Option<String>>(start + 4)?
        .map(|value| parse_timestamp(start + 4, &value))
        .transpose()?;

    Ok(Prompt {
        id: parse_uuid(start, &row.get::<_, String>(start)?)?,
        text: row.get(start + 1)?,
        category: PromptCategory::from_stored(&row.get::<_, String>(start + 2)?),
        scheduled_date,
        last_used_at,
    })
}

/// Inserts a prompt.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn insert_prompt(conn: &Connection, prompt: &Prompt) -> AppResult<()> {
    debug!("Inserting prompt {}", prompt.id);

    conn.execute(
        r#"
        INSERT INTO prompts (id, text, category, scheduled_date, last_used_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            prompt.id.to_string(),
            prompt.text,
            prompt.category.as_str(),
            prompt
                .scheduled_date
                .map(|date| date.format(SCHEDULED_DATE_FORMAT).to_string()),
            prompt.last_used_at.as_ref().map(format_timestamp),
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(())
}

/// Lists every prompt ordered by text.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_prompts(conn: &Connection) -> AppResult<Vec<Prompt>> {
    let mut stmt = conn
        .prepare(
            r#"
            SELECT id, text, category, scheduled_date, last_used_at
            FROM prompts
            ORDER BY text ASC
            "#,
        )
        .map_err(DatabaseError::Sqlite)?;

    let prompts = stmt
        .query_map([], |row| prompt_from_row(row, 0))
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("Loaded {} prompts", prompts.len());
    Ok(prompts)
}

/// Retrieves a prompt by id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
/// Returns `Ok(None)` if no prompt has the given id.
pub fn get_prompt(conn: &Connection, id: Uuid) -> AppResult<Option<Prompt>> {
    conn.query_row(
        r#"
        SELECT id, text, category, scheduled_date, last_used_at
        FROM prompts
        WHERE id = ?1
        "#,
        params![id.to_string()],
        |row| prompt_from_row(row, 0),
    )
    .optional()
    .map_err(|e| DatabaseError::Sqlite(e).into())
}

/// Records that a prompt was used at `used_at`.
///
/// # Errors
///
/// Returns an error if the prompt doesn't exist or the database operation fails.
pub fn set_last_used(conn: &Connection, id: Uuid, used_at: DateTime<Utc>) -> AppResult<()> {
    debug!("Marking prompt {} as used", id);

    let rows_affected = conn
        .execute(
            "UPDATE prompts SET last_used_at = ?1 WHERE id = ?2",
            params![format_timestamp(&used_at), id.to_string()],
        )
        .map_err(DatabaseError::Sqlite)?;

    if rows_affected == 0 {
        return Err(DatabaseError::NotFound(format!("Prompt with id {} not found", id)).into());
    }

    Ok(())
}

/// Collects prompts used at or after `since`.
///
/// A prompt counts as used if an entry created since then references it, or
/// if its own `last_used_at` falls in the window.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn recently_used_prompt_ids(
    conn: &Connection,
    since: DateTime<Utc>,
) -> AppResult<HashSet<Uuid>> {
    let since = format_timestamp(&since);
    let mut stmt = conn
        .prepare(
            r#"
            SELECT prompt_id FROM entries
            WHERE created_at >= ?1 AND prompt_id IS NOT NULL
            UNION
            SELECT id FROM prompts
            WHERE last_used_at IS NOT NULL AND last_used_at >= ?1
            "#,
        )
        .map_err(DatabaseError::Sqlite)?;

    let ids = stmt
        .query_map(params![since], |row| parse_uuid(0, &row.get::<_, String>(0)?))
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<HashSet<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    debug!("{} prompts used since {}", ids.len(), since);
    Ok(ids)
}

/// Merges catalog prompts into storage, keyed by exact text.
///
/// Seeds whose text already exists are skipped, as are duplicates within
/// `seeds`. Runs in one transaction. Returns the number of prompts inserted.
///
/// # Errors
///
/// Returns an error if the database operation fails; nothing is inserted then.
pub fn merge_catalog(conn: &Connection, seeds: &[PromptSeed]) -> AppResult<usize> {
    let tx = conn
        .unchecked_transaction()
        .map_err(DatabaseError::Sqlite)?;

    let mut existing: HashSet<String> = {
        let mut stmt = tx
            .prepare("SELECT text FROM prompts")
            .map_err(DatabaseError::Sqlite)?;
        let texts = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(DatabaseError::Sqlite)?
            .collect::<Result<HashSet<_>, _>>()
            .map_err(DatabaseError::Sqlite)?;
        texts
    };

    let mut inserted = 0;
    for seed in seeds {
        if existing.contains(&seed.text) {
            continue;
        }
        insert_prompt(&tx, &Prompt::new(seed.text.clone(), seed.category))?;
        existing.insert(seed.text.clone());
        inserted += 1;
    }

    tx.commit().map_err(DatabaseError::Sqlite)?;

    info!("Merged prompt catalog: {} new prompts", inserted);
    Ok(inserted)
}

/// Deletes a prompt, first detaching every entry that references it.
///
/// Entries keep their content and lose only the prompt link. Returns the
/// number of entries detached.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if the prompt doesn't exist, or an error
/// if the database operation fails.
pub fn delete_prompt(conn: &Connection, id: Uuid) -> AppResult<usize> {
    let tx = conn
        .unchecked_transaction()
        .map_err(DatabaseError::Sqlite)?;

    let detached = tx
        .execute(
            "UPDATE entries SET prompt_id = NULL WHERE prompt_id = ?1",
            params![id.to_string()],
        )
        .map_err(DatabaseError::Sqlite)?;

    let deleted = tx
        .execute("DELETE FROM prompts WHERE id = ?1", params![id.to_string()])
        .map_err(DatabaseError::Sqlite)?;

    if deleted == 0 {
        return Err(DatabaseError::NotFound(format!("Prompt with id {} not found", id)).into());
    }

    tx.commit().map_err(DatabaseError::Sqlite)?;

    info!("Deleted prompt {} ({} entries detached)", id, detached);
    Ok(detached)
}
