//! Browsing, statistics and editing of journal entries.

use crate::db::{entries, Database};
use crate::errors::{AppResult, DatabaseError};
use crate::journal_core::{
    current_streak, day_bounds, filter_entries, group_by_month, todays_entry, EntryFilter,
    MonthGroup,
};
use crate::models::{JournalEntry, Mood, Prompt};
use chrono::{DateTime, SubsecRound, TimeZone, Utc};
use tracing::{debug, info};
use uuid::Uuid;

/// Headline numbers shown above the journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JournalStats {
    pub total_entries: usize,
    pub current_streak: u32,
}

/// Queries and mutates journal entries.
#[derive(Clone)]
pub struct JournalService {
    db: Database,
}

impl JournalService {
    pub fn new(db: Database) -> Self {
        JournalService { db }
    }

    /// Entries matching `filter`, most recent first.
    pub fn list(&self, filter: &EntryFilter) -> AppResult<Vec<JournalEntry>> {
        let conn = self.db.get_conn()?;
        let all = entries::list_entries(&conn)?;
        let matching = filter_entries(all, filter);
        debug!(count = matching.len(), "Listed entries");
        Ok(matching)
    }

    /// Entries matching `filter`, grouped by month in `tz`.
    pub fn list_by_month<Tz: TimeZone>(
        &self,
        filter: &EntryFilter,
        tz: &Tz,
    ) -> AppResult<Vec<MonthGroup>> {
        Ok(group_by_month(self.list(filter)?, tz))
    }

    /// Consecutive days with an entry, ending today or yesterday.
    pub fn streak<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> AppResult<u32> {
        let conn = self.db.get_conn()?;
        let all = entries::list_entries(&conn)?;
        Ok(current_streak(&all, now))
    }

    pub fn total_entries(&self) -> AppResult<usize> {
        let conn = self.db.get_conn()?;
        entries::count_entries(&conn)
    }

    pub fn stats<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> AppResult<JournalStats> {
        let conn = self.db.get_conn()?;
        let all = entries::list_entries(&conn)?;
        Ok(JournalStats {
            total_entries: all.len(),
            current_streak: current_streak(&all, now),
        })
    }

    /// The most recent entry created on `now`'s calendar day.
    pub fn todays_entry<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> AppResult<Option<JournalEntry>> {
        let (start, end) = day_bounds(now);
        let conn = self.db.get_conn()?;
        let candidates = entries::list_entries_between(&conn, start, end)?;
        Ok(todays_entry(&candidates, now).cloned())
    }

    /// Creates an empty entry at `now`, linked to `prompt`.
    ///
    /// This does not check for an existing entry today; callers do.
    pub fn create_entry<Tz: TimeZone>(
        &self,
        prompt: Option<&Prompt>,
        now: &DateTime<Tz>,
    ) -> AppResult<JournalEntry> {
        let entry = JournalEntry::new(now.with_timezone(&Utc), prompt.cloned());
        let conn = self.db.get_conn()?;
        entries::insert_entry(&conn, &entry)?;
        info!(entry_id = %entry.id, "Entry created");
        Ok(entry)
    }

    /// Saves content and mood, returning the updated entry.
    pub fn save_entry<Tz: TimeZone>(
        &self,
        id: Uuid,
        content: &str,
        mood: Option<Mood>,
        now: &DateTime<Tz>,
    ) -> AppResult<JournalEntry> {
        let conn = self.db.get_conn()?;
        entries::update_entry(
            &conn,
            id,
            content,
            mood,
            now.with_timezone(&Utc).trunc_subsecs(6),
        )?;
        entries::get_entry(&conn, id)?.ok_or_else(|| {
            DatabaseError::NotFound(format!("Entry with id {} not found", id)).into()
        })
    }

    pub fn get_entry(&self, id: Uuid) -> AppResult<Option<JournalEntry>> {
        let conn = self.db.get_conn()?;
        entries::get_entry(&conn, id)
    }

    pub fn delete_entry(&self, id: Uuid) -> AppResult<()> {
        let conn = self.db.get_conn()?;
        entries::delete_entry(&conn, id)?;
        info!(entry_id = %id, "Entry deleted");
        Ok(())
    }
}
