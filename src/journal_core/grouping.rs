use super::local_date;
use crate::constants::MONTH_LABEL_FORMAT;
use crate::models::JournalEntry;
use chrono::{Datelike, NaiveDate, TimeZone};
use std::collections::HashMap;

/// Entries written in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    /// Display label such as "October 2026".
    pub label: String,
    pub year: i32,
    pub month: u32,
    /// Most recent first.
    pub entries: Vec<JournalEntry>,
}

/// Groups entries by the calendar month of `created_at` in `tz`.
///
/// Groups are ordered by their most recent entry, newest first, and entries
/// inside a group are newest first.
pub fn group_by_month<Tz: TimeZone>(entries: Vec<JournalEntry>, tz: &Tz) -> Vec<MonthGroup> {
    let mut by_month: HashMap<(i32, u32), Vec<JournalEntry>> = HashMap::new();
    for entry in entries {
        let date = local_date(&entry.created_at, tz);
        by_month
            .entry((date.year(), date.month()))
            .or_default()
            .push(entry);
    }

    let mut groups: Vec<MonthGroup> = by_month
        .into_iter()
        .map(|((year, month), mut entries)| {
            entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            MonthGroup {
                label: month_label(year, month),
                year,
                month,
                entries,
            }
        })
        .collect();

    // Every group holds at least one entry, sorted newest first above
    groups.sort_by(|a, b| b.entries[0].created_at.cmp(&a.entries[0].created_at));
    groups
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.format(MONTH_LABEL_FORMAT).to_string())
        .unwrap_or_else(|| format!("{:04}-{:02}", year, month))
}
