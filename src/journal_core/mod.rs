//! Core journal logic without I/O operations.
//!
//! This module contains pure functions over prompts and entries: daily prompt
//! rotation, streak counting, filtering, month grouping and display labels.
//! Calendar-day logic is evaluated in the time zone of the `now` value passed
//! in. Callers pass a zone with real offset rules such as `Local`; a
//! `FixedOffset` applies today's offset to every stored entry.

mod filter;
mod grouping;
mod labels;
mod rotation;
mod streak;

pub use filter::{filter_entries, EntryFilter};
pub use grouping::{group_by_month, MonthGroup};
pub use labels::{greeting_for_hour, relative_day_label};
pub use rotation::{pick_random, select_daily_prompt};
pub use streak::current_streak;

use crate::models::JournalEntry;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};

/// Calendar date of a stored timestamp as seen in `tz`.
pub fn local_date<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    timestamp.with_timezone(tz).date_naive()
}

/// 1-based ordinal day of the year of `now`.
pub fn day_of_year<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    now.ordinal()
}

/// First and last instants of the calendar day containing `now`.
///
/// The range is inclusive and expressed in UTC for store queries. A local
/// midnight skipped by a DST transition resolves to `now`'s own instant.
pub fn day_bounds<Tz: TimeZone>(now: &DateTime<Tz>) -> (DateTime<Utc>, DateTime<Utc>) {
    let tz = now.timezone();
    let today = now.date_naive();

    let start_of = |date: NaiveDate| {
        tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    };

    let start = start_of(today).unwrap_or_else(|| now.with_timezone(&Utc));
    let end = today
        .succ_opt()
        .and_then(start_of)
        .map(|next| next - chrono::Duration::microseconds(1))
        .unwrap_or_else(|| now.with_timezone(&Utc));

    (start, end)
}

/// Today's entry: the most recent entry created on `now`'s calendar day.
pub fn todays_entry<'a, Tz: TimeZone>(
    entries: &'a [JournalEntry],
    now: &DateTime<Tz>,
) -> Option<&'a JournalEntry> {
    let tz = now.timezone();
    let today = now.date_naive();

    entries
        .iter()
        .filter(|entry| local_date(&entry.created_at, &tz) == today)
        .max_by_key(|entry| entry.created_at)
}
