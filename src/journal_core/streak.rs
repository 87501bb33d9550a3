use super::local_date;
use crate::models::JournalEntry;
use chrono::{DateTime, TimeZone};

/// Counts consecutive calendar days with at least one entry.
///
/// The run must end today or yesterday, otherwise the streak is zero. Entries
/// are walked newest first against a day cursor: a match counts the day and
/// moves the cursor back one day, an older day ends the walk, and further
/// entries on an already-counted day are skipped.
pub fn current_streak<Tz: TimeZone>(entries: &[JournalEntry], now: &DateTime<Tz>) -> u32 {
    let tz = now.timezone();
    let today = now.date_naive();
    let Some(yesterday) = today.pred_opt() else {
        return 0;
    };

    let mut sorted: Vec<&JournalEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let Some(latest) = sorted.first() else {
        return 0;
    };
    let latest_day = local_date(&latest.created_at, &tz);
    let mut cursor = if latest_day == today {
        today
    } else if latest_day == yesterday {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0;
    for entry in sorted {
        let day = local_date(&entry.created_at, &tz);
        if day == cursor {
            streak += 1;
            match cursor.pred_opt() {
                Some(previous) => cursor = previous,
                None => break,
            }
        } else if day < cursor {
            break;
        }
    }

    streak
}
