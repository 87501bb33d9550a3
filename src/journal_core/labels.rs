use super::local_date;
use crate::constants::{
    AFTERNOON_START_HOUR, EVENING_START_HOUR, MORNING_START_HOUR, RELATIVE_DATE_FORMAT,
};
use chrono::{DateTime, TimeZone, Utc};

/// Greeting shown on the home screen for a local hour (0-23).
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        h if (MORNING_START_HOUR..AFTERNOON_START_HOUR).contains(&h) => "Good morning",
        h if (AFTERNOON_START_HOUR..EVENING_START_HOUR).contains(&h) => "Good afternoon",
        _ => "Good evening",
    }
}

/// "Today", "Yesterday", or the calendar date of `timestamp` as seen from `now`.
pub fn relative_day_label<Tz: TimeZone>(timestamp: &DateTime<Utc>, now: &DateTime<Tz>) -> String {
    let tz = now.timezone();
    let date = local_date(timestamp, &tz);
    let today = now.date_naive();

    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format(RELATIVE_DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};

    #[test]
    fn test_greeting_by_hour() {
        let cases = [
            (0, "Good evening"),
            (4, "Good evening"),
            (5, "Good morning"),
            (11, "Good morning"),
            (12, "Good afternoon"),
            (17, "Good afternoon"),
            (18, "Good evening"),
            (23, "Good evening"),
        ];
        for (hour, expected) in cases {
            assert_eq!(greeting_for_hour(hour), expected, "hour {}", hour);
        }
    }

    #[test]
    fn test_relative_labels() {
        let tz = FixedOffset::east_opt(3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        let utc = |dt: DateTime<FixedOffset>| dt.with_timezone(&Utc);

        assert_eq!(relative_day_label(&utc(now - Duration::hours(7)), &now), "Today");
        assert_eq!(relative_day_label(&utc(now - Duration::hours(9)), &now), "Yesterday");
        assert_eq!(
            relative_day_label(&utc(now - Duration::days(3)), &now),
            "Mar 7, 2024"
        );
    }

    #[test]
    fn test_relative_label_uses_local_day() {
        // 23:30 UTC on the 9th is already the 10th at UTC+1
        let tz = FixedOffset::east_opt(3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 3, 9, 23, 30, 0).unwrap();

        assert_eq!(relative_day_label(&late, &now), "Today");
        assert_eq!(relative_day_label(&late, &now.with_timezone(&Utc)), "Yesterday");
    }
}
