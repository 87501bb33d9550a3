//! Constants used throughout the application.
//!
//! This module contains all constants used in daybook, organized into logical
//! groups. Having constants centralized makes them easier to find, modify, and
//! reference consistently.

// Configuration Keys & Environment Variables
/// Environment variable for specifying the data directory.
pub const ENV_VAR_DAYBOOK_DIR: &str = "DAYBOOK_DIR";
/// Environment variable for overriding the bundled prompt catalog.
pub const ENV_VAR_DAYBOOK_PROMPTS: &str = "DAYBOOK_PROMPTS";
/// Environment variable selecting the log output format.
pub const ENV_VAR_DAYBOOK_LOG_FORMAT: &str = "DAYBOOK_LOG_FORMAT";
/// Environment variable selecting the default log level.
pub const ENV_VAR_DAYBOOK_LOG_LEVEL: &str = "DAYBOOK_LOG_LEVEL";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for application data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".daybook";
/// File name of the SQLite entry store inside the data directory.
pub const DB_FILE_NAME: &str = "daybook.db";
/// File name of the preferences file inside the data directory.
pub const PREFERENCES_FILE_NAME: &str = "preferences.json";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Logging Configuration
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// File System Parameters
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;

// Prompt Rotation
/// Number of days a used prompt stays out of the daily rotation.
pub const RECENT_PROMPT_WINDOW_DAYS: i64 = 7;

// Reminders
/// Identifier of the single daily reminder request.
pub const REMINDER_IDENTIFIER: &str = "daily-journal-reminder";
/// Default reminder hour (24h clock).
pub const DEFAULT_REMINDER_HOUR: u32 = 20;
/// Default reminder minute.
pub const DEFAULT_REMINDER_MINUTE: u32 = 0;
/// Title of the reminder notification.
pub const REMINDER_TITLE: &str = "Time to reflect";
/// Body of the reminder notification.
pub const REMINDER_BODY: &str = "Take a few minutes to write in your journal.";

// Date/Time Logic
/// Format used for month group labels, e.g. "October 2026".
pub const MONTH_LABEL_FORMAT: &str = "%B %Y";
/// Format for entry dates older than yesterday, e.g. "Oct 7, 2026".
pub const RELATIVE_DATE_FORMAT: &str = "%b %-d, %Y";
/// First hour greeted with "Good morning"; earlier hours are evening.
pub const MORNING_START_HOUR: u32 = 5;
/// First hour greeted with "Good afternoon".
pub const AFTERNOON_START_HOUR: u32 = 12;
/// First hour greeted with "Good evening".
pub const EVENING_START_HOUR: u32 = 18;
