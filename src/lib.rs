/*!
# Daybook

Daybook is the engine of a guided daily journal. Each day it offers one reflective
prompt, lets the user write a single entry with an optional mood, and keeps the
journal browsable by month with a running writing streak. An optional daily
reminder is kept in sync with the user's settings.

## Core Features

- A daily prompt that rotates deterministically and skips prompts used in the last week
- One entry per calendar day, linked to the prompt it answered
- Search and mood/category filters over past entries, grouped by month
- Current streak and total entry count
- Persisted settings for the reminder and the color theme

## Architecture

The codebase follows a modular architecture with clear separation of concerns:

- `app`: The `Daybook` facade a host UI drives
- `catalog`: Bundled and user-supplied prompt catalogs
- `config`: Configuration loading and validation
- `db`: SQLite entry store with r2d2 connection pooling
- `errors`: Error handling infrastructure
- `journal_core`: Pure rotation, streak, filter and grouping logic
- `logging`: Tracing subscriber setup
- `models`: Prompts, entries, moods and categories
- `notify`: Notification center abstraction and request types
- `ops`: Services over the store and the notification center
- `preferences`: Settings persisted as JSON

## Usage Example

```rust,no_run
use daybook::notify::InMemoryNotificationCenter;
use daybook::{Config, Daybook, EntryFilter};
use std::sync::Arc;

fn main() -> daybook::AppResult<()> {
    let config = Config::load()?;
    daybook::logging::init_tracing(&config.log_format, &config.log_level)?;

    let center = Arc::new(InMemoryNotificationCenter::new(true));
    let daybook = Daybook::bootstrap(&config, center)?;

    let prompt = daybook.todays_prompt();
    if let Some(entry) = daybook.start_writing(prompt.as_ref()) {
        daybook.save_entry(entry.id, "Grateful for a slow morning.", None);
    }

    for group in daybook.grouped_entries(&EntryFilter::default()) {
        println!("{}: {} entries", group.label, group.entries.len());
    }
    println!("Streak: {}", daybook.stats().current_streak);
    Ok(())
}
```
*/

/// Application facade
pub mod app;
/// Prompt catalog loading
pub mod catalog;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Persistent entry store
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// Pure journal logic
pub mod journal_core;
/// Logging setup
pub mod logging;
/// Domain types
pub mod models;
/// Local notifications
pub mod notify;
/// Services
pub mod ops;
/// User settings
pub mod preferences;

// Re-export important types for convenience
pub use app::Daybook;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal_core::{EntryFilter, MonthGroup};
pub use models::{JournalEntry, Mood, Prompt, PromptCategory};
pub use notify::{NotificationCenter, ReminderTime};
pub use ops::JournalStats;
pub use preferences::{Preferences, Theme};
