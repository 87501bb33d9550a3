//! Application facade wiring the services together.
//!
//! [`Daybook`] owns one instance of every service and exposes the flows a
//! host UI drives: the home screen, the journal and the settings screen.
//! Storage and notification failures are logged here and degrade to empty
//! results or no-ops; only bootstrap can fail.

use crate::catalog::PromptCatalog;
use crate::config::{ensure_data_dir_exists, Config};
use crate::db::Database;
use crate::errors::AppResult;
use crate::journal_core::{greeting_for_hour, relative_day_label, EntryFilter, MonthGroup};
use crate::models::{JournalEntry, Mood, Prompt};
use crate::notify::{NotificationCenter, ReminderTime};
use crate::ops::{JournalService, JournalStats, PromptService, ReminderScheduler};
use crate::preferences::{Preferences, PreferencesStore, Theme};
use chrono::{DateTime, Local, TimeZone, Timelike};
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Source of the current time in a calendar time zone.
///
/// The zone must carry its own offset rules: stored entries are placed on
/// calendar days with the offset in force when they were written.
pub type Clock<Tz = Local> = Arc<dyn Fn() -> DateTime<Tz> + Send + Sync>;

/// The system clock in the host's local time zone.
pub fn system_clock() -> Clock<Local> {
    Arc::new(Local::now)
}

/// A running daybook whose calendar days follow `Tz`.
pub struct Daybook<Tz: TimeZone = Local> {
    prompts: PromptService,
    journal: JournalService,
    reminders: ReminderScheduler,
    preferences: PreferencesStore,
    clock: Clock<Tz>,
}

impl Daybook<Local> {
    /// Opens the data directory and prepares every service.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the entry store
    /// cannot be opened. A missing catalog or preferences file is not an error.
    pub fn bootstrap(config: &Config, center: Arc<dyn NotificationCenter>) -> AppResult<Self> {
        Self::bootstrap_with_clock(config, center, system_clock())
    }
}

impl<Tz: TimeZone> Daybook<Tz> {
    /// Like [`Daybook::bootstrap`], reading the time and zone from `clock`.
    pub fn bootstrap_with_clock(
        config: &Config,
        center: Arc<dyn NotificationCenter>,
        clock: Clock<Tz>,
    ) -> AppResult<Self> {
        config.validate()?;
        ensure_data_dir_exists(&config.data_dir)?;

        let db = Database::open(&config.db_path())?;
        db.initialize_schema()?;

        let prompts = PromptService::new(db.clone());
        let catalog = PromptCatalog::load_or_empty(config.prompts_path.as_deref());
        match prompts.seed_if_needed(&catalog) {
            Ok(inserted) => info!(inserted, "Prompt catalog merged"),
            Err(e) => warn!(error = %e, "Failed to seed prompts"),
        }

        let preferences = PreferencesStore::load(&config.preferences_path());
        let reminders = ReminderScheduler::new(center);
        reminders.apply(preferences.get());

        info!("Daybook ready");
        Ok(Daybook {
            prompts,
            journal: JournalService::new(db),
            reminders,
            preferences,
            clock,
        })
    }

    fn now(&self) -> DateTime<Tz> {
        (self.clock)()
    }

    // Home

    /// Greeting for the current time of day.
    pub fn greeting(&self) -> &'static str {
        greeting_for_hour(self.now().hour())
    }

    pub fn has_written_today(&self) -> bool {
        self.todays_entry().is_some()
    }

    /// "Today", "Yesterday" or the date of `entry`, for list rows and titles.
    pub fn day_label(&self, entry: &JournalEntry) -> String {
        relative_day_label(&entry.created_at, &self.now())
    }

    /// Today's prompt, or `None` when no prompt is stored.
    pub fn todays_prompt(&self) -> Option<Prompt> {
        self.prompts
            .todays_prompt(&self.now())
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to select today's prompt");
                None
            })
    }

    /// A different prompt than `current`, chosen at random.
    pub fn shuffle_prompt(&self, current: Option<&Prompt>) -> Option<Prompt> {
        self.shuffle_prompt_with(current, &mut rand::rng())
    }

    /// [`Daybook::shuffle_prompt`] with a caller-provided random source.
    ///
    /// Keeps `current` when the store cannot be read.
    pub fn shuffle_prompt_with<R: Rng + ?Sized>(
        &self,
        current: Option<&Prompt>,
        rng: &mut R,
    ) -> Option<Prompt> {
        match self.prompts.random_prompt(current, rng) {
            Ok(Some(prompt)) => Some(prompt),
            Ok(None) => current.cloned(),
            Err(e) => {
                warn!(error = %e, "Failed to shuffle prompt");
                current.cloned()
            }
        }
    }

    pub fn todays_entry(&self) -> Option<JournalEntry> {
        self.journal.todays_entry(&self.now()).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load today's entry");
            None
        })
    }

    /// Opens today's entry, creating it with `prompt` if none exists yet.
    ///
    /// Creating the entry marks `prompt` as used. Returns `None` only when
    /// the entry could not be created.
    pub fn start_writing(&self, prompt: Option<&Prompt>) -> Option<JournalEntry> {
        if let Some(existing) = self.todays_entry() {
            return Some(existing);
        }

        let now = self.now();
        let entry = match self.journal.create_entry(prompt, &now) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Failed to create today's entry");
                return None;
            }
        };

        if let Some(prompt) = prompt {
            if let Err(e) = self.prompts.mark_used(prompt, &now) {
                warn!(error = %e, prompt_id = %prompt.id, "Failed to mark prompt as used");
            }
        }
        Some(entry)
    }

    /// Saves content and mood. Returns the saved entry, or `None` on failure.
    pub fn save_entry(&self, id: Uuid, content: &str, mood: Option<Mood>) -> Option<JournalEntry> {
        match self.journal.save_entry(id, content, mood, &self.now()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, entry_id = %id, "Failed to save entry");
                None
            }
        }
    }

    // Journal

    /// Entries matching `filter`, most recent first.
    pub fn entries(&self, filter: &EntryFilter) -> Vec<JournalEntry> {
        self.journal.list(filter).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to list entries");
            Vec::new()
        })
    }

    /// Entries matching `filter`, grouped by month in the local time zone.
    pub fn grouped_entries(&self, filter: &EntryFilter) -> Vec<MonthGroup> {
        let tz = self.now().timezone();
        self.journal.list_by_month(filter, &tz).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to group entries");
            Vec::new()
        })
    }

    pub fn stats(&self) -> JournalStats {
        self.journal.stats(&self.now()).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to compute journal stats");
            JournalStats::default()
        })
    }

    /// Deletes an entry. Returns whether it was deleted.
    pub fn delete_entry(&self, id: Uuid) -> bool {
        match self.journal.delete_entry(id) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, entry_id = %id, "Failed to delete entry");
                false
            }
        }
    }

    // Settings

    pub fn preferences(&self) -> &Preferences {
        self.preferences.get()
    }

    pub fn notifications_authorized(&self) -> bool {
        self.reminders.is_authorized()
    }

    /// Turns the daily reminder on or off.
    ///
    /// Returns whether a reminder is scheduled afterwards; enabling without
    /// permission stores the choice but schedules nothing.
    pub fn set_notifications_enabled(&mut self, enabled: bool) -> bool {
        if let Err(e) = self.preferences.set_notification_enabled(enabled) {
            warn!(error = %e, "Failed to save notification preference");
        }
        self.reminders.apply(self.preferences.get())
    }

    /// Changes the reminder time, rescheduling if reminders are on.
    pub fn set_reminder_time(&mut self, time: ReminderTime) -> bool {
        if let Err(e) = self.preferences.set_reminder_time(time) {
            warn!(error = %e, "Failed to save reminder time");
        }
        self.reminders.apply(self.preferences.get())
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if let Err(e) = self.preferences.set_theme(theme) {
            warn!(error = %e, "Failed to save theme");
        }
    }

    /// Asks for notification permission; a grant turns reminders on.
    pub fn request_notification_permission(&mut self) -> bool {
        let granted = self.reminders.request_authorization();
        if granted {
            self.set_notifications_enabled(true);
        }
        granted
    }

    /// Called when the host comes to the foreground.
    pub fn on_foreground(&self) {
        self.reminders.clear_badge();
    }
}
