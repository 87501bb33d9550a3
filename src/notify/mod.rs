//! Local notification primitives.
//!
//! The operating system's notification center is an external collaborator,
//! reached through the [`NotificationCenter`] trait. This module defines the
//! request types handed to it and an in-process implementation.

mod memory;

pub use memory::InMemoryNotificationCenter;

use crate::constants::{DEFAULT_REMINDER_HOUR, DEFAULT_REMINDER_MINUTE};
use crate::errors::{AppError, AppResult, NotificationError};
use chrono::{DateTime, NaiveTime, TimeZone};
use std::fmt;

/// Permission state reported by the notification center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationStatus {
    #[default]
    NotDetermined,
    Denied,
    Authorized,
}

/// Kinds of interruption requested when asking for permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorizationOptions {
    pub alert: bool,
    pub badge: bool,
    pub sound: bool,
}

impl AuthorizationOptions {
    /// Alert, badge and sound.
    pub const ALL: AuthorizationOptions = AuthorizationOptions {
        alert: true,
        badge: true,
        sound: true,
    };
}

/// Wall-clock time of day for the daily reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReminderTime {
    hour: u32,
    minute: u32,
}

impl ReminderTime {
    /// Validates `hour` (0-23) and `minute` (0-59).
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::notify::ReminderTime;
    ///
    /// assert!(ReminderTime::new(20, 0).is_ok());
    /// assert!(ReminderTime::new(24, 0).is_err());
    /// assert!(ReminderTime::new(7, 60).is_err());
    /// ```
    pub fn new(hour: u32, minute: u32) -> AppResult<Self> {
        if hour > 23 {
            return Err(AppError::Preferences(format!(
                "Reminder hour must be between 0 and 23, got {}",
                hour
            )));
        }
        if minute > 59 {
            return Err(AppError::Preferences(format!(
                "Reminder minute must be between 0 and 59, got {}",
                minute
            )));
        }
        Ok(ReminderTime { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    fn as_naive_time(&self) -> NaiveTime {
        // Fields are validated on construction
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl Default for ReminderTime {
    /// 20:00.
    fn default() -> Self {
        ReminderTime {
            hour: DEFAULT_REMINDER_HOUR,
            minute: DEFAULT_REMINDER_MINUTE,
        }
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Calendar trigger firing at a local time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTrigger {
    pub time: ReminderTime,
    pub repeats: bool,
}

impl DailyTrigger {
    pub fn repeating(time: ReminderTime) -> Self {
        DailyTrigger {
            time,
            repeats: true,
        }
    }

    /// Next delivery strictly after `now`, in `now`'s time zone.
    ///
    /// A local time skipped by a DST transition moves to the following day.
    pub fn next_fire_after<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let tz = now.timezone();
        let time = self.time.as_naive_time();

        let mut date = now.date_naive();
        for _ in 0..3 {
            if let Some(candidate) = tz.from_local_datetime(&date.and_time(time)).earliest() {
                if candidate > *now {
                    return Some(candidate);
                }
            }
            date = date.succ_opt()?;
        }
        None
    }
}

/// What the user sees when the reminder fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub badge: Option<u32>,
    pub sound: bool,
}

/// A keyed request to deliver content on a trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub identifier: String,
    pub content: NotificationContent,
    pub trigger: DailyTrigger,
}

/// Operations the reminder scheduler needs from the platform.
///
/// Implementations report failures as `NotificationError`; callers decide
/// whether they matter.
pub trait NotificationCenter: Send + Sync {
    /// Asks the user for permission. Returns whether it was granted.
    fn request_authorization(
        &self,
        options: AuthorizationOptions,
    ) -> Result<bool, NotificationError>;

    fn authorization_status(&self) -> AuthorizationStatus;

    /// Adds a request, replacing any pending request with the same identifier.
    fn add(&self, request: NotificationRequest) -> Result<(), NotificationError>;

    /// Removes pending requests with the given identifiers.
    fn remove_pending(&self, identifiers: &[&str]);

    fn set_badge_count(&self, count: u32) -> Result<(), NotificationError>;
}
