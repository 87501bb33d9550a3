//! User preferences persisted as a small JSON key-value file.
//!
//! The file is read once at startup and rewritten after every change.
//! Missing keys take their defaults, so older or partial files keep working.

use crate::constants::{DEFAULT_REMINDER_HOUR, DEFAULT_REMINDER_MINUTE};
use crate::errors::{AppError, AppResult};
use crate::notify::ReminderTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Color scheme selected in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::System => "system",
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::System => "System",
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "system" => Ok(Theme::System),
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme: {}", other)),
        }
    }
}

fn theme_or_system<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Theme, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.parse().unwrap_or_default())
}

/// Persisted settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub notification_enabled: bool,
    pub notification_hour: u32,
    pub notification_minute: u32,
    #[serde(deserialize_with = "theme_or_system")]
    pub selected_theme: Theme,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            notification_enabled: false,
            notification_hour: DEFAULT_REMINDER_HOUR,
            notification_minute: DEFAULT_REMINDER_MINUTE,
            selected_theme: Theme::System,
        }
    }
}

impl Preferences {
    /// Configured reminder time, or the 20:00 default if the stored values are out of range.
    pub fn reminder_time(&self) -> ReminderTime {
        ReminderTime::new(self.notification_hour, self.notification_minute).unwrap_or_default()
    }
}

/// File-backed preferences.
#[derive(Debug)]
pub struct PreferencesStore {
    path: PathBuf,
    current: Preferences,
}

impl PreferencesStore {
    /// Reads preferences from `path`.
    ///
    /// A missing file yields defaults. An unreadable or corrupt file is logged
    /// and also yields defaults; it is overwritten on the next change.
    pub fn load(path: &Path) -> Self {
        let current = match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Preferences>(&json) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!(error = %e, "Ignoring corrupt preferences file");
                    Preferences::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No preferences file yet, using defaults");
                Preferences::default()
            }
            Err(e) => {
                warn!(error = %e, "Failed to read preferences file");
                Preferences::default()
            }
        };

        PreferencesStore {
            path: path.to_path_buf(),
            current,
        }
    }

    pub fn get(&self) -> &Preferences {
        &self.current
    }

    /// # Errors
    ///
    /// Returns an error if the preferences file cannot be written. The new
    /// value is kept in memory either way.
    pub fn set_notification_enabled(&mut self, enabled: bool) -> AppResult<()> {
        self.current.notification_enabled = enabled;
        self.persist()
    }

    /// # Errors
    ///
    /// Returns an error if the preferences file cannot be written.
    pub fn set_reminder_time(&mut self, time: ReminderTime) -> AppResult<()> {
        self.current.notification_hour = time.hour();
        self.current.notification_minute = time.minute();
        self.persist()
    }

    /// # Errors
    ///
    /// Returns an error if the preferences file cannot be written.
    pub fn set_theme(&mut self, theme: Theme) -> AppResult<()> {
        self.current.selected_theme = theme;
        self.persist()
    }

    /// Writes the current preferences through a temporary file and rename.
    fn persist(&self) -> AppResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(&self.current)
            .map_err(|e| AppError::Preferences(format!("Failed to encode preferences: {}", e)))?;

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(json.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| AppError::Io(e.error))?;

        info!("Preferences saved");
        Ok(())
    }
}
