//! Configuration management for daybook.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It configures where the entry store and
//! preferences live, where the prompt catalog comes from, and how logs are written.
//!
//! # Environment Variables
//!
//! - `DAYBOOK_DIR`: Path to the data directory (defaults to ~/.daybook)
//! - `DAYBOOK_PROMPTS`: Path to a prompt catalog replacing the bundled one
//! - `DAYBOOK_LOG_FORMAT`: `text` (default) or `json`
//! - `DAYBOOK_LOG_LEVEL`: Default log level when `RUST_LOG` is unset (defaults to `info`)
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    DB_FILE_NAME, DEFAULT_DATA_SUBDIR, DEFAULT_LOG_LEVEL, ENV_VAR_DAYBOOK_DIR,
    ENV_VAR_DAYBOOK_LOG_FORMAT, ENV_VAR_DAYBOOK_LOG_LEVEL, ENV_VAR_DAYBOOK_PROMPTS, ENV_VAR_HOME,
    LOG_FORMAT_JSON, LOG_FORMAT_TEXT, PREFERENCES_FILE_NAME, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(unix)]
use crate::constants::DEFAULT_DIR_PERMISSIONS;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Configuration for a daybook instance.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use daybook::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/daybook"),
///     prompts_path: None,
///     log_format: "text".to_string(),
///     log_level: "info".to_string(),
/// };
/// assert_eq!(config.db_path(), PathBuf::from("/path/to/daybook/daybook.db"));
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use daybook::Config;
/// use std::env;
///
/// env::set_var("DAYBOOK_DIR", "/custom/daybook/path");
///
/// let config = Config::load().expect("Failed to load configuration");
/// assert_eq!(config.data_dir.to_str(), Some("/custom/daybook/path"));
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory holding the entry store and the preferences file.
    ///
    /// Loaded from `DAYBOOK_DIR` with a fallback to ~/.daybook.
    pub data_dir: PathBuf,

    /// Prompt catalog file. `None` means the catalog bundled with the crate.
    pub prompts_path: Option<PathBuf>,

    /// Log output format, `text` or `json`.
    pub log_format: String,

    /// Default log level directive.
    pub log_level: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &REDACTED_PLACEHOLDER)
            .field(
                "prompts_path",
                &self.prompts_path.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .field("log_format", &self.log_format)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(""),
            prompts_path: None,
            log_format: LOG_FORMAT_TEXT.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Configuration rooted at `data_dir` with default logging and the bundled catalog.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Config {
            data_dir: data_dir.into(),
            ..Config::default()
        }
    }

    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// Paths are expanded with `shellexpand` to handle `~` and environment
    /// variable references.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if path expansion fails or the resulting
    /// configuration is invalid (see [`Config::validate`]).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use daybook::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Loaded config: {:?}", config),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(ENV_VAR_DAYBOOK_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });
        let data_dir = expand_path(&data_dir_str)?;

        let prompts_path = match env::var(ENV_VAR_DAYBOOK_PROMPTS) {
            Ok(raw) if !raw.trim().is_empty() => Some(expand_path(&raw)?),
            _ => None,
        };

        let log_format = env::var(ENV_VAR_DAYBOOK_LOG_FORMAT)
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|_| LOG_FORMAT_TEXT.to_string());
        let log_level = env::var(ENV_VAR_DAYBOOK_LOG_LEVEL)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        let config = Config {
            data_dir,
            prompts_path,
            log_format,
            log_level,
        };
        config.validate()?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty"
    /// - "Data directory must be an absolute path"
    /// - "Unsupported log format: ..."
    ///
    /// # Examples
    ///
    /// ```
    /// use daybook::Config;
    ///
    /// assert!(Config::with_data_dir("/absolute/path").validate().is_ok());
    /// assert!(Config::with_data_dir("relative/path").validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        if self.log_format != LOG_FORMAT_TEXT && self.log_format != LOG_FORMAT_JSON {
            return Err(AppError::Config(format!(
                "Unsupported log format: {} (expected '{}' or '{}')",
                self.log_format, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            )));
        }

        Ok(())
    }

    /// Location of the SQLite entry store.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    /// Location of the preferences file.
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join(PREFERENCES_FILE_NAME)
    }
}

fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
    Ok(PathBuf::from(expanded.into_owned()))
}

/// Creates the data directory if missing, readable only by its owner on unix.
///
/// # Errors
///
/// Returns `AppError::Config` for a relative path, or `AppError::Io` if the
/// directory cannot be created.
pub fn ensure_data_dir_exists(data_dir: &Path) -> AppResult<()> {
    if !data_dir.is_absolute() {
        return Err(AppError::Config(format!(
            "Data directory path must be absolute: {}",
            data_dir.display()
        )));
    }

    if !data_dir.exists() {
        fs::create_dir_all(data_dir).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            let permissions = fs::Permissions::from_mode(DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(data_dir, permissions).map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to set permissions on data directory: {}", e),
                ))
            })?;
            debug!("Set 0o700 permissions on data directory");
        }
    }
    Ok(())
}
