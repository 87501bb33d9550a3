//! Error handling utilities for the daybook library.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the library, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur during database operations.
///
/// # Examples
///
/// ```
/// use daybook::errors::DatabaseError;
///
/// let error = DatabaseError::NotFound("Entry with id 123 not found".to_string());
/// assert!(format!("{}", error).contains("not found"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}")]
    Pool(#[from] r2d2::Error),

    /// Requested row not found in database.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Represents errors that can occur while loading the prompt catalog.
///
/// # Examples
///
/// ```
/// use daybook::errors::CatalogError;
/// use std::path::PathBuf;
/// use std::io::{self, ErrorKind};
///
/// let error = CatalogError::Read {
///     path: PathBuf::from("/missing/prompts.json"),
///     source: io::Error::new(ErrorKind::NotFound, "no such file"),
/// };
/// assert!(format!("{}", error).contains("/missing/prompts.json"));
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read prompt catalog {path}: {source}")]
    Read {
        /// Path of the catalog file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The catalog contents are not a valid `{"prompts": [...]}` document.
    #[error("Invalid prompt catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Represents failures reported by the notification subsystem.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The notification center rejected a request.
    #[error("Notification request '{identifier}' rejected: {reason}")]
    Rejected {
        /// Identifier of the rejected request
        identifier: String,
        /// Reason reported by the notification center
        reason: String,
    },

    /// The notification center is unavailable.
    #[error("Notification center unavailable: {0}")]
    Unavailable(String),
}

/// Represents all possible errors that can occur in the daybook library.
///
/// This enum is the central error type used across the crate, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error`
/// trait implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use daybook::errors::AppError;
///
/// let error = AppError::Config("Data directory path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Data directory path is empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use daybook::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors related to the entry store.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors loading the prompt catalog.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Invalid preference values or unreadable preference files.
    #[error("Preferences error: {0}")]
    Preferences(String),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use daybook::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Preferences("Hour out of range".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
