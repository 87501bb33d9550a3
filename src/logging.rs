//! Tracing subscriber setup.
//!
//! Hosts call [`init_tracing`] once at startup. `RUST_LOG` takes precedence
//! over the configured level.

use crate::constants::{LOG_FORMAT_JSON, LOG_FORMAT_TEXT};
use crate::errors::{AppError, AppResult};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::EnvFilter;

/// Builds the filter from `RUST_LOG`, falling back to `default_level`.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs the global fmt subscriber writing to stderr with UTC RFC 3339 timestamps.
///
/// # Errors
///
/// Returns `AppError::Config` for an unknown format, or if a global
/// subscriber is already installed.
///
/// # Examples
///
/// ```no_run
/// use daybook::logging::init_tracing;
///
/// init_tracing("json", "debug")?;
/// # Ok::<(), daybook::AppError>(())
/// ```
pub fn init_tracing(format: &str, level: &str) -> AppResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_timer(ChronoUtc::rfc_3339())
        .with_target(false);

    let result = match format {
        LOG_FORMAT_JSON => builder.json().with_current_span(false).try_init(),
        LOG_FORMAT_TEXT => builder.try_init(),
        other => {
            return Err(AppError::Config(format!(
                "Unsupported log format: {}",
                other
            )))
        }
    };

    result.map_err(|e| AppError::Config(format!("Failed to initialize logging: {}", e)))
}
