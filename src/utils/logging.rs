//! Structured logging setup via `tracing-subscriber`.
//!
//! `ODYSSEY_LOG` takes precedence over the configured level and accepts full
//! `EnvFilter` directives (e.g. `odyssey_sync::status=debug,info`).

use crate::config::LoggingSettings;
use crate::error::{ProtocolError, Result};
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable overriding the configured filter
pub const LOG_ENV: &str = "ODYSSEY_LOG";

/// Filter built from `ODYSSEY_LOG`, falling back to the configured level
pub fn env_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(settings.log_level.as_str().to_ascii_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber
///
/// # Errors
/// Returns `ProtocolError::ConfigError` when a global subscriber is already set
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let filter = env_filter(settings);

    let installed = if settings.json_format {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_current_span(true)
            .try_init()
    } else {
        fmt().with_env_filter(filter).with_target(true).try_init()
    };

    installed.map_err(|e| ProtocolError::ConfigError(format!("Failed to install logger: {e}")))?;
    tracing::info!(app = %settings.app_name, json = settings.json_format, "Logging initialized");
    Ok(())
}
