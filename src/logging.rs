//! Logging setup
//!
//! The client logs through `tracing`. Applications that do not install their
//! own subscriber can call [`init_logging`] to get structured output on
//! stderr.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Logging error types
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{0}': {1}")]
    InvalidFilter(String, String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Install a subscriber at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// `EnvFilter` directive, e.g. `info` or `strawpoll=debug`
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            log_level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Install a global `tracing` subscriber.
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    if !config.enabled {
        return Ok(());
    }

    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| LoggingError::InvalidFilter(config.log_level.clone(), e.to_string()))?;

    let result = match config.format {
        LogFormat::Json => Registry::default()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => Registry::default()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    result.map_err(|e| LoggingError::InitError(e.to_string()))?;

    tracing::debug!(level = %config.log_level, format = ?config.format, "logging initialized");
    Ok(())
}
