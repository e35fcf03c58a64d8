//! Tracing configuration for processes embedding the reconciler
//!
//! Installs a `tracing-subscriber` registry with an env filter and one of
//! several output formats, and tags the session with a correlation id.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io;
pub use tracing::Level;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Tracing output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingFormat {
    /// Pretty-printed human-readable format
    Pretty,
    /// Compact single-line format
    Compact,
    /// Structured JSON format
    Json,
}

/// Log level options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show all logs (trace level)
    Trace,
    /// Show debug and above
    Debug,
    /// Show info and above (default)
    Info,
    /// Show warnings and above
    Warn,
    /// Show errors only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

impl LogLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::str::FromStr for TracingFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown tracing format: {s}")),
        }
    }
}

/// Tracing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TracingConfig {
    /// Output format.
    pub format: TracingFormat,
    /// Level used when neither `filter` nor `RUST_LOG` is set.
    pub level: LogLevel,
    /// Explicit filter directive, overrides `level` and `RUST_LOG`.
    pub filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            format: TracingFormat::Compact,
            level: LogLevel::Info,
            filter: None,
        }
    }
}

impl TracingConfig {
    /// Build the env filter for this configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the filter directive is invalid.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        if let Some(filter) = &self.filter {
            return EnvFilter::try_new(filter)
                .map_err(|e| Error::configuration(format!("Failed to create tracing filter: {e}")));
        }
        EnvFilter::try_from_default_env()
            .or_else(|_| {
                let level = self.level.as_str();
                EnvFilter::try_new(format!(
                    "checkrun_core={level},checkrun_status={level},checkrun_github={level}"
                ))
            })
            .map_err(|e| Error::configuration(format!("Failed to create tracing filter: {e}")))
    }
}

/// Global correlation ID for tracing request correlation
static CORRELATION_ID: std::sync::OnceLock<Uuid> = std::sync::OnceLock::new();

/// Get or create a correlation ID for the current session
pub fn correlation_id() -> Uuid {
    *CORRELATION_ID.get_or_init(Uuid::new_v4)
}

/// Initialize tracing with the given configuration.
///
/// # Errors
///
/// Returns a configuration error if the filter is invalid or a global
/// subscriber is already set.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let correlation_id = correlation_id();
    let registry = tracing_subscriber::registry().with(config.env_filter()?);

    let installed = match config.format {
        TracingFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(io::stderr)
                    .with_target(true),
            )
            .try_init(),
        TracingFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(io::stderr)
                    .with_target(false),
            )
            .try_init(),
        TracingFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(io::stderr)
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init(),
    };
    installed.map_err(|e| Error::configuration(format!("Failed to install tracing subscriber: {e}")))?;

    tracing::info!(
        correlation_id = %correlation_id,
        version = env!("CARGO_PKG_VERSION"),
        format = ?config.format,
        "Tracing initialized"
    );

    Ok(())
}
