//! Error types for status reconciliation.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for checkrun operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by status reconciliation.
///
/// Every variant except [`Error::Config`] and [`Error::Io`] corresponds to a
/// failure class of one reconciliation call. None of them are retried by this
/// crate; the caller owns any retry policy.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// No hosting-service capability is configured (no token or URL).
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(checkrun::configuration),
        help("Provide a hosting-service token before reporting status")
    )]
    Configuration(String),

    /// Listing existing checks on the commit failed.
    #[error("Check discovery failed: {message}")]
    #[diagnostic(code(checkrun::discovery))]
    Discovery {
        /// The error message
        message: String,
    },

    /// Writing the check identifier back onto the run object failed.
    #[error("Failed to persist check id on run '{run}': {message}")]
    #[diagnostic(
        code(checkrun::persist),
        help("The next reconciliation of this run will create a duplicate check")
    )]
    Persist {
        /// The run whose metadata could not be patched
        run: String,
        /// The error message
        message: String,
    },

    /// Creating or updating a check, status or comment failed.
    #[error("{operation} failed: {message}")]
    #[diagnostic(code(checkrun::submission))]
    Submission {
        /// The hosting-service operation that failed
        operation: &'static str,
        /// The error message
        message: String,
    },

    /// Internal state that should never occur (e.g. an unparseable check id).
    #[error("Invalid state: {0}")]
    #[diagnostic(code(checkrun::invalid_state))]
    InvalidState(String),

    /// Configuration file could not be read or parsed.
    #[error("Invalid configuration in {}: {message}", path.as_ref().map_or_else(|| "<inline>".to_string(), |p| p.display().to_string()))]
    #[diagnostic(code(checkrun::config))]
    Config {
        /// The error message
        message: String,
        /// The configuration file, when loaded from disk
        path: Option<PathBuf>,
    },

    /// Wrapped I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(checkrun::io))]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new discovery error.
    #[must_use]
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery {
            message: message.into(),
        }
    }

    /// Create a new persist error.
    #[must_use]
    pub fn persist(run: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Persist {
            run: run.into(),
            message: message.into(),
        }
    }

    /// Create a new submission error.
    #[must_use]
    pub fn submission(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Submission {
            operation,
            message: message.into(),
        }
    }

    /// Create a new invalid state error.
    #[must_use]
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create a new configuration file error.
    #[must_use]
    pub fn config(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path,
        }
    }
}
