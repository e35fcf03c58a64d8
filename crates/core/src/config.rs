//! Reconciler configuration.
//!
//! Settings are read from a TOML document with two tables:
//!
//! ```toml
//! [pac]
//! application_name = "Pipelines as Code CI"
//! error_detection = true
//! error_detection_max_number_of_lines = 50
//!
//! [logging]
//! format = "json"
//! level = "info"
//! ```

use crate::tracing::TracingConfig;
use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default display name of the application.
pub const DEFAULT_APPLICATION_NAME: &str = "Pipelines as Code CI";

/// Default pattern extracting `filename:line:column: error` diagnostics.
pub const DEFAULT_ERROR_DETECTION_REGEXP: &str =
    r"^(?P<filename>[^:]*):(?P<line>[0-9]+):(?P<column>[0-9]+)?([ ]*)?(?P<error>.*)";

/// Default number of trailing log lines inspected per failed task.
pub const DEFAULT_ERROR_DETECTION_LINES: usize = 50;

/// Capture groups the error detection pattern must define.
pub const REQUIRED_CAPTURE_GROUPS: [&str; 3] = ["filename", "line", "error"];

/// Rendering and diagnostics options for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PacOptions {
    /// Application name shown in check names and summaries.
    pub application_name: String,
    /// App identity used to filter check discovery on a commit.
    pub application_id: Option<u64>,
    /// Attach annotations extracted from failed task logs.
    pub error_detection: bool,
    /// Pattern with `filename`, `line` and `error` named groups.
    pub error_detection_simple_regexp: String,
    /// Trailing lines of each failed task's log to inspect.
    pub error_detection_max_number_of_lines: usize,
}

impl Default for PacOptions {
    fn default() -> Self {
        Self {
            application_name: DEFAULT_APPLICATION_NAME.to_string(),
            application_id: None,
            error_detection: false,
            error_detection_simple_regexp: DEFAULT_ERROR_DETECTION_REGEXP.to_string(),
            error_detection_max_number_of_lines: DEFAULT_ERROR_DETECTION_LINES,
        }
    }
}

impl PacOptions {
    /// Set the application name.
    #[must_use]
    pub fn with_application_name(mut self, name: impl Into<String>) -> Self {
        self.application_name = name.into();
        self
    }

    /// Enable error detection with the given pattern.
    #[must_use]
    pub fn with_error_detection(mut self, pattern: impl Into<String>) -> Self {
        self.error_detection = true;
        self.error_detection_simple_regexp = pattern.into();
        self
    }

    /// Check the error detection pattern.
    ///
    /// Returns the required capture groups the pattern is missing. Neither a
    /// missing group nor a bad pattern stops reconciliation; annotations are
    /// simply not produced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the pattern does not compile.
    pub fn validate(&self) -> Result<Vec<&'static str>> {
        let regex = Regex::new(&self.error_detection_simple_regexp).map_err(|e| {
            Error::config(format!("invalid error detection pattern: {e}"), None)
        })?;
        Ok(missing_capture_groups(&regex))
    }
}

/// Required capture groups `regex` does not define, in declaration order.
#[must_use]
pub fn missing_capture_groups(regex: &Regex) -> Vec<&'static str> {
    let names: Vec<&str> = regex.capture_names().flatten().collect();
    REQUIRED_CAPTURE_GROUPS
        .into_iter()
        .filter(|group| !names.contains(group))
        .collect()
}

/// Top-level settings document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Status rendering options.
    pub pac: PacOptions,
    /// Tracing output configuration.
    pub logging: TracingConfig,
}

impl Settings {
    /// Parse settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is not valid settings TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string(), None))
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if its content is not valid settings TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::config(e.to_string(), Some(path.into())))
    }
}
