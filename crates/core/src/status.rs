//! Status request vocabulary: lifecycle phase, outcome, and the per-call request.

use crate::run::RunObject;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of a run as seen by the hosting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Run is waiting to start.
    Queued,
    /// Run is executing.
    InProgress,
    /// Run has finished.
    Completed,
}

impl Phase {
    /// Wire name of the phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Run validated the commit.
    Success,
    /// Run failed.
    Failure,
    /// Run decided not to validate this commit.
    Skipped,
    /// Outcome is unknown.
    Neutral,
    /// No outcome yet.
    Pending,
    /// Run was cancelled.
    Cancelled,
}

impl Outcome {
    /// Wire name of the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Skipped => "skipped",
            Self::Neutral => "neutral",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input of one reconciliation call.
///
/// Built fresh per call. `title` and `summary` are rewritten by the
/// conclusion mapping before anything is submitted.
#[derive(Debug, Clone)]
pub struct StatusRequest {
    /// Name of the run; used as the check external id.
    pub run_name: String,
    /// Logical name of the run, composed into the check name and summary.
    pub original_run_name: Option<String>,
    /// Current lifecycle phase.
    pub phase: Phase,
    /// Current outcome.
    pub outcome: Outcome,
    /// Link to the run's logs or dashboard.
    pub details_url: String,
    /// Display title.
    pub title: String,
    /// Display summary.
    pub summary: String,
    /// Free-text body (usually the rendered task table).
    pub text: String,
    /// The run object, for label persistence and log inspection.
    pub run: Option<RunObject>,
}

impl StatusRequest {
    /// Create a request for `run_name` in the given phase and outcome.
    #[must_use]
    pub fn new(run_name: impl Into<String>, phase: Phase, outcome: Outcome) -> Self {
        Self {
            run_name: run_name.into(),
            original_run_name: None,
            phase,
            outcome,
            details_url: String::new(),
            title: String::new(),
            summary: String::new(),
            text: String::new(),
            run: None,
        }
    }

    /// Set the logical run name.
    #[must_use]
    pub fn with_original_run_name(mut self, name: impl Into<String>) -> Self {
        self.original_run_name = Some(name.into());
        self
    }

    /// Set the details URL.
    #[must_use]
    pub fn with_details_url(mut self, url: impl Into<String>) -> Self {
        self.details_url = url.into();
        self
    }

    /// Set the body text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Attach the run object.
    #[must_use]
    pub fn with_run(mut self, run: RunObject) -> Self {
        self.run = Some(run);
        self
    }

    /// The logical run name, if set and non-empty.
    #[must_use]
    pub fn original_name(&self) -> Option<&str> {
        self.original_run_name.as_deref().filter(|n| !n.is_empty())
    }
}
