//! Triggering source-control events.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of source-control event that triggered a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A pull request was opened or updated.
    PullRequest,
    /// Commits were pushed to a branch or tag.
    Push,
    /// Any other event type, kept verbatim.
    #[serde(untagged)]
    Other(String),
}

impl EventKind {
    /// Parse the hosting service's event name (e.g. `pull_request`).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "pull_request" => Self::PullRequest,
            "push" => Self::Push,
            other => Self::Other(other.to_string()),
        }
    }

    /// Whether this is a pull-request event.
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        matches!(self, Self::PullRequest)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PullRequest => f.write_str("pull_request"),
            Self::Push => f.write_str("push"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// The source-control event a run was triggered by.
///
/// Immutable for the duration of one reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunEvent {
    /// Repository owner (user or organization).
    pub organization: String,
    /// Repository name.
    pub repository: String,
    /// Head commit SHA.
    pub sha: String,
    /// Event kind.
    pub event_kind: EventKind,
    /// Pull request number, for pull-request events.
    pub pull_request_number: Option<u64>,
    /// App installation id; zero when no app-level capability is available.
    #[serde(default)]
    pub installation_id: i64,
}

impl RunEvent {
    /// Whether the check-run API can be used for this event.
    #[must_use]
    pub const fn has_app_installation(&self) -> bool {
        self.installation_id > 0
    }
}

impl fmt::Display for RunEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}@{} ({})",
            self.organization,
            self.repository,
            self.sha.get(..7).unwrap_or(&self.sha),
            self.event_kind
        )
    }
}
