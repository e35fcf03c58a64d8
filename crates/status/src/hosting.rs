//! Collaborator capabilities consumed by the reconciler.
//!
//! These traits abstract the hosting-service API, run-object patching and log
//! retrieval so reconciliation can run against octocrab (see `checkrun-github`)
//! or in-memory fakes in tests. Implementations classify their own failures
//! ([`Error::Discovery`](checkrun_core::Error::Discovery) for listing,
//! [`Error::Submission`](checkrun_core::Error::Submission) for writes,
//! [`Error::Persist`](checkrun_core::Error::Persist) for run patches); the
//! reconciler returns them unchanged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use checkrun_core::{MetadataPatch, Outcome, Phase, Result, RunEvent, RunObject};
use serde::{Deserialize, Serialize};

use crate::annotations::AnnotationRecord;

/// A check already present on a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingCheck {
    /// Check identifier.
    pub id: u64,
    /// External id set when the check was created.
    pub external_id: Option<String>,
    /// Output title.
    pub title: Option<String>,
    /// Output summary.
    pub summary: Option<String>,
}

/// Request to create a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCheckRun {
    /// Check name.
    pub name: String,
    /// Head commit SHA.
    pub head_sha: String,
    /// Initial status.
    pub status: Phase,
    /// Link to the run.
    pub details_url: String,
    /// Run name used to find the check again.
    pub external_id: String,
    /// When the check started.
    pub started_at: DateTime<Utc>,
}

/// Structured output of a check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckRunOutput {
    /// Output title.
    pub title: String,
    /// Output summary.
    pub summary: String,
    /// Output body.
    pub text: String,
    /// Inline diagnostics.
    pub annotations: Vec<AnnotationRecord>,
}

/// Request to update an existing check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRunUpdate {
    /// Check name.
    pub name: String,
    /// Current status.
    pub status: Phase,
    /// Output to display.
    pub output: CheckRunOutput,
    /// Completion time, set together with `conclusion`.
    pub completed_at: Option<DateTime<Utc>>,
    /// Final conclusion.
    pub conclusion: Option<Outcome>,
    /// Link to the run.
    pub details_url: Option<String>,
    /// Run name used to find the check again.
    pub external_id: Option<String>,
}

/// State of a flat commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitState {
    /// Run has not finished.
    Pending,
    /// Run succeeded.
    Success,
    /// Run failed.
    Failure,
    /// Run errored.
    Error,
}

/// Request to create a flat commit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitStatus {
    /// Status state.
    pub state: CommitState,
    /// Link to the run.
    pub target_url: String,
    /// Short description.
    pub description: String,
    /// Context string the status is grouped under.
    pub context: String,
}

/// Trailing log lines of one failed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLogSnippet {
    /// Task name.
    pub task_name: String,
    /// Log text, newline separated.
    pub log_snippet: String,
}

impl TaskLogSnippet {
    /// Create a new snippet.
    #[must_use]
    pub fn new(task_name: impl Into<String>, log_snippet: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            log_snippet: log_snippet.into(),
        }
    }
}

/// Check-run surface of the hosting service (requires an app installation).
#[async_trait]
pub trait CheckRunApi: Send + Sync {
    /// List checks on the event's commit, filtered by app identity when given.
    async fn list_check_runs(
        &self,
        event: &RunEvent,
        app_id: Option<u64>,
    ) -> Result<Vec<ExistingCheck>>;

    /// Create a check and return its identifier.
    async fn create_check_run(&self, event: &RunEvent, check: &NewCheckRun) -> Result<u64>;

    /// Update the check with the given identifier.
    async fn update_check_run(
        &self,
        event: &RunEvent,
        check_run_id: u64,
        update: &CheckRunUpdate,
    ) -> Result<()>;
}

/// Legacy commit-status surface of the hosting service.
#[async_trait]
pub trait CommitStatusApi: Send + Sync {
    /// Create a flat status on the event's commit.
    async fn create_status(&self, event: &RunEvent, status: &CommitStatus) -> Result<()>;

    /// Comment on an issue or pull request.
    async fn create_issue_comment(&self, event: &RunEvent, number: u64, body: &str)
    -> Result<()>;
}

/// Both hosting-service surfaces.
pub trait HostingService: CheckRunApi + CommitStatusApi {}

impl<T: CheckRunApi + CommitStatusApi> HostingService for T {}

/// Applies metadata patches to run objects.
#[async_trait]
pub trait RunPatcher: Send + Sync {
    /// Apply `patch` to `run`. Must be idempotent.
    async fn patch_run(&self, run: &RunObject, patch: &MetadataPatch) -> Result<()>;
}

/// Source of failed task logs.
#[async_trait]
pub trait FailedTaskLogs: Send + Sync {
    /// Trailing `max_lines` lines of each failed task of `run`, in task order.
    async fn failed_task_snippets(
        &self,
        run: &RunObject,
        max_lines: usize,
    ) -> Result<Vec<TaskLogSnippet>>;
}
