//! REST payloads for the check-run and commit-status endpoints.

use chrono::{DateTime, Utc};
use checkrun_core::{Outcome, Phase};
use checkrun_status::{
    AnnotationLevel, AnnotationRecord, CheckRunOutput, CheckRunUpdate, CommitState, CommitStatus,
    ExistingCheck, NewCheckRun,
};
use serde::{Deserialize, Serialize};

/// The API rejects requests carrying more annotations than this.
pub const MAX_ANNOTATIONS_PER_REQUEST: usize = 50;

/// Page size used when listing check runs.
pub const CHECK_RUNS_PER_PAGE: u8 = 100;

/// Query of `GET /repos/{owner}/{repo}/commits/{sha}/check-runs`.
#[derive(Debug, Serialize)]
pub struct ListCheckRunsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<u64>,
    pub per_page: u8,
    pub page: u32,
}

/// Response of the list endpoint.
#[derive(Debug, Deserialize)]
pub struct CheckRunsPage {
    pub total_count: u64,
    #[serde(default)]
    pub check_runs: Vec<CheckRunItem>,
}

#[derive(Debug, Deserialize)]
pub struct CheckRunItem {
    pub id: u64,
    pub external_id: Option<String>,
    #[serde(default)]
    pub output: CheckRunItemOutput,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckRunItemOutput {
    pub title: Option<String>,
    pub summary: Option<String>,
}

impl From<CheckRunItem> for ExistingCheck {
    fn from(item: CheckRunItem) -> Self {
        Self {
            id: item.id,
            external_id: item.external_id.filter(|id| !id.is_empty()),
            title: item.output.title,
            summary: item.output.summary,
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/check-runs`.
#[derive(Debug, Serialize)]
pub struct CreateCheckRunBody<'a> {
    pub name: &'a str,
    pub head_sha: &'a str,
    pub status: Phase,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub details_url: &'a str,
    pub external_id: &'a str,
    pub started_at: DateTime<Utc>,
}

impl<'a> From<&'a NewCheckRun> for CreateCheckRunBody<'a> {
    fn from(check: &'a NewCheckRun) -> Self {
        Self {
            name: &check.name,
            head_sha: &check.head_sha,
            status: check.status,
            details_url: &check.details_url,
            external_id: &check.external_id,
            started_at: check.started_at,
        }
    }
}

/// Response of create and update calls; only the id is read.
#[derive(Debug, Deserialize)]
pub struct CheckRunRef {
    pub id: u64,
}

/// Body of `PATCH /repos/{owner}/{repo}/check-runs/{id}`.
#[derive(Debug, Serialize)]
pub struct UpdateCheckRunBody<'a> {
    pub name: &'a str,
    pub status: Phase,
    pub output: OutputBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<&'a str>,
}

impl<'a> From<&'a CheckRunUpdate> for UpdateCheckRunBody<'a> {
    fn from(update: &'a CheckRunUpdate) -> Self {
        Self {
            name: &update.name,
            status: update.status,
            output: OutputBody::from(&update.output),
            conclusion: update.conclusion,
            completed_at: update.completed_at,
            details_url: update.details_url.as_deref(),
            external_id: update.external_id.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OutputBody<'a> {
    pub title: &'a str,
    pub summary: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub text: &'a str,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub annotations: Vec<AnnotationBody<'a>>,
}

impl<'a> From<&'a CheckRunOutput> for OutputBody<'a> {
    fn from(output: &'a CheckRunOutput) -> Self {
        if output.annotations.len() > MAX_ANNOTATIONS_PER_REQUEST {
            tracing::warn!(
                total = output.annotations.len(),
                kept = MAX_ANNOTATIONS_PER_REQUEST,
                "Too many annotations for one check update, truncating"
            );
        }
        Self {
            title: &output.title,
            summary: &output.summary,
            text: &output.text,
            annotations: output
                .annotations
                .iter()
                .take(MAX_ANNOTATIONS_PER_REQUEST)
                .map(AnnotationBody::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnnotationBody<'a> {
    pub path: &'a str,
    pub start_line: u32,
    pub end_line: u32,
    pub annotation_level: AnnotationLevel,
    pub message: &'a str,
}

impl<'a> From<&'a AnnotationRecord> for AnnotationBody<'a> {
    fn from(record: &'a AnnotationRecord) -> Self {
        Self {
            path: &record.path,
            start_line: record.start_line,
            end_line: record.end_line,
            annotation_level: record.level,
            message: &record.message,
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/statuses/{sha}`.
#[derive(Debug, Serialize)]
pub struct CreateStatusBody<'a> {
    pub state: CommitState,
    #[serde(skip_serializing_if = "str::is_empty")]
    pub target_url: &'a str,
    pub description: &'a str,
    pub context: &'a str,
}

impl<'a> From<&'a CommitStatus> for CreateStatusBody<'a> {
    fn from(status: &'a CommitStatus) -> Self {
        Self {
            state: status.state,
            target_url: &status.target_url,
            description: &status.description,
            context: &status.context,
        }
    }
}
