//! Commit-status mode: one flat state per commit, for events without an app
//! installation.

use checkrun_core::{Error, Outcome, PacOptions, Phase, Result, RunEvent, StatusRequest};
use tracing::debug;

use crate::conclusion::check_name;
use crate::hosting::{CommitState, CommitStatus, HostingService};

pub(super) struct CommitStatusReporter<'a> {
    pub(super) hosting: &'a dyn HostingService,
}

impl CommitStatusReporter<'_> {
    pub(super) async fn report(
        &self,
        event: &RunEvent,
        options: &PacOptions,
        request: &StatusRequest,
    ) -> Result<()> {
        let status = CommitStatus {
            state: commit_state(request.phase, request.outcome),
            target_url: request.details_url.clone(),
            description: request.title.clone(),
            context: check_name(options, request),
        };
        self.hosting.create_status(event, &status).await?;
        debug!(state = ?status.state, context = %status.context, "Created commit status");

        // The flat status has no body, so completed output goes to the PR.
        if request.phase == Phase::Completed
            && !request.text.is_empty()
            && event.event_kind.is_pull_request()
        {
            let number = event.pull_request_number.ok_or_else(|| {
                Error::invalid_state(format!("pull request event on {event} has no number"))
            })?;
            let body = format!("{}<br>{}", request.summary, request.text);
            self.hosting
                .create_issue_comment(event, number, &body)
                .await?;
        }
        Ok(())
    }
}

/// State submitted for a phase and outcome.
///
/// The legacy API knows only pending/success/failure/error: `skipped` and
/// `neutral` become success, `in_progress` is always pending.
#[must_use]
pub const fn commit_state(phase: Phase, outcome: Outcome) -> CommitState {
    if matches!(phase, Phase::InProgress) {
        return CommitState::Pending;
    }
    match outcome {
        Outcome::Success | Outcome::Skipped | Outcome::Neutral => CommitState::Success,
        Outcome::Failure => CommitState::Failure,
        Outcome::Pending => CommitState::Pending,
        Outcome::Cancelled => CommitState::Error,
    }
}
