//! Status reconciliation
//!
//! [`StatusReconciler::report_status`] turns one run lifecycle change into
//! hosting-service calls. The mode is chosen once per call from the event:
//! events carrying an app installation use check runs, everything else uses
//! flat commit statuses.
//!
//! No call is retried here. Discovery followed by creation is not atomic
//! against the hosting service; two concurrent first reconciliations of the
//! same run can both create a check. The check id persisted on the run object
//! closes that window for every later reconciliation.

mod check_run;
mod commit_status;

pub use check_run::is_skipped_check;
pub use commit_status::commit_state;

use checkrun_core::{CheckHandle, Error, PacOptions, Result, RunEvent, StatusRequest};
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;

use crate::conclusion;
use crate::hosting::{FailedTaskLogs, HostingService, RunPatcher};
use crate::registry::CheckRegistry;
use check_run::CheckRunReporter;
use commit_status::CommitStatusReporter;

/// Hosting-service surface used for one reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// Rich per-run check objects (app installations only).
    CheckRun,
    /// Legacy flat commit statuses.
    CommitStatus,
}

impl ReportMode {
    /// Select the mode for an event.
    #[must_use]
    pub const fn for_event(event: &RunEvent) -> Self {
        if event.has_app_installation() {
            Self::CheckRun
        } else {
            Self::CommitStatus
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckRun => f.write_str("check_run"),
            Self::CommitStatus => f.write_str("commit_status"),
        }
    }
}

/// Reconciles run lifecycle changes with the hosting service.
///
/// One reconciler serves one provider session. It is shared across
/// concurrent reconciliations; the only state it carries is the
/// [`CheckRegistry`] skip slot.
pub struct StatusReconciler {
    hosting: Option<Arc<dyn HostingService>>,
    patcher: Arc<dyn RunPatcher>,
    logs: Arc<dyn FailedTaskLogs>,
    registry: CheckRegistry,
}

impl StatusReconciler {
    /// Create a reconciler.
    ///
    /// `hosting` is `None` when no token or URL is configured; every report
    /// then fails with a configuration error.
    #[must_use]
    pub fn new(
        hosting: Option<Arc<dyn HostingService>>,
        patcher: Arc<dyn RunPatcher>,
        logs: Arc<dyn FailedTaskLogs>,
    ) -> Self {
        Self {
            hosting,
            patcher,
            logs,
            registry: CheckRegistry::new(),
        }
    }

    /// The skipped-check registry of this session.
    #[must_use]
    pub const fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Report `request` for the run triggered by `event`.
    ///
    /// Returns the check used in check-run mode and `None` in commit-status
    /// mode. Errors from the hosting service and the run patcher are returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] when no hosting capability is configured
    /// - [`Error::InvalidState`] when the persisted check id is not a number
    /// - any error of the hosting service or run patcher
    pub async fn report_status(
        &self,
        event: &RunEvent,
        options: &PacOptions,
        mut request: StatusRequest,
    ) -> Result<Option<CheckHandle>> {
        let Some(hosting) = self.hosting.as_deref() else {
            return Err(Error::configuration(
                "cannot set status: no hosting-service token or url set",
            ));
        };

        conclusion::apply(options, &mut request);

        let mode = ReportMode::for_event(event);
        let span = tracing::info_span!(
            "report_status",
            run = %request.run_name,
            sha = %event.sha,
            mode = %mode,
        );

        async {
            match mode {
                ReportMode::CheckRun => CheckRunReporter {
                    hosting,
                    patcher: self.patcher.as_ref(),
                    logs: self.logs.as_ref(),
                    registry: &self.registry,
                }
                .report(event, options, &request)
                .await
                .map(Some),
                ReportMode::CommitStatus => CommitStatusReporter { hosting }
                    .report(event, options, &request)
                    .await
                    .map(|()| None),
            }
        }
        .instrument(span)
        .await
    }
}
