//! Check-run mode: one check object per run, reused across reconciliations.

use chrono::Utc;
use checkrun_core::{
    CheckHandle, Error, MetadataPatch, Outcome, PacOptions, Phase, Result, RunEvent,
    StatusRequest,
};
use tracing::{debug, info, warn};

use crate::annotations::{AnnotationRecord, extract_annotations};
use crate::conclusion::{SKIPPED_SUMMARY, SKIPPED_TITLE, check_name};
use crate::hosting::{
    CheckRunOutput, CheckRunUpdate, ExistingCheck, FailedTaskLogs, HostingService, NewCheckRun,
    RunPatcher,
};
use crate::registry::CheckRegistry;

pub(super) struct CheckRunReporter<'a> {
    pub(super) hosting: &'a dyn HostingService,
    pub(super) patcher: &'a dyn RunPatcher,
    pub(super) logs: &'a dyn FailedTaskLogs,
    pub(super) registry: &'a CheckRegistry,
}

impl CheckRunReporter<'_> {
    pub(super) async fn report(
        &self,
        event: &RunEvent,
        options: &PacOptions,
        request: &StatusRequest,
    ) -> Result<CheckHandle> {
        let check_run_id = match persisted_check_id(request)? {
            Some(id) => {
                debug!(check_run_id = id, "Reusing check id persisted on run");
                id
            }
            None => {
                let id = match self.find_existing(event, options, request).await? {
                    Some(id) => id,
                    None => self.create(event, options, request).await?,
                };
                self.persist(request, id).await?;
                id
            }
        };

        let update = self.build_update(options, request).await;
        self.hosting
            .update_check_run(event, check_run_id, &update)
            .await?;

        Ok(CheckHandle::new(check_run_id, request.run_name.clone()))
    }

    async fn find_existing(
        &self,
        event: &RunEvent,
        options: &PacOptions,
        request: &StatusRequest,
    ) -> Result<Option<u64>> {
        let checks = self
            .hosting
            .list_check_runs(event, options.application_id)
            .await?;

        for check in &checks {
            if is_skipped_check(check) && self.registry.try_claim_skip_slot(check.id) {
                info!(check_run_id = check.id, "Reusing skipped check run");
                return Ok(Some(check.id));
            }
            if check.external_id.as_deref() == Some(request.run_name.as_str()) {
                debug!(check_run_id = check.id, "Found check run by external id");
                return Ok(Some(check.id));
            }
        }
        Ok(None)
    }

    async fn create(
        &self,
        event: &RunEvent,
        options: &PacOptions,
        request: &StatusRequest,
    ) -> Result<u64> {
        let check = NewCheckRun {
            name: check_name(options, request),
            head_sha: event.sha.clone(),
            status: Phase::InProgress,
            details_url: request.details_url.clone(),
            external_id: request.run_name.clone(),
            started_at: Utc::now(),
        };
        let id = self.hosting.create_check_run(event, &check).await?;
        info!(check_run_id = id, name = %check.name, "Created check run");
        Ok(id)
    }

    async fn persist(&self, request: &StatusRequest, check_run_id: u64) -> Result<()> {
        let Some(run) = &request.run else {
            return Ok(());
        };
        let patch = MetadataPatch::check_run(check_run_id, &request.details_url);
        self.patcher.patch_run(run, &patch).await
    }

    async fn build_update(&self, options: &PacOptions, request: &StatusRequest) -> CheckRunUpdate {
        let mut update = CheckRunUpdate {
            name: check_name(options, request),
            status: request.phase,
            output: CheckRunOutput {
                title: request.title.clone(),
                summary: request.summary.clone(),
                text: request.text.clone(),
                annotations: self.annotations(options, request).await,
            },
            completed_at: None,
            conclusion: None,
            details_url: Some(request.details_url.clone()).filter(|url| !url.is_empty()),
            external_id: Some(request.run_name.clone()).filter(|name| !name.is_empty()),
        };

        if request.phase == Phase::Completed && request.outcome != Outcome::Pending {
            update.completed_at = Some(Utc::now());
            update.conclusion = Some(request.outcome);
        }
        if request
            .run
            .as_ref()
            .is_some_and(checkrun_core::RunObject::is_cancelled_or_stopped)
        {
            update.completed_at.get_or_insert_with(Utc::now);
            update.conclusion = Some(Outcome::Cancelled);
        }
        update
    }

    async fn annotations(&self, options: &PacOptions, request: &StatusRequest) -> Vec<AnnotationRecord> {
        if !options.error_detection || request.outcome != Outcome::Failure {
            return Vec::new();
        }
        let Some(run) = &request.run else {
            return Vec::new();
        };
        match self
            .logs
            .failed_task_snippets(run, options.error_detection_max_number_of_lines)
            .await
        {
            Ok(snippets) => extract_annotations(&options.error_detection_simple_regexp, &snippets),
            Err(e) => {
                warn!(error = %e, run = %run.name, "Failed to collect failed task logs");
                Vec::new()
            }
        }
    }
}

/// Whether a check was created for a skipped run.
#[must_use]
pub fn is_skipped_check(check: &ExistingCheck) -> bool {
    check.title.as_deref() == Some(SKIPPED_TITLE)
        && check
            .summary
            .as_deref()
            .is_some_and(|summary| summary.contains(SKIPPED_SUMMARY))
}

fn persisted_check_id(request: &StatusRequest) -> Result<Option<u64>> {
    let Some(raw) = request.run.as_ref().and_then(|run| run.persisted_check_id()) else {
        return Ok(None);
    };
    raw.parse()
        .map(Some)
        .map_err(|_| Error::invalid_state(format!("cannot convert check run id '{raw}'")))
}
