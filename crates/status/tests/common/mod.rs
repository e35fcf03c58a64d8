//! Recording fakes for the reconciler's collaborators.

#![allow(dead_code, clippy::unwrap_used)]

use async_trait::async_trait;
use checkrun_core::{Error, EventKind, MetadataPatch, Result, RunEvent, RunObject};
use checkrun_status::{
    CheckRunApi, CheckRunUpdate, CommitStatus, CommitStatusApi, ExistingCheck, FailedTaskLogs,
    NewCheckRun, RunPatcher, TaskLogSnippet,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Ordered record of collaborator calls shared between fakes.
pub type Journal = Arc<Mutex<Vec<&'static str>>>;

fn note(journal: Option<&Journal>, entry: &'static str) {
    if let Some(journal) = journal {
        journal.lock().unwrap().push(entry);
    }
}

/// A call made against the fake hosting service.
#[derive(Debug, Clone, PartialEq)]
pub enum HostingCall {
    List { app_id: Option<u64> },
    Create(NewCheckRun),
    Update { id: u64, update: CheckRunUpdate },
    Status(CommitStatus),
    Comment { number: u64, body: String },
}

/// Hosting service recording every call.
#[derive(Default)]
pub struct FakeHosting {
    pub existing: Mutex<Vec<ExistingCheck>>,
    pub calls: Mutex<Vec<HostingCall>>,
    next_id: AtomicU64,
    journal: Option<Journal>,
    pub fail_list: bool,
    pub fail_create: bool,
    pub fail_update: bool,
}

impl FakeHosting {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1000),
            ..Self::default()
        }
    }

    pub fn with_existing(self, checks: Vec<ExistingCheck>) -> Self {
        *self.existing.lock().unwrap() = checks;
        self
    }

    pub fn with_journal(mut self, journal: &Journal) -> Self {
        self.journal = Some(Arc::clone(journal));
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_update(mut self) -> Self {
        self.fail_update = true;
        self
    }

    pub fn calls(&self) -> Vec<HostingCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&HostingCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn updates(&self) -> Vec<(u64, CheckRunUpdate)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HostingCall::Update { id, update } => Some((id, update)),
                _ => None,
            })
            .collect()
    }

    pub fn statuses(&self) -> Vec<CommitStatus> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HostingCall::Status(status) => Some(status),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: HostingCall) {
        let entry = match &call {
            HostingCall::List { .. } => "list",
            HostingCall::Create(_) => "create",
            HostingCall::Update { .. } => "update",
            HostingCall::Status(_) => "status",
            HostingCall::Comment { .. } => "comment",
        };
        note(self.journal.as_ref(), entry);
        self.calls.lock().unwrap().push(call);
    }
}

pub fn is_list(call: &HostingCall) -> bool {
    matches!(call, HostingCall::List { .. })
}

pub fn is_create(call: &HostingCall) -> bool {
    matches!(call, HostingCall::Create(_))
}

pub fn is_update(call: &HostingCall) -> bool {
    matches!(call, HostingCall::Update { .. })
}

pub fn is_comment(call: &HostingCall) -> bool {
    matches!(call, HostingCall::Comment { .. })
}

#[async_trait]
impl CheckRunApi for FakeHosting {
    async fn list_check_runs(
        &self,
        _event: &RunEvent,
        app_id: Option<u64>,
    ) -> Result<Vec<ExistingCheck>> {
        self.record(HostingCall::List { app_id });
        if self.fail_list {
            return Err(Error::discovery("503 Service Unavailable"));
        }
        Ok(self.existing.lock().unwrap().clone())
    }

    async fn create_check_run(&self, _event: &RunEvent, check: &NewCheckRun) -> Result<u64> {
        self.record(HostingCall::Create(check.clone()));
        if self.fail_create {
            return Err(Error::submission("Create check run", "403 Forbidden"));
        }
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }

    async fn update_check_run(
        &self,
        _event: &RunEvent,
        check_run_id: u64,
        update: &CheckRunUpdate,
    ) -> Result<()> {
        self.record(HostingCall::Update {
            id: check_run_id,
            update: update.clone(),
        });
        if self.fail_update {
            return Err(Error::submission("Update check run", "422 Unprocessable Entity"));
        }
        Ok(())
    }
}

#[async_trait]
impl CommitStatusApi for FakeHosting {
    async fn create_status(&self, _event: &RunEvent, status: &CommitStatus) -> Result<()> {
        self.record(HostingCall::Status(status.clone()));
        Ok(())
    }

    async fn create_issue_comment(&self, _event: &RunEvent, number: u64, body: &str) -> Result<()> {
        self.record(HostingCall::Comment {
            number,
            body: body.to_string(),
        });
        Ok(())
    }
}

/// Run patcher recording every patch.
#[derive(Default)]
pub struct FakePatcher {
    pub patches: Mutex<Vec<(String, MetadataPatch)>>,
    pub fail: bool,
    journal: Option<Journal>,
}

impl FakePatcher {
    pub fn with_journal(journal: &Journal) -> Self {
        Self {
            journal: Some(Arc::clone(journal)),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn patches(&self) -> Vec<(String, MetadataPatch)> {
        self.patches.lock().unwrap().clone()
    }
}

#[async_trait]
impl RunPatcher for FakePatcher {
    async fn patch_run(&self, run: &RunObject, patch: &MetadataPatch) -> Result<()> {
        note(self.journal.as_ref(), "patch");
        self.patches
            .lock()
            .unwrap()
            .push((run.name.clone(), patch.clone()));
        if self.fail {
            return Err(Error::persist(&run.name, "the object has been modified"));
        }
        Ok(())
    }
}

/// Log source returning fixed snippets.
#[derive(Default)]
pub struct FakeLogs {
    pub snippets: Vec<TaskLogSnippet>,
    pub requests: Mutex<Vec<usize>>,
    pub fail: bool,
}

impl FakeLogs {
    pub fn with_snippets(snippets: Vec<TaskLogSnippet>) -> Self {
        Self {
            snippets,
            ..Self::default()
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl FailedTaskLogs for FakeLogs {
    async fn failed_task_snippets(
        &self,
        _run: &RunObject,
        max_lines: usize,
    ) -> Result<Vec<TaskLogSnippet>> {
        self.requests.lock().unwrap().push(max_lines);
        if self.fail {
            return Err(Error::configuration("pod logs unavailable"));
        }
        Ok(self.snippets.clone())
    }
}

pub fn pull_request_event(installation_id: i64) -> RunEvent {
    RunEvent {
        organization: "owner".to_string(),
        repository: "repo".to_string(),
        sha: "6d5c8bd1bd0a2a7ef3a8e6cbc3a4b7f0b6b0e0f1".to_string(),
        event_kind: EventKind::PullRequest,
        pull_request_number: Some(42),
        installation_id,
    }
}

pub fn push_event(installation_id: i64) -> RunEvent {
    RunEvent {
        event_kind: EventKind::Push,
        pull_request_number: None,
        ..pull_request_event(installation_id)
    }
}
