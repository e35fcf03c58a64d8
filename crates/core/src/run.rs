//! The run object as seen by reconciliation: labels, annotations and
//! cancellation state, plus the metadata patch written back to it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label key holding the persisted check identifier.
pub const CHECK_RUN_ID_LABEL: &str = "checkrun.dev/check-run-id";

/// Annotation key holding the details/log URL.
pub const LOG_URL_ANNOTATION: &str = "checkrun.dev/log-url";

/// Cancellation requested on a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelState {
    /// Cancelled immediately.
    Cancelled,
    /// Cancelled, but finally tasks still run.
    CancelledRunFinally,
    /// Stopped, remaining tasks are not scheduled but finally tasks run.
    StoppedRunFinally,
}

/// Identity and metadata of the run object a status belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunObject {
    /// Object name.
    pub name: String,
    /// Object namespace.
    pub namespace: String,
    /// Labels on the object.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Annotations on the object.
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    /// Cancellation requested on the run, if any.
    #[serde(default)]
    pub cancel_state: Option<CancelState>,
}

impl RunObject {
    /// Create a run object with no metadata.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Add a label.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Mark the run as cancelled or stopped.
    #[must_use]
    pub fn with_cancel_state(mut self, state: CancelState) -> Self {
        self.cancel_state = Some(state);
        self
    }

    /// Raw value of the persisted check id label.
    #[must_use]
    pub fn persisted_check_id(&self) -> Option<&str> {
        self.labels.get(CHECK_RUN_ID_LABEL).map(String::as_str)
    }

    /// Whether the run was cancelled, gracefully cancelled or gracefully stopped.
    #[must_use]
    pub const fn is_cancelled_or_stopped(&self) -> bool {
        self.cancel_state.is_some()
    }
}

/// JSON merge patch persisting a check id and log URL onto a run object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataPatch {
    metadata: PatchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct PatchMetadata {
    labels: BTreeMap<String, String>,
    annotations: BTreeMap<String, String>,
}

impl MetadataPatch {
    /// Patch labelling the run with `check_run_id` and annotating it with `log_url`.
    #[must_use]
    pub fn check_run(check_run_id: u64, log_url: &str) -> Self {
        Self {
            metadata: PatchMetadata {
                labels: BTreeMap::from([(
                    CHECK_RUN_ID_LABEL.to_string(),
                    check_run_id.to_string(),
                )]),
                annotations: BTreeMap::from([(
                    LOG_URL_ANNOTATION.to_string(),
                    log_url.to_string(),
                )]),
            },
        }
    }

    /// Labels set by this patch.
    #[must_use]
    pub const fn labels(&self) -> &BTreeMap<String, String> {
        &self.metadata.labels
    }

    /// Annotations set by this patch.
    #[must_use]
    pub const fn annotations(&self) -> &BTreeMap<String, String> {
        &self.metadata.annotations
    }

    /// Apply the patch to a local copy of the run object.
    pub fn apply_to(&self, run: &mut RunObject) {
        run.labels.extend(self.metadata.labels.clone());
        run.annotations.extend(self.metadata.annotations.clone());
    }
}
