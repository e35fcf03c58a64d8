//! Status reconciliation for CI runs.
//!
//! Represents "this run started / is progressing / finished with outcome X"
//! as a check run or commit status on the hosting service:
//!
//! - [`conclusion`] maps outcomes to display text
//! - [`annotations`] extracts file/line diagnostics from failed task logs
//! - [`registry`] lets a batch of skipped commits share one skipped check
//! - [`reconciler`] drives the hosting service and run-object patching
//!
//! The hosting service, run patching and log retrieval are consumed through
//! the traits in [`hosting`].

pub mod annotations;
pub mod conclusion;
pub mod hosting;
pub mod reconciler;
pub mod registry;
pub mod render;

pub use annotations::{AnnotationExtractor, AnnotationLevel, AnnotationRecord, extract_annotations};
pub use conclusion::{Conclusion, check_name, conclusion_text};
pub use hosting::{
    CheckRunApi, CheckRunOutput, CheckRunUpdate, CommitState, CommitStatus, CommitStatusApi,
    ExistingCheck, FailedTaskLogs, HostingService, NewCheckRun, RunPatcher, TaskLogSnippet,
};
pub use reconciler::{ReportMode, StatusReconciler};
pub use registry::CheckRegistry;
pub use render::{TaskRunSummary, render_task_table};
