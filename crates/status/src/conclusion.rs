//! Display vocabulary for run outcomes.

use checkrun_core::{Outcome, PacOptions, Phase, StatusRequest};

/// Title of a check created for a skipped run.
pub const SKIPPED_TITLE: &str = "Skipped";

/// Summary phrase identifying a check created for a skipped run.
pub const SKIPPED_SUMMARY: &str = "is skipping this commit";

/// Title and summary shown for an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conclusion {
    /// Check title.
    pub title: &'static str,
    /// Summary, completed by the application name prefix.
    pub summary: &'static str,
}

/// Map an outcome and phase to display text.
///
/// `in_progress` overrides the outcome. Outcomes without a fixed text
/// (`pending`, `cancelled`) return `None` and keep the caller's text.
#[must_use]
pub const fn conclusion_text(outcome: Outcome, phase: Phase) -> Option<Conclusion> {
    if matches!(phase, Phase::InProgress) {
        return Some(Conclusion {
            title: "CI has Started",
            summary: "is running.",
        });
    }
    match outcome {
        Outcome::Success => Some(Conclusion {
            title: "Success",
            summary: "has successfully validated your commit.",
        }),
        Outcome::Failure => Some(Conclusion {
            title: "Failed",
            summary: "has failed.",
        }),
        Outcome::Skipped => Some(Conclusion {
            title: SKIPPED_TITLE,
            summary: "is skipping this commit.",
        }),
        Outcome::Neutral => Some(Conclusion {
            title: "Unknown",
            summary: "doesn't know what happened with this commit.",
        }),
        Outcome::Pending | Outcome::Cancelled => None,
    }
}

/// Prefix a summary with the application name and the original run name.
#[must_use]
pub fn compose_summary(application_name: &str, original_run_name: Option<&str>, summary: &str) -> String {
    let on_run = original_run_name.map(|name| format!("/{name}")).unwrap_or_default();
    format!("{application_name}{on_run} {summary}")
}

/// Rewrite the request's title and summary for display.
pub fn apply(options: &PacOptions, request: &mut StatusRequest) {
    if let Some(conclusion) = conclusion_text(request.outcome, request.phase) {
        request.title = conclusion.title.to_string();
        request.summary = conclusion.summary.to_string();
    }
    request.summary = compose_summary(
        &options.application_name,
        request.original_name(),
        &request.summary,
    );
}

/// Name of the check (or status context) for a request.
#[must_use]
pub fn check_name(options: &PacOptions, request: &StatusRequest) -> String {
    match (options.application_name.as_str(), request.original_name()) {
        ("", original) => original.unwrap_or_default().to_string(),
        (app, None) => app.to_string(),
        (app, Some(original)) => format!("{app} / {original}"),
    }
}
