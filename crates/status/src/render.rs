//! Task table rendering for status bodies.

use chrono::{DateTime, Utc};
use checkrun_core::Outcome;
use html_escape::encode_double_quoted_attribute;

/// One task of a run, as listed in the status body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRunSummary {
    /// Task name.
    pub name: String,
    /// Task outcome (`Pending` while running).
    pub outcome: Outcome,
    /// When the task started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the task finished.
    pub completed_at: Option<DateTime<Utc>>,
    /// Link to the task's console log.
    pub console_url: Option<String>,
}

/// Render the HTML task table placed in a status body.
///
/// Check-run output and pull-request comments both accept inline HTML.
#[must_use]
pub fn render_task_table(tasks: &[TaskRunSummary]) -> String {
    let mut html = String::from("\n<table>\n  <tr><th>Status</th><th>Duration</th><th>Name</th></tr>\n");

    for task in tasks {
        // Attribute encoding also covers element content.
        let name = encode_double_quoted_attribute(&task.name);
        let name = match task.console_url.as_deref() {
            Some(url) => format!("<a href=\"{}\">{name}</a>", encode_double_quoted_attribute(url)),
            None => name.into_owned(),
        };
        html.push_str(&format!(
            "<tr>\n<td>{}</td>\n<td>{}</td><td>\n\n{name}\n\n</td></tr>\n",
            format_status(task.outcome),
            format_duration(task.started_at, task.completed_at),
        ));
    }

    html.push_str("</table>");
    html
}

fn format_status(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Success => "\u{2705} Succeeded",
        Outcome::Failure => "\u{274c} Failed",
        Outcome::Skipped => "\u{23ed}\u{fe0f} Skipped",
        Outcome::Neutral => "\u{2754} Unknown",
        Outcome::Pending => "\u{1f504} Running",
        Outcome::Cancelled => "\u{26d4} Cancelled",
    }
}

/// Human-readable duration between two timestamps, `---` when unknown.
fn format_duration(started: Option<DateTime<Utc>>, completed: Option<DateTime<Utc>>) -> String {
    let (Some(started), Some(completed)) = (started, completed) else {
        return "---".to_string();
    };
    let secs = (completed - started).num_seconds().max(0);
    match secs {
        0..60 => format!("{secs}s"),
        60..3600 => format!("{}m {}s", secs / 60, secs % 60),
        _ => format!("{}h {}m", secs / 3600, (secs % 3600) / 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).single()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(at(0), at(42)), "42s");
        assert_eq!(format_duration(at(0), at(125)), "2m 5s");
        assert_eq!(format_duration(at(0), at(7_260)), "2h 1m");
        assert_eq!(format_duration(at(0), None), "---");
        assert_eq!(format_duration(at(10), at(0)), "0s");
    }

    #[test]
    fn test_render_task_table() {
        let tasks = vec![
            TaskRunSummary {
                name: "fetch".to_string(),
                outcome: Outcome::Success,
                started_at: at(0),
                completed_at: at(3),
                console_url: Some("https://console/fetch".to_string()),
            },
            TaskRunSummary {
                name: "test".to_string(),
                outcome: Outcome::Failure,
                started_at: at(3),
                completed_at: None,
                console_url: None,
            },
        ];

        let html = render_task_table(&tasks);
        assert!(html.starts_with("\n<table>"));
        assert!(html.ends_with("</table>"));
        assert!(html.contains("<a href=\"https://console/fetch\">fetch</a>"));
        assert!(html.contains("\u{2705} Succeeded</td>\n<td>3s</td>"));
        assert!(html.contains("\u{274c} Failed</td>\n<td>---</td>"));
        assert_eq!(html.matches("<tr>\n").count(), 2);
    }

    #[test]
    fn test_render_escapes_name_and_url() {
        let tasks = vec![TaskRunSummary {
            name: "lint <fast> & \"strict\"".to_string(),
            outcome: Outcome::Skipped,
            started_at: None,
            completed_at: None,
            console_url: Some("https://console/t?a=1&b=\"x\"".to_string()),
        }];

        let html = render_task_table(&tasks);
        assert!(html.contains(
            "<a href=\"https://console/t?a=1&amp;b=&quot;x&quot;\">lint &lt;fast&gt; &amp; &quot;strict&quot;</a>"
        ));
        assert!(!html.contains("<fast>"));
        assert_eq!(html.matches("<tr>\n").count(), 1);
    }

    #[test]
    fn test_render_escapes_unlinked_name() {
        let tasks = vec![TaskRunSummary {
            name: "<script>".to_string(),
            outcome: Outcome::Pending,
            started_at: None,
            completed_at: None,
            console_url: None,
        }];
        assert!(render_task_table(&tasks).contains("\n\n&lt;script&gt;\n\n"));
    }

    #[test]
    fn test_render_empty_table() {
        let html = render_task_table(&[]);
        assert!(html.contains("<th>Status</th>"));
        assert!(!html.contains("<td>"));
    }
}
