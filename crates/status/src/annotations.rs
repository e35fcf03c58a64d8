//! Failure log to annotation extraction
//!
//! Matches every line of each failed task's log snippet against a
//! user-supplied pattern with `filename`, `line` and `error` named groups and
//! turns each match into an [`AnnotationRecord`]. Extraction is best effort:
//! a bad pattern or an unparseable line is logged and skipped, never returned
//! to the caller.

use checkrun_core::config::missing_capture_groups;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::hosting::TaskLogSnippet;

/// Severity of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    /// Informational.
    Notice,
    /// Warning.
    Warning,
    /// Failure.
    Failure,
}

/// A file/line diagnostic attached to a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRecord {
    /// Repository-relative path, without a leading `./`.
    pub path: String,
    /// First line (1-based).
    pub start_line: u32,
    /// Last line (1-based).
    pub end_line: u32,
    /// Severity.
    pub level: AnnotationLevel,
    /// Diagnostic message.
    pub message: String,
}

/// Compiled extraction pattern.
#[derive(Debug, Clone)]
pub struct AnnotationExtractor {
    regex: Regex,
    missing_groups: Vec<&'static str>,
}

impl AnnotationExtractor {
    /// Compile an extraction pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile. A pattern that
    /// compiles but lacks required groups is accepted; see
    /// [`missing_groups`](Self::missing_groups).
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        let missing_groups = missing_capture_groups(&regex);
        Ok(Self {
            regex,
            missing_groups,
        })
    }

    /// Required capture groups the pattern does not define.
    #[must_use]
    pub fn missing_groups(&self) -> &[&'static str] {
        &self.missing_groups
    }

    /// Extract annotations from snippets, in task then line order.
    #[must_use]
    pub fn extract(&self, snippets: &[TaskLogSnippet]) -> Vec<AnnotationRecord> {
        if !self.missing_groups.is_empty() {
            tracing::error!(
                pattern = %self.regex.as_str(),
                missing = ?self.missing_groups,
                "Failure pattern lacks required capture groups, no annotations extracted"
            );
            return Vec::new();
        }

        snippets
            .iter()
            .flat_map(|snippet| {
                snippet
                    .log_snippet
                    .lines()
                    .filter_map(move |line| self.parse_line(&snippet.task_name, line))
            })
            .collect()
    }

    fn parse_line(&self, task: &str, line: &str) -> Option<AnnotationRecord> {
        let caps = self.regex.captures(line)?;
        let (Some(filename), Some(line_number), Some(message)) = (
            group(&caps, "filename"),
            group(&caps, "line"),
            group(&caps, "error"),
        ) else {
            tracing::debug!(task, line, "Failure pattern matched without all groups");
            return None;
        };

        let line_number = match line_number.parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => {
                tracing::warn!(task, value = line_number, "Cannot convert line number to a positive integer");
                return None;
            }
        };

        Some(AnnotationRecord {
            path: filename.strip_prefix("./").unwrap_or(filename).to_string(),
            start_line: line_number,
            end_line: line_number,
            level: AnnotationLevel::Failure,
            message: message.to_string(),
        })
    }
}

fn group<'h>(caps: &Captures<'h>, name: &str) -> Option<&'h str> {
    caps.name(name).map(|m| m.as_str())
}

/// Compile `pattern` and extract annotations from `snippets`.
///
/// A pattern that does not compile yields no annotations.
#[must_use]
pub fn extract_annotations(pattern: &str, snippets: &[TaskLogSnippet]) -> Vec<AnnotationRecord> {
    match AnnotationExtractor::new(pattern) {
        Ok(extractor) => extractor.extract(snippets),
        Err(e) => {
            tracing::error!(pattern, error = %e, "Invalid regexp for filtering failure messages");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERN: &str = r"^(?P<filename>[^:]+):(?P<line>[^:]+): (?P<error>.*)$";

    fn snippet(log: &str) -> Vec<TaskLogSnippet> {
        vec![TaskLogSnippet::new("build", log)]
    }

    #[test]
    fn test_single_match() {
        let annotations = extract_annotations(PATTERN, &snippet("main.go:42: syntax error near 'x'"));

        assert_eq!(
            annotations,
            vec![AnnotationRecord {
                path: "main.go".to_string(),
                start_line: 42,
                end_line: 42,
                level: AnnotationLevel::Failure,
                message: "syntax error near 'x'".to_string(),
            }]
        );
    }

    #[test]
    fn test_strips_leading_dot_slash() {
        let annotations = extract_annotations(PATTERN, &snippet("./pkg/foo.go:3: undefined: bar"));
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].path, "pkg/foo.go");
    }

    #[test]
    fn test_only_first_dot_slash_is_stripped() {
        let annotations = extract_annotations(PATTERN, &snippet("././a.go:1: x"));
        assert_eq!(annotations[0].path, "./a.go");
    }

    #[test]
    fn test_skips_unmatched_and_non_numeric_lines() {
        let log = "go: downloading modules\nmain.go:N/A: unknown\nmain.go:7: boom\n";
        let annotations = extract_annotations(PATTERN, &snippet(log));

        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].start_line, 7);
        assert_eq!(annotations[0].message, "boom");
    }

    #[test]
    fn test_skips_line_zero() {
        assert!(extract_annotations(PATTERN, &snippet("main.go:0: boom")).is_empty());
    }

    #[test]
    fn test_preserves_task_and_line_order() {
        let snippets = vec![
            TaskLogSnippet::new("lint", "b.go:2: second\na.go:1: first"),
            TaskLogSnippet::new("test", "c.go:3: third"),
        ];
        let paths: Vec<String> = extract_annotations(PATTERN, &snippets)
            .into_iter()
            .map(|a| a.path)
            .collect();
        assert_eq!(paths, vec!["b.go", "a.go", "c.go"]);
    }

    #[test]
    fn test_invalid_pattern_yields_nothing() {
        assert!(extract_annotations("(?P<filename>[", &snippet("main.go:1: x")).is_empty());
    }

    #[test]
    fn test_missing_group_yields_nothing() {
        let extractor = AnnotationExtractor::new(r"^(?P<filename>[^:]+):(?P<line>\d+): (?P<msg>.*)$").unwrap();
        assert_eq!(extractor.missing_groups(), &["error"]);
        assert!(extractor.extract(&snippet("main.go:1: x")).is_empty());
    }

    #[test]
    fn test_optional_group_not_participating_is_skipped() {
        let pattern = r"^(?P<filename>[^:]+):(?:(?P<line>\d+):)? (?P<error>.*)$";
        let annotations = extract_annotations(pattern, &snippet("main.go: no line\nmain.go:5: with line"));
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].start_line, 5);
    }

    #[test]
    fn test_default_pattern() {
        let annotations = extract_annotations(
            checkrun_core::config::DEFAULT_ERROR_DETECTION_REGEXP,
            &snippet("./src/lib.rs:12:5 error[E0425]: cannot find value"),
        );
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].path, "src/lib.rs");
        assert_eq!(annotations[0].start_line, 12);
        assert_eq!(annotations[0].message, "error[E0425]: cannot find value");
    }

    #[test]
    fn test_crlf_logs() {
        let annotations = extract_annotations(PATTERN, &snippet("a.go:1: first\r\nb.go:2: second\r\n"));
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[1].message, "second");
    }
}
