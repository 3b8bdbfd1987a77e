//! Diagnostics and audit results.

use miette::SourceSpan;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::model::Position;

/// Source code location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path relative to project root.
    pub file: PathBuf,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Byte offset in file (for miette integration).
    pub offset: usize,
    /// Length of the span in bytes.
    pub length: usize,
}

impl Location {
    /// Creates a new location with explicit values.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Creates a location from a declaration or member position.
    #[must_use]
    pub fn at(file: PathBuf, position: Position) -> Self {
        Self {
            file,
            line: position.line,
            column: position.column,
            offset: position.offset,
            length: position.length,
        }
    }
}

/// A single audit finding: a position and a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the check that produced it (e.g. `comment-density`).
    pub rule: String,
    /// Where the finding points.
    pub location: Location,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    #[must_use]
    pub fn new(rule: impl Into<String>, location: Location, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            location,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.rule,
            self.message
        )
    }
}

/// Adapts a [`Diagnostic`] to `miette` for rendering with a source snippet.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("{message}")]
pub struct DiagnosticReport {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Diagnostic> for DiagnosticReport {
    fn from(d: &Diagnostic) -> Self {
        let help = match d.rule.as_str() {
            crate::checks::density::NAME => {
                Some("explain the non-obvious steps with `//` comments or a `///` doc comment".to_string())
            }
            crate::checks::presence::INTERFACE_NAME | crate::checks::presence::STRUCT_NAME => {
                Some("add a `///` doc comment directly above the item".to_string())
            }
            _ => None,
        };
        Self {
            message: d.message.clone(),
            help,
            span: SourceSpan::from((d.location.offset, d.location.length)),
            label_message: d.rule.clone(),
        }
    }
}

/// Result of running an audit.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AuditResult {
    /// All diagnostics, in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Number of files skipped as test code.
    pub files_skipped: usize,
}

impl AuditResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any diagnostic was produced.
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Returns diagnostics produced by the named check.
    #[must_use]
    pub fn by_rule(&self, rule: &str) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.rule == rule).collect()
    }

    /// One-line summary of the run.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Found {} diagnostic(s) in {} file(s) ({} test file(s) skipped)",
            self.diagnostics.len(),
            self.files_checked,
            self.files_skipped
        )
    }

    /// Adds diagnostics and counters from another result.
    pub fn extend(&mut self, other: Self) {
        self.diagnostics.extend(other.diagnostics);
        self.files_checked += other.files_checked;
        self.files_skipped += other.files_skipped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_diagnostic(rule: &str) -> Diagnostic {
        Diagnostic::new(
            rule,
            Location::new(PathBuf::from("src/lib.rs"), 42, 8),
            "missing headline comment for struct 'Config'",
        )
    }

    #[test]
    fn display_is_single_line() {
        let d = make_diagnostic("struct-docs");
        assert_eq!(
            d.to_string(),
            "src/lib.rs:42:8: [struct-docs] missing headline comment for struct 'Config'"
        );
    }

    #[test]
    fn location_at_copies_position() {
        let position = Position::new(7, 3).with_span(120, 5);
        let loc = Location::at(PathBuf::from("a.rs"), position);
        assert_eq!((loc.line, loc.column, loc.offset, loc.length), (7, 3, 120, 5));
    }

    #[test]
    fn report_carries_help_for_known_rules() {
        let report = DiagnosticReport::from(&make_diagnostic("struct-docs"));
        assert!(report.help.is_some());
        let report = DiagnosticReport::from(&make_diagnostic("custom"));
        assert!(report.help.is_none());
    }

    #[test]
    fn result_counters_and_filtering() {
        let mut result = AuditResult::new();
        assert!(!result.has_diagnostics());
        result.diagnostics.push(make_diagnostic("struct-docs"));
        result.diagnostics.push(make_diagnostic("comment-density"));
        result.files_checked = 2;

        let mut other = AuditResult::new();
        other.files_checked = 1;
        other.files_skipped = 3;
        result.extend(other);

        assert!(result.has_diagnostics());
        assert_eq!(result.by_rule("struct-docs").len(), 1);
        assert_eq!(
            result.summary(),
            "Found 2 diagnostic(s) in 3 file(s) (3 test file(s) skipped)"
        );
    }
}
