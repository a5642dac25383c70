#![forbid(unsafe_code)]

//! Core Rule trait and related types for defining and executing rules

use crate::types::{FindingKind, RuleCategory, Severity};
use serde::Serialize;
use std::fmt;

/// Where the scanned content comes from
///
/// Free text is checked as written. A manifest is serialized and checked as a
/// whole document, which turns the closing-marker check into a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Text,
    Document,
}

impl Scope {
    /// Location label used in findings produced under this scope
    pub fn location(&self) -> &'static str {
        match self {
            Scope::Text => "text",
            Scope::Document => "global",
        }
    }
}

/// Execution context provided to rules when they execute
#[derive(Debug)]
pub struct ScanContext<'a> {
    /// Full text being scanned
    pub content: &'a str,

    /// Whether the content is free text or a serialized document
    pub scope: Scope,
}

impl<'a> ScanContext<'a> {
    pub fn text(content: &'a str) -> Self {
        Self {
            content,
            scope: Scope::Text,
        }
    }

    pub fn document(content: &'a str) -> Self {
        Self {
            content,
            scope: Scope::Document,
        }
    }
}

/// Byte span and 1-indexed line/column of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

/// A single rule violation
///
/// Findings are created once by a rule or a manifest check and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// What the finding is about
    pub kind: FindingKind,

    /// Module name, pipeline action, or scope label
    pub location: String,

    /// Offending text, when the finding points at a span
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,

    /// Replacement for the matched text; None means remove or fix by hand
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Human-readable description
    pub message: String,

    pub severity: Severity,

    /// Where in the scanned text the match sits (text scans only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Finding {
    /// Creates a finding with no matched span
    pub fn new(
        kind: FindingKind,
        location: impl Into<String>,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            kind,
            location: location.into(),
            matched: None,
            suggestion: None,
            message: message.into(),
            severity,
            position: None,
        }
    }

    pub fn with_match(mut self, matched: impl Into<String>, position: Option<Position>) -> Self {
        self.matched = Some(matched.into());
        self.position = position;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.location, self.message)?;
        if let Some(pos) = self.position {
            write!(f, " ({}:{})", pos.line, pos.column)?;
        }
        Ok(())
    }
}

/// A position-indexed rewrite produced by a correcting rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transformation {
    /// Byte offset of the original span
    pub start: usize,
    pub end: usize,
    /// Text found at `start..end`
    pub original: String,
    /// Case-adjusted canonical form
    pub replacement: String,
}

/// Trait that all rules must implement
///
/// Rules are `Send + Sync` so one engine can serve concurrent callers.
pub trait Rule: Send + Sync {
    /// Returns the unique identifier for this rule
    fn id(&self) -> &str;

    /// Returns a human-readable description of what this rule checks
    fn description(&self) -> &str;

    fn category(&self) -> RuleCategory;

    /// Executes the rule against the provided context
    ///
    /// Returns all findings in order of appearance.
    fn execute(&self, ctx: &ScanContext) -> Vec<Finding>;

    /// Rewrites this rule would apply to the content
    ///
    /// Only correcting rules (term and prefix-word replacements) return edits.
    fn corrections(&self, _ctx: &ScanContext) -> Vec<Transformation> {
        Vec::new()
    }
}

/// Compute line start offsets for efficient line/column conversion
pub(crate) fn compute_line_offsets(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Build a `Position` for a byte span using precomputed line offsets
///
/// Columns count characters, not bytes.
pub(crate) fn position_of(content: &str, start: usize, end: usize, line_offsets: &[usize]) -> Position {
    let line_idx = line_offsets
        .partition_point(|&o| o <= start)
        .saturating_sub(1);
    let line_start = line_offsets[line_idx];
    let column = content[line_start..start].chars().count() + 1;

    Position {
        start,
        end,
        line: (line_idx + 1) as u32,
        column: column as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_builder() {
        let finding = Finding::new(
            FindingKind::Orthography,
            "text",
            "K instead of Q",
            Severity::Critical,
        )
        .with_match("Kabbala", None)
        .with_suggestion("Qabbala");

        assert_eq!(finding.matched.as_deref(), Some("Kabbala"));
        assert_eq!(finding.suggestion.as_deref(), Some("Qabbala"));
        assert!(finding.is_critical());
    }

    #[test]
    fn test_finding_display() {
        let finding = Finding::new(
            FindingKind::Sefira,
            "Modul_3",
            "Unknown sefira: Daat",
            Severity::Warning,
        );
        assert_eq!(
            finding.to_string(),
            "[warning] Modul_3: Unknown sefira: Daat"
        );
    }

    #[test]
    fn test_compute_line_offsets() {
        assert_eq!(compute_line_offsets("line1\nline2\nline3"), vec![0, 6, 12]);
        assert_eq!(compute_line_offsets(""), vec![0]);
    }

    #[test]
    fn test_position_counts_characters() {
        let content = "Gefäße\nÜber Kabbala";
        let offsets = compute_line_offsets(content);
        let start = content.find("Kabbala").unwrap();
        let pos = position_of(content, start, start + 7, &offsets);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 6);
    }

    #[test]
    fn test_rule_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Box<dyn Rule>>();
        assert_sync::<Box<dyn Rule>>();
    }
}
