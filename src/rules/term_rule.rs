#![forbid(unsafe_code)]

//! Regex-based term replacement rules
//!
//! A `TermRule` matches any incorrect surface form of one glossary entry as a
//! whole word, case-insensitively, and proposes the canonical form. The same
//! type serves the prohibited prefix words, which only differ in category and
//! severity.

use crate::error::RuleError;
use crate::rules::builtin::{CITATION_MARKERS, CITATION_WINDOW, PrefixEntry, TermEntry};
use crate::rules::rule::{Finding, Rule, ScanContext, Transformation, compute_line_offsets, position_of};
use crate::types::{FindingKind, RuleCategory, Severity};
use regex::{Match, Regex};

/// A rule that replaces incorrect spellings with one canonical form
pub struct TermRule {
    id: String,
    description: String,
    category: RuleCategory,
    kind: FindingKind,
    severity: Severity,
    correct: &'static str,
    pattern: Regex,
    /// Orthography rules skip matches quoted near a citation marker
    honors_citations: bool,
}

impl std::fmt::Debug for TermRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermRule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("severity", &self.severity)
            .field("correct", &self.correct)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl TermRule {
    /// Build a rule from a glossary entry
    ///
    /// Orthography entries are critical and honor the citation exception;
    /// DIN transliteration entries are warnings.
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if the entry has no surface forms or its pattern fails to compile.
    pub fn from_entry(entry: &TermEntry) -> Result<Self, RuleError> {
        let (kind, severity, honors_citations, description) = match entry.category {
            RuleCategory::Orthography => (
                FindingKind::Orthography,
                Severity::Critical,
                true,
                format!("Q instead of K: write '{}'", entry.correct),
            ),
            RuleCategory::DinTransliteration => (
                FindingKind::Transliteration,
                Severity::Warning,
                false,
                format!("DIN 31636 spelling: write '{}'", entry.correct),
            ),
            RuleCategory::Style => (
                FindingKind::ProhibitedPrefix,
                Severity::Critical,
                false,
                format!("Style: write '{}'", entry.correct),
            ),
        };

        Ok(TermRule {
            id: format!("{}-{}", entry.category.as_str(), slug(entry.correct)),
            description,
            category: entry.category,
            kind,
            severity,
            correct: entry.correct,
            pattern: whole_word_pattern(entry.incorrect)?,
            honors_citations,
        })
    }

    /// Build a rule from a prohibited zer- prefix word
    pub fn from_prefix(entry: &PrefixEntry) -> Result<Self, RuleError> {
        Ok(TermRule {
            id: format!("prefix-{}", slug(entry.word)),
            description: format!(
                "Zer- prefix word '{}': write '{}'",
                entry.word, entry.replacement
            ),
            category: RuleCategory::Style,
            kind: FindingKind::ProhibitedPrefix,
            severity: Severity::Critical,
            correct: entry.replacement,
            pattern: whole_word_pattern(&[entry.word])?,
            honors_citations: false,
        })
    }

    pub fn correct(&self) -> &str {
        self.correct
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Matches that count as violations, in order of appearance
    fn violations<'c>(&'c self, content: &'c str) -> impl Iterator<Item = Match<'c>> + 'c {
        self.pattern
            .find_iter(content)
            .filter(move |m| !(self.honors_citations && is_citation(content, m.start(), m.end())))
    }

    fn message(&self, matched: &str) -> String {
        match self.kind {
            FindingKind::Orthography => format!(
                "'{}' uses K instead of Q; write '{}'",
                matched, self.correct
            ),
            FindingKind::Transliteration => format!(
                "'{}' is not DIN 31636; write '{}'",
                matched, self.correct
            ),
            _ => format!("Zer- prefix word '{}'; write '{}'", matched, self.correct),
        }
    }
}

impl Rule for TermRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> RuleCategory {
        self.category
    }

    fn execute(&self, ctx: &ScanContext) -> Vec<Finding> {
        let line_offsets = compute_line_offsets(ctx.content);

        self.violations(ctx.content)
            .map(|m| {
                let position = position_of(ctx.content, m.start(), m.end(), &line_offsets);
                Finding::new(
                    self.kind,
                    ctx.scope.location(),
                    self.message(m.as_str()),
                    self.severity,
                )
                .with_match(m.as_str(), Some(position))
                .with_suggestion(preserve_case(m.as_str(), self.correct))
            })
            .collect()
    }

    fn corrections(&self, ctx: &ScanContext) -> Vec<Transformation> {
        self.violations(ctx.content)
            .map(|m| Transformation {
                start: m.start(),
                end: m.end(),
                original: m.as_str().to_string(),
                replacement: preserve_case(m.as_str(), self.correct),
            })
            .collect()
    }
}

/// Compile `(?i)\b(?:form|form)\b`, longest form first
fn whole_word_pattern(forms: &[&str]) -> Result<Regex, RuleError> {
    if forms.is_empty() {
        return Err(RuleError::InvalidDefinition(
            "term entry without surface forms".to_string(),
        ));
    }

    let mut sorted: Vec<&str> = forms.to_vec();
    sorted.sort_by_key(|f| std::cmp::Reverse(f.chars().count()));
    let alternatives: Vec<String> = sorted.iter().map(|f| regex::escape(f)).collect();
    let source = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));

    Regex::new(&source).map_err(|e| {
        RuleError::InvalidPattern(format!("Failed to compile pattern '{}': {}", source, e))
    })
}

/// True when a citation marker occurs within the context window around a match
pub(crate) fn is_citation(content: &str, start: usize, end: usize) -> bool {
    let window = context_window(content, start, end, CITATION_WINDOW);
    CITATION_MARKERS.iter().any(|marker| window.contains(marker))
}

/// The match plus up to `radius` characters on either side
fn context_window(content: &str, start: usize, end: usize, radius: usize) -> &str {
    let from = if radius == 0 {
        start
    } else {
        content[..start]
            .char_indices()
            .rev()
            .nth(radius - 1)
            .map_or(0, |(i, _)| i)
    };
    let to = content[end..]
        .char_indices()
        .nth(radius)
        .map_or(content.len(), |(i, _)| end + i);

    &content[from..to]
}

/// Carry an uppercase first letter of the matched span over to the replacement
///
/// Everything after the first character of the replacement is used verbatim.
pub fn preserve_case(matched: &str, replacement: &str) -> String {
    let starts_upper = matched.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return replacement.to_string();
    }

    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn slug(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect()
}
