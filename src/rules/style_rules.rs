#![forbid(unsafe_code)]

//! Style prohibitions: phrases, decorative symbols and the closing marker

use crate::error::RuleError;
use crate::rules::builtin::{REQUIRED_SUFFIX, SIGILLUM_MARKERS};
use crate::rules::rule::{Finding, Rule, Scope, ScanContext, compute_line_offsets, position_of};
use crate::types::{FindingKind, RuleCategory, Severity};
use regex::Regex;

/// Flags every case-insensitive occurrence of one banned phrase
///
/// Phrases are removed rather than substituted, so findings carry no suggestion.
#[derive(Debug)]
pub struct PhraseRule {
    id: String,
    description: String,
    pattern: Regex,
}

impl PhraseRule {
    pub fn new(phrase: &str) -> Result<Self, RuleError> {
        let source = format!("(?i){}", regex::escape(phrase));
        let pattern = Regex::new(&source).map_err(|e| {
            RuleError::InvalidPattern(format!("Failed to compile phrase '{}': {}", phrase, e))
        })?;

        Ok(PhraseRule {
            id: format!("phrase-{}", phrase.replace(' ', "-")),
            description: format!("Prohibited phrase '{}'", phrase),
            pattern,
        })
    }
}

impl Rule for PhraseRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Style
    }

    fn execute(&self, ctx: &ScanContext) -> Vec<Finding> {
        let line_offsets = compute_line_offsets(ctx.content);

        self.pattern
            .find_iter(ctx.content)
            .map(|m| {
                Finding::new(
                    FindingKind::ProhibitedPhrase,
                    ctx.scope.location(),
                    format!("Prohibited phrase '{}'; remove it", m.as_str()),
                    Severity::Critical,
                )
                .with_match(
                    m.as_str(),
                    Some(position_of(ctx.content, m.start(), m.end(), &line_offsets)),
                )
            })
            .collect()
    }
}

/// Flags each distinct decorative symbol present in the content
#[derive(Debug)]
pub struct SymbolRule {
    symbols: &'static [char],
}

impl SymbolRule {
    pub fn new(symbols: &'static [char]) -> Self {
        Self { symbols }
    }

    pub fn is_prohibited(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }
}

impl Rule for SymbolRule {
    fn id(&self) -> &str {
        "prohibited-symbols"
    }

    fn description(&self) -> &str {
        "Decorative symbols and emoji are not allowed"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Style
    }

    fn execute(&self, ctx: &ScanContext) -> Vec<Finding> {
        let line_offsets = compute_line_offsets(ctx.content);

        self.symbols
            .iter()
            .filter_map(|&symbol| {
                let start = ctx.content.find(symbol)?;
                let end = start + symbol.len_utf8();
                Some(
                    Finding::new(
                        FindingKind::ProhibitedSymbol,
                        ctx.scope.location(),
                        format!("Prohibited symbol '{}'", symbol),
                        Severity::Critical,
                    )
                    .with_match(
                        symbol.to_string(),
                        Some(position_of(ctx.content, start, end, &line_offsets)),
                    ),
                )
            })
            .collect()
    }
}

/// Requires the closing `Q!` marker
///
/// Free text must end with it (warning). A serialized document only has to
/// mention it somewhere, and its absence is a hint.
#[derive(Debug, Default)]
pub struct ClosingMarkerRule;

impl Rule for ClosingMarkerRule {
    fn id(&self) -> &str {
        "closing-marker"
    }

    fn description(&self) -> &str {
        "Texts end with the Q! confirmation"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Style
    }

    fn execute(&self, ctx: &ScanContext) -> Vec<Finding> {
        match ctx.scope {
            Scope::Text if !ctx.content.trim().ends_with(REQUIRED_SUFFIX) => vec![Finding::new(
                FindingKind::MissingMarker,
                ctx.scope.location(),
                format!("Text should end with '{}'", REQUIRED_SUFFIX),
                Severity::Warning,
            )
            .with_suggestion(REQUIRED_SUFFIX)],
            Scope::Document
                if !ctx
                    .content
                    .to_lowercase()
                    .contains(&REQUIRED_SUFFIX.to_lowercase()) =>
            {
                vec![Finding::new(
                    FindingKind::MissingMarker,
                    ctx.scope.location(),
                    format!("{} confirmation missing", REQUIRED_SUFFIX),
                    Severity::Info,
                )]
            }
            _ => Vec::new(),
        }
    }
}

/// Hints at a missing EOM Matrix sigillum reference in a document
#[derive(Debug, Default)]
pub struct SigillumReferenceRule;

impl Rule for SigillumReferenceRule {
    fn id(&self) -> &str {
        "sigillum-reference"
    }

    fn description(&self) -> &str {
        "Documents reference their EOM Matrix sigillum"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Style
    }

    fn execute(&self, ctx: &ScanContext) -> Vec<Finding> {
        if ctx.scope != Scope::Document {
            return Vec::new();
        }

        let lowered = ctx.content.to_lowercase();
        if SIGILLUM_MARKERS.iter().any(|m| lowered.contains(m)) {
            return Vec::new();
        }

        vec![Finding::new(
            FindingKind::MissingSigillum,
            ctx.scope.location(),
            "EOM Matrix sigillum reference missing",
            Severity::Info,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::PROHIBITED_SYMBOLS;

    #[test]
    fn test_phrase_every_occurrence() {
        let rule = PhraseRule::new("sanft").unwrap();
        let findings = rule.execute(&ScanContext::text("Sanfte Korrektur, sanft gesagt"));
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.suggestion.is_none()));
        assert_eq!(rule.id(), "phrase-sanft");
    }

    #[test]
    fn test_multi_word_phrase() {
        let rule = PhraseRule::new("von herz zu herz").unwrap();
        let findings = rule.execute(&ScanContext::text("Von Herz zu Herz teilen wir"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].matched.as_deref(), Some("Von Herz zu Herz"));
    }

    #[test]
    fn test_symbols_distinct() {
        let rule = SymbolRule::new(PROHIBITED_SYMBOLS);
        let findings = rule.execute(&ScanContext::text("❤️ Liebe ❤️ ✨"));
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].matched.as_deref(), Some("❤"));
        assert!(rule.is_prohibited('✨'));
        assert!(!rule.is_prohibited('𝌇'));
    }

    #[test]
    fn test_closing_marker_text_scope() {
        let rule = ClosingMarkerRule;
        assert_eq!(rule.execute(&ScanContext::text("")).len(), 1);
        assert!(rule.execute(&ScanContext::text("Fertig.\n\nQ!\n")).is_empty());

        let findings = rule.execute(&ScanContext::text("Q! steht vorne"));
        assert_eq!(findings[0].severity, Severity::Warning);
    }

    #[test]
    fn test_closing_marker_document_scope() {
        let rule = ClosingMarkerRule;
        assert!(rule.execute(&ScanContext::document("bemerkung: q! am anfang\n")).is_empty());

        let findings = rule.execute(&ScanContext::document("meta: {}\n"));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Info);
    }

    #[test]
    fn test_sigillum_reference_only_in_documents() {
        let rule = SigillumReferenceRule;
        assert!(rule.execute(&ScanContext::text("kein Siegel")).is_empty());
        assert_eq!(rule.execute(&ScanContext::document("kein Siegel")).len(), 1);
        assert!(rule.execute(&ScanContext::document("sigillum_basis: 𝌇")).is_empty());
    }
}
