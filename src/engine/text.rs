#![forbid(unsafe_code)]

//! Text conformance engine
//!
//! Scans text against the rule registry, scores it, and rewrites it into the
//! corrected form.

use crate::engine::result::ValidationResult;
use crate::engine::rewrite;
use crate::error::RuleError;
use crate::rules::builtin::REQUIRED_SUFFIX;
use crate::rules::{RuleRegistry, ScanContext, Transformation};
use std::sync::Arc;

/// Upper bound on rewrite passes before `transform` gives up settling
const MAX_TRANSFORM_PASSES: usize = 16;

/// Read-only engine over the built-in rule table
///
/// Cloning is cheap; clones share one compiled registry.
#[derive(Debug, Clone)]
pub struct TextConformanceEngine {
    registry: Arc<RuleRegistry>,
}

impl TextConformanceEngine {
    /// Creates an engine over the built-in rules
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if the built-in table fails to compile.
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self::with_registry(RuleRegistry::builtin()?))
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validate free text
    ///
    /// Every rule sees the original text; nothing is rewritten here.
    pub fn validate(&self, text: &str) -> ValidationResult {
        self.scan(&ScanContext::text(text))
    }

    /// Run every rule against the context, in registry order
    pub fn scan(&self, ctx: &ScanContext) -> ValidationResult {
        let mut result = ValidationResult::new();

        for rule in self.registry.iter_rules() {
            result.extend(rule.execute(ctx));
            result.transformations.extend(rule.corrections(ctx));
        }

        tracing::debug!(
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            score = result.score(),
            "scanned {} bytes",
            ctx.content.len()
        );
        result
    }

    /// Rewrite text into its corrected form
    ///
    /// One pass is:
    /// 1. Prohibited symbols stripped, with a trailing variation selector
    /// 2. Term and prefix-word corrections, re-scanned from the stripped text
    ///    and applied right-to-left, keeping an uppercase first letter
    /// 3. Sentences containing a prohibited phrase removed
    /// 4. `Q!` appended on its own line if missing
    ///
    /// Passes repeat until one changes nothing, so the result is a fixed point:
    /// stripping can join a split term, and length-changing edits can move a
    /// term out of its citation window.
    pub fn transform(&self, text: &str) -> String {
        let mut current = self.transform_pass(text);
        for _ in 1..MAX_TRANSFORM_PASSES {
            let next = self.transform_pass(&current);
            if next == current {
                return current;
            }
            current = next;
        }
        tracing::warn!(
            passes = MAX_TRANSFORM_PASSES,
            "transform did not settle; returning last pass"
        );
        current
    }

    fn transform_pass(&self, text: &str) -> String {
        let stripped = rewrite::strip_symbols(text, |c| self.registry.is_prohibited_symbol(c));
        let corrected = rewrite::apply_edits(&stripped, self.corrections(&stripped));
        let cleaned = rewrite::remove_sentences(&corrected, |sentence| {
            self.registry.contains_prohibited_phrase(sentence)
        });
        rewrite::ensure_suffix(&cleaned, REQUIRED_SUFFIX)
    }

    /// Position-indexed corrections for `text`, in rule order
    pub fn corrections(&self, text: &str) -> Vec<Transformation> {
        let ctx = ScanContext::text(text);
        self.registry
            .iter_rules()
            .flat_map(|rule| rule.corrections(&ctx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FindingKind, Severity};

    fn engine() -> TextConformanceEngine {
        TextConformanceEngine::new().unwrap()
    }

    #[test]
    fn test_clean_text_is_perfect() {
        let result = engine().validate("Die Qabbala lehrt Zimzum.\n\nQ!");
        assert!(result.is_valid());
        assert_eq!(result.score(), 100);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let result = engine().validate("");
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, FindingKind::MissingMarker);
        assert_eq!(result.score(), 95);
    }

    #[test]
    fn test_only_marker() {
        let result = engine().validate("Q!");
        assert!(result.is_valid());
        assert_eq!(result.score(), 100);
    }

    #[test]
    fn test_findings_follow_rule_order() {
        let result = engine().validate("liebevoll zerbrachen Kabbala");
        let kinds: Vec<FindingKind> = result.errors.iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![
                FindingKind::Orthography,
                FindingKind::ProhibitedPrefix,
                FindingKind::ProhibitedPhrase
            ]
        );
    }

    #[test]
    fn test_din_is_warning() {
        let result = engine().validate("Tikkun olam Q!");
        assert!(result.is_valid());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].severity, Severity::Warning);
        assert_eq!(result.warnings[0].suggestion.as_deref(), Some("Tiqqun"));
    }

    #[test]
    fn test_transformations_recorded() {
        let result = engine().validate("Die Kabbala und die Gefäße zerbrachen.");
        assert_eq!(result.transformations.len(), 2);
        assert_eq!(result.transformations[0].original, "Kabbala");
        assert_eq!(result.transformations[1].replacement, "barsten");
    }

    #[test]
    fn test_transform_skips_citations() {
        let out = engine().transform(
            "Berg Kabbalah Centre wird nur zitiert. Dazwischen steht ein langer Satz ohne Namen. Die Kabbala lehrt.",
        );
        assert!(out.contains("Berg Kabbalah Centre"));
        assert!(out.contains("Die Qabbala lehrt."));
    }

    #[test]
    fn test_transform_idempotent() {
        let engine = engine();
        let once = engine.transform("Die KABBALA lehrt liebevoll. Tzimtzum ✨ zerfallen");
        assert_eq!(engine.transform(&once), once);
    }

    #[test]
    fn test_transform_joins_split_terms() {
        let engine = engine();
        let once = engine.transform("Die Kab✨bala lehrt. Q!");
        assert_eq!(once, "Die Qabbala lehrt. Q!");
        assert!(engine.validate(&once).is_valid());
    }

    #[test]
    fn test_transform_rechecks_citation_window() {
        let engine = engine();
        let text = format!("Berg zerfallen{}Kabbala lehrt. Q!", " ".repeat(36));
        let once = engine.transform(&text);
        assert!(once.starts_with("Berg sich wandeln"));
        assert!(once.contains("Qabbala lehrt."));
        assert_eq!(engine.transform(&once), once);
    }
}
