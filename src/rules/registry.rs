#![forbid(unsafe_code)]

//! Rule registry built from the built-in table
//!
//! The RuleRegistry is responsible for:
//! - Compiling the built-in table into rule objects, once
//! - Keeping rules in their fixed scan order
//! - Answering the phrase and symbol questions the rewriter asks

use crate::error::RuleError;
use crate::rules::builtin::{PREFIX_WORDS, PROHIBITED_PHRASES, PROHIBITED_SYMBOLS, TERM_RULES};
use crate::rules::style_rules::{ClosingMarkerRule, PhraseRule, SigillumReferenceRule, SymbolRule};
use crate::rules::term_rule::TermRule;
use crate::rules::Rule;
use regex::Regex;
use std::collections::HashSet;

/// Ordered, immutable set of rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
    phrases: Regex,
    symbols: SymbolRule,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.rules.iter().map(|r| r.id()).collect::<Vec<_>>())
            .finish()
    }
}

impl RuleRegistry {
    /// Compile the built-in rule table
    ///
    /// Order: term rules, prefix words, phrases, symbols, closing marker,
    /// sigillum reference (documents only).
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if a pattern fails to compile or two rules share an ID.
    pub fn builtin() -> Result<Self, RuleError> {
        let mut rules: Vec<Box<dyn Rule>> = Vec::new();

        for entry in TERM_RULES {
            rules.push(Box::new(TermRule::from_entry(entry)?));
        }
        for entry in PREFIX_WORDS {
            rules.push(Box::new(TermRule::from_prefix(entry)?));
        }
        for phrase in PROHIBITED_PHRASES {
            rules.push(Box::new(PhraseRule::new(phrase)?));
        }
        rules.push(Box::new(SymbolRule::new(PROHIBITED_SYMBOLS)));
        rules.push(Box::new(ClosingMarkerRule));
        rules.push(Box::new(SigillumReferenceRule));

        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id().to_string()) {
                return Err(RuleError::InvalidDefinition(format!(
                    "Duplicate rule ID '{}'",
                    rule.id()
                )));
            }
        }

        let alternatives: Vec<String> = PROHIBITED_PHRASES.iter().map(|p| regex::escape(p)).collect();
        let source = format!("(?i)(?:{})", alternatives.join("|"));
        let phrases = Regex::new(&source)
            .map_err(|e| RuleError::InvalidPattern(format!("Failed to compile phrase set: {}", e)))?;

        tracing::debug!(rules = rules.len(), "compiled built-in rule table");

        Ok(Self {
            rules,
            phrases,
            symbols: SymbolRule::new(PROHIBITED_SYMBOLS),
        })
    }

    /// Rules in scan order
    pub fn iter_rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Get a rule by ID
    pub fn get_rule(&self, id: &str) -> Option<&dyn Rule> {
        self.iter_rules().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether the text contains any banned phrase (case-insensitive)
    pub fn contains_prohibited_phrase(&self, text: &str) -> bool {
        self.phrases.is_match(text)
    }

    pub fn is_prohibited_symbol(&self, c: char) -> bool {
        self.symbols.is_prohibited(c)
    }
}
