#![forbid(unsafe_code)]

//! Rule definitions and registry

pub mod builtin;
mod registry;
mod rule;
mod style_rules;
mod term_rule;

// Re-export core types
pub use registry::RuleRegistry;
pub use rule::{Finding, Position, Rule, ScanContext, Scope, Transformation};
pub use style_rules::{ClosingMarkerRule, PhraseRule, SigillumReferenceRule, SymbolRule};
pub use term_rule::{TermRule, preserve_case};
