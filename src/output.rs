//! Output formatters (human and JSONL)

pub mod human;
pub mod jsonl;

use crate::engine::ValidationResult;

pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;

/// Validation result of one input, labelled with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checked {
    /// File path, or `<text>` for a literal argument
    pub source: String,
    pub result: ValidationResult,
}

impl Checked {
    pub fn new(source: impl Into<String>, result: ValidationResult) -> Self {
        Self {
            source: source.into(),
            result,
        }
    }
}

/// Whether every checked input is free of critical findings
pub fn all_valid(checked: &[Checked]) -> bool {
    checked.iter().all(|c| c.result.is_valid())
}
