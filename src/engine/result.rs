#![forbid(unsafe_code)]

//! Aggregated outcome of one validation call

use crate::rules::{Finding, Transformation};
use crate::types::Severity;
use serde::Serialize;

/// Points deducted per critical finding
pub const CRITICAL_PENALTY: u32 = 10;
/// Points deducted per warning or info finding
pub const WARNING_PENALTY: u32 = 5;

/// Findings of a single scan, split by severity
///
/// Owned by the caller of one validation call. `valid` and `score` are derived
/// from the findings and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Critical findings, in insertion order
    pub errors: Vec<Finding>,
    /// Warning and info findings, in insertion order
    pub warnings: Vec<Finding>,
    /// Rewrites that would correct the scanned text
    pub transformations: Vec<Transformation>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a finding into `errors` or `warnings` by severity
    pub fn push(&mut self, finding: Finding) {
        match finding.severity {
            Severity::Critical => self.errors.push(finding),
            Severity::Warning | Severity::Info => self.warnings.push(finding),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// `max(0, 100 - 10 * critical - 5 * (warning + info))`
    pub fn score(&self) -> u32 {
        let critical = self.errors.len() as u32;
        let minor = self.warnings.len() as u32;
        let penalty = critical
            .saturating_mul(CRITICAL_PENALTY)
            .saturating_add(minor.saturating_mul(WARNING_PENALTY));
        100u32.saturating_sub(penalty)
    }

    /// All findings, errors first
    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

impl Extend<Finding> for ValidationResult {
    fn extend<I: IntoIterator<Item = Finding>>(&mut self, iter: I) {
        for finding in iter {
            self.push(finding);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FindingKind;

    fn finding(severity: Severity) -> Finding {
        Finding::new(FindingKind::ProhibitedPhrase, "text", "test", severity)
    }

    #[test]
    fn test_empty_result_is_perfect() {
        let result = ValidationResult::new();
        assert!(result.is_valid());
        assert_eq!(result.score(), 100);
    }

    #[test]
    fn test_push_routes_by_severity() {
        let mut result = ValidationResult::new();
        result.push(finding(Severity::Critical));
        result.push(finding(Severity::Warning));
        result.push(finding(Severity::Info));

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.warnings.len(), 2);
        assert!(!result.is_valid());
        assert_eq!(result.score(), 80);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let mut result = ValidationResult::new();
        result.extend((0..11).map(|_| finding(Severity::Critical)));
        assert_eq!(result.score(), 0);
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut result = ValidationResult::new();
        result.push(finding(Severity::Warning));
        assert!(result.is_valid());
        assert_eq!(result.score(), 95);
    }
}
