#![forbid(unsafe_code)]

//! Core domain types for WWAQ
//!
//! This module defines the fundamental value types shared by the rule table,
//! the text engine and the manifest validator.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Ten dot-separated groups of one or two ASCII digits
pub const HNS_PATTERN: &str = r"^[0-9]{1,2}(\.[0-9]{1,2}){9}$";

static HNS_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(HNS_PATTERN).ok());

/// Finding severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks validity
    Critical,
    /// Lowers the score, never blocks validity
    Warning,
    /// Hint; weighted like a warning
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule table categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    /// Letter-substitution corrections (Q instead of K)
    Orthography,
    /// DIN 31636 romanization corrections
    DinTransliteration,
    /// Phrasing, prefix words, symbols and the closing marker
    Style,
}

impl RuleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCategory::Orthography => "orthography",
            RuleCategory::DinTransliteration => "din-transliteration",
            RuleCategory::Style => "style",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a finding is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Orthography,
    Transliteration,
    ProhibitedPrefix,
    ProhibitedPhrase,
    ProhibitedSymbol,
    MissingMarker,
    MissingSigillum,
    Meta,
    Schema,
    Structure,
    HnsFormat,
    DuplicateHns,
    DuplicateId,
    Sefira,
    Pipeline,
    Reference,
}

impl FindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::Orthography => "orthography",
            FindingKind::Transliteration => "transliteration",
            FindingKind::ProhibitedPrefix => "prohibited_prefix",
            FindingKind::ProhibitedPhrase => "prohibited_phrase",
            FindingKind::ProhibitedSymbol => "prohibited_symbol",
            FindingKind::MissingMarker => "missing_marker",
            FindingKind::MissingSigillum => "missing_sigillum",
            FindingKind::Meta => "meta",
            FindingKind::Schema => "schema",
            FindingKind::Structure => "structure",
            FindingKind::HnsFormat => "hns_format",
            FindingKind::DuplicateHns => "duplicate_hns",
            FindingKind::DuplicateId => "duplicate_id",
            FindingKind::Sefira => "sefira",
            FindingKind::Pipeline => "pipeline",
            FindingKind::Reference => "reference",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated hierarchical position
///
/// Exactly ten dot-separated groups of one or two ASCII digits,
/// e.g. `10.1.0.0.0.0.0.0.0.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hns(String);

impl Hns {
    /// Number of groups in a hierarchical position
    pub const GROUPS: usize = 10;

    /// Creates a new Hns, validating the shape
    ///
    /// Returns None if the input does not have ten groups of one or two digits.
    pub fn new(hns: impl Into<String>) -> Option<Self> {
        let hns = hns.into();
        if Self::is_well_formed(&hns) {
            Some(Hns(hns))
        } else {
            None
        }
    }

    /// Checks the `HNS_PATTERN` shape
    pub fn is_well_formed(s: &str) -> bool {
        HNS_RE.as_ref().is_some_and(|re| re.is_match(s))
    }

    /// The leading group, which selects the world of a sigillum
    pub fn first_group(&self) -> &str {
        self.0.split('.').next().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Hns {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Hns::new(value.clone()).ok_or_else(|| format!("Invalid HNS format: {}", value))
    }
}

impl From<Hns> for String {
    fn from(hns: Hns) -> Self {
        hns.0
    }
}

/// A glob pattern for file matching
///
/// This is a simple wrapper around a string that will be used with the `globset` crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobPattern(String);

impl GlobPattern {
    /// Creates a new GlobPattern
    pub fn new(pattern: impl Into<String>) -> Self {
        GlobPattern(pattern.into())
    }

    /// Returns the pattern as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GlobPattern {
    fn from(pattern: &str) -> Self {
        GlobPattern(pattern.to_string())
    }
}
