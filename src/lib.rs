#![forbid(unsafe_code)]

//! WWAQ: terminology and style linter for Qabbala texts
//!
//! Validates German prose against a fixed glossary of spellings, prohibited
//! words, phrases and symbols, rewrites it into the corrected form, and checks
//! the HNS10 manifests that describe the WWAQ module hierarchy.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod manifest;
pub mod output;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, ManifestError, RuleError, SigillumError, WwaqError};

// Re-export core domain types for convenient access
pub use engine::{ManifestStructureValidator, TextConformanceEngine, ValidationResult};
pub use manifest::ManifestDocument;
pub use rules::{Finding, Transformation};
pub use types::{FindingKind, GlobPattern, Hns, RuleCategory, Severity};
