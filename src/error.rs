//! Error types for WWAQ
//!
//! Only load-time failures are errors. Rule violations found in a text or a
//! manifest are reported as findings and never travel through these types.

use std::path::PathBuf;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML syntax or shape
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Syntactically valid but semantically rejected configuration
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Rule table errors
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A built-in rule produced a regex that failed to compile
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(String),

    /// Inconsistent rule table entry
    #[error("Invalid rule definition: {0}")]
    InvalidDefinition(String),
}

/// Errors raised while loading a manifest document
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Manifest file does not exist
    #[error("Manifest not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Manifest exists but is not a well-formed document
    #[error("YAML parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// Manifest could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the sigillum registry
#[derive(Debug, thiserror::Error)]
pub enum SigillumError {
    /// The text does not end with the closing `Q!` marker and cannot be sealed
    #[error("Q! validation failed: the text does not end with Q!")]
    MissingMarker,

    /// The hierarchical position is not ten groups of one or two digits
    #[error("Invalid HNS format: {0}")]
    InvalidHns(String),

    /// Registry file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry file is not valid YAML
    #[error("Registry parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Registry could not be serialized
    #[error("Registry serialization error: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Top-level error type for WWAQ
#[derive(Debug, thiserror::Error)]
pub enum WwaqError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rule error
    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    /// Manifest load error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Sigillum error
    #[error("Sigillum error: {0}")]
    Sigillum(#[from] SigillumError),

    /// File discovery error
    #[error("File walker error: {0}")]
    FileWalker(#[from] crate::engine::file_walker::FileWalkerError),

    /// YAML serialization error (glossary export)
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WwaqError {
    /// Whether the error happened while loading input or configuration
    ///
    /// Only a seal refused for a missing `Q!` is a verdict on the text itself.
    pub fn is_load_error(&self) -> bool {
        !matches!(self, WwaqError::Sigillum(SigillumError::MissingMarker))
    }
}
