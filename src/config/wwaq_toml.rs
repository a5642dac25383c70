//! Parsing and validation for wwaq.toml configuration files

use crate::error::ConfigError;
use crate::types::GlobPattern;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "wwaq.toml";

/// Default sigillum registry file name
pub const DEFAULT_REGISTRY: &str = "eom_sigillum_registry.yaml";

/// Main configuration struct for wwaq.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wwaq: WwaqMeta,

    #[serde(default)]
    pub sigillum: SigillumConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("{} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.wwaq.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.wwaq.version
            )));
        }

        // Glob patterns must compile with globset
        for (kind, patterns) in [("include", &self.wwaq.include), ("exclude", &self.wwaq.exclude)] {
            for pattern in patterns {
                globset::Glob::new(pattern.as_str()).map_err(|e| {
                    ConfigError::Validation(format!(
                        "Invalid {} glob pattern '{}': {}",
                        kind,
                        pattern.as_str(),
                        e
                    ))
                })?;
            }
        }

        if self.sigillum.registry.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "sigillum.registry must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// `[wwaq]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WwaqMeta {
    #[serde(default = "default_version")]
    pub version: String,

    /// Strict schema checking for manifests
    #[serde(default = "default_strict")]
    pub strict: bool,

    /// Files considered by `wwaq text` when walking directories
    #[serde(default = "default_include")]
    pub include: Vec<GlobPattern>,

    #[serde(default)]
    pub exclude: Vec<GlobPattern>,
}

impl Default for WwaqMeta {
    fn default() -> Self {
        Self {
            version: default_version(),
            strict: default_strict(),
            include: default_include(),
            exclude: Vec::new(),
        }
    }
}

fn default_version() -> String {
    "1".to_string()
}

fn default_strict() -> bool {
    true
}

fn default_include() -> Vec<GlobPattern> {
    vec![GlobPattern::new("**/*.md"), GlobPattern::new("**/*.txt")]
}

/// `[sigillum]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigillumConfig {
    /// Path of the YAML registry file
    #[serde(default = "default_registry")]
    pub registry: PathBuf,
}

impl Default for SigillumConfig {
    fn default() -> Self {
        Self {
            registry: default_registry(),
        }
    }
}

fn default_registry() -> PathBuf {
    PathBuf::from(DEFAULT_REGISTRY)
}

/// Output configuration section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    Always,
    Never,
}

/// Contents written by `wwaq init`
pub const DEFAULT_CONFIG: &str = r#"# WWAQ terminology linter configuration

[wwaq]
version = "1"
# Treat a manifest schema other than HNS10 as a critical finding
strict = true
include = ["**/*.md", "**/*.txt"]
exclude = []

[sigillum]
registry = "eom_sigillum_registry.yaml"

[output]
format = "human"   # human | jsonl
color = "auto"     # auto | always | never
"#;
