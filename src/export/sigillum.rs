#![forbid(unsafe_code)]

//! EOM Matrix sigillum registry
//!
//! Each module/HNS pair receives a numbered seal exactly once. The registry is
//! an append-only YAML map keyed by `"{module}|{hns}"` and is saved after every
//! new allocation.

use crate::error::SigillumError;
use crate::rules::builtin::REQUIRED_SUFFIX;
use crate::types::Hns;
use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Base glyph of every sigillum
pub const SIGILLUM_GLYPH: &str = "𝌇";

/// Highest seal number before allocation wraps back to 1
pub const MAX_SIGILLUM: u32 = 999;

/// Hex characters of the key digest kept in an entry
const HASH_LEN: usize = 8;

/// One allocated seal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigillumEntry {
    pub sigillum: String,

    #[serde(rename = "nummer", default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,

    #[serde(rename = "welt", default)]
    pub world: String,

    #[serde(default)]
    pub hns: String,

    #[serde(rename = "modul", default)]
    pub module: String,

    #[serde(default)]
    pub hash: String,

    #[serde(default)]
    pub timestamp: String,
}

pub struct SigillumRegistry {
    path: PathBuf,
    entries: BTreeMap<String, SigillumEntry>,
}

impl SigillumRegistry {
    /// Open the registry at `path`; a missing or empty file is an empty registry
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SigillumError> {
        let path = path.into();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_yaml::from_str(&content).map_err(|source| SigillumError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(entries = entries.len(), "opened sigillum registry {}", path.display());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, module: &str, hns: &Hns) -> Option<&SigillumEntry> {
        self.entries.get(&registry_key(module, hns))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &SigillumEntry)> {
        self.entries.iter()
    }

    /// Sigillum for `module` at `hns`, allocating and saving a new one if needed
    pub fn generate(&mut self, module: &str, hns: &Hns) -> Result<String, SigillumError> {
        let key = registry_key(module, hns);
        if let Some(existing) = self.entries.get(&key) {
            return Ok(existing.sigillum.clone());
        }

        let number = self.next_number();
        let world = world_for(hns);
        let sigillum = format!("{}_{:03} ({})", SIGILLUM_GLYPH, number, world);

        self.entries.insert(
            key.clone(),
            SigillumEntry {
                sigillum: sigillum.clone(),
                number: Some(number),
                world: world.to_string(),
                hns: hns.to_string(),
                module: module.to_string(),
                hash: short_hash(&key),
                timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
            },
        );
        self.save()?;

        tracing::info!(module, hns = %hns, "allocated {}", sigillum);
        Ok(sigillum)
    }

    /// Append the sigillum line to a confirmed text
    ///
    /// # Errors
    ///
    /// Returns `SigillumError::MissingMarker` unless the text ends with `Q!`.
    pub fn seal_text(&mut self, text: &str, module: &str, hns: &Hns) -> Result<String, SigillumError> {
        if !text.trim_end().ends_with(REQUIRED_SUFFIX) {
            return Err(SigillumError::MissingMarker);
        }
        let sigillum = self.generate(module, hns)?;
        Ok(format!("{}\n\nEOM Matrix Sigillum: {}", text, sigillum))
    }

    /// Number of seals per world
    pub fn statistics(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for entry in self.entries.values() {
            let world = if entry.world.is_empty() {
                "Unknown".to_string()
            } else {
                entry.world.clone()
            };
            *counts.entry(world).or_insert(0) += 1;
        }
        counts
    }

    /// Persist to the registry's own path
    pub fn save(&self) -> Result<(), SigillumError> {
        self.export(&self.path)
    }

    /// Write a copy of the registry to `path`
    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), SigillumError> {
        let yaml = serde_yaml::to_string(&self.entries)?;
        fs::write(path.as_ref(), yaml)?;
        Ok(())
    }

    /// Smallest number in `1..=MAX_SIGILLUM` not yet taken, or 1 when all are
    fn next_number(&self) -> u32 {
        let used: HashSet<u32> = self.entries.values().filter_map(|e| e.number).collect();
        (1..=MAX_SIGILLUM).find(|n| !used.contains(n)).unwrap_or(1)
    }
}

fn registry_key(module: &str, hns: &Hns) -> String {
    format!("{}|{}", module, hns)
}

/// World label selected by the first HNS group
pub fn world_for(hns: &Hns) -> &'static str {
    match hns.first_group() {
        "1" => "Azilut",
        "2" => "Beria",
        "3" => "Jezira",
        "4" => "Asija",
        "5" => "Tiferet",
        "6" => "Nezach",
        "7" => "Hod",
        "8" => "Jessod",
        "9" => "Malchut",
        _ => "Keter",
    }
}

fn short_hash(key: &str) -> String {
    let digest = Sha256::digest(key.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(HASH_LEN);
    hex
}

/// Parse a command-line HNS argument
pub fn parse_hns(s: &str) -> Result<Hns, SigillumError> {
    Hns::new(s).ok_or_else(|| SigillumError::InvalidHns(s.to_string()))
}
