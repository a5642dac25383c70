#![forbid(unsafe_code)]

//! HNS10 manifest document model and loading
//!
//! A manifest is a YAML mapping with `meta`, `struktur` and
//! `pipeline.sequenz`. Field values given as numbers or booleans are accepted
//! and kept as strings; unknown keys are preserved for whole-document checks.

use crate::error::ManifestError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A loaded manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestDocument {
    #[serde(default, deserialize_with = "scalar_map")]
    pub meta: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub struktur: Vec<ModuleRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline: Option<Pipeline>,

    /// The document exactly as parsed, including keys the model ignores
    #[serde(skip)]
    raw: Option<Value>,
}

/// One module of the hierarchy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    #[serde(default, deserialize_with = "opt_scalar", skip_serializing_if = "Option::is_none")]
    pub hns: Option<String>,

    #[serde(default, deserialize_with = "opt_scalar", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "opt_scalar", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "opt_scalar", skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Sefirotic attribution
    #[serde(default, deserialize_with = "opt_scalar", skip_serializing_if = "Option::is_none")]
    pub sefira: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ModuleRecord {
    /// Label used in findings: the name, or `Modul_{index}` when unnamed
    pub fn label(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Modul_{}", index))
    }
}

/// The processing pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sequenz: Vec<PipelineStep>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One pipeline step referencing a module by hierarchical position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineStep {
    #[serde(default, deserialize_with = "opt_scalar", skip_serializing_if = "Option::is_none")]
    pub hns: Option<String>,

    #[serde(default, deserialize_with = "opt_scalar", skip_serializing_if = "Option::is_none")]
    pub aktion: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kritisch: Option<bool>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ManifestDocument {
    /// Load a manifest from a YAML file
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` if the file does not exist and
    /// `ManifestError::Parse` if it is not a YAML mapping of the expected shape.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ManifestError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|message| ManifestError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse a manifest from a YAML string
    pub fn from_yaml_str(s: &str) -> Result<Self, ManifestError> {
        Self::parse(s).map_err(|message| ManifestError::Parse {
            path: "<inline>".into(),
            message,
        })
    }

    fn parse(s: &str) -> Result<Self, String> {
        let raw: Value = serde_yaml::from_str(s).map_err(|e| e.to_string())?;
        match raw {
            Value::Mapping(_) => {}
            Value::Null => return Err("document is empty".to_string()),
            _ => return Err("top level of a manifest must be a mapping".to_string()),
        }

        let mut doc: ManifestDocument =
            serde_yaml::from_value(raw.clone()).map_err(|e| e.to_string())?;
        doc.raw = Some(raw);
        Ok(doc)
    }

    /// Steps of `pipeline.sequenz`; empty when there is no pipeline
    pub fn steps(&self) -> &[PipelineStep] {
        self.pipeline
            .as_ref()
            .map(|p| p.sequenz.as_slice())
            .unwrap_or_default()
    }

    /// Serialize the whole document for terminology scanning
    ///
    /// Uses the parsed source when available so unmodelled keys are scanned too.
    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        match &self.raw {
            Some(raw) => serde_yaml::to_string(raw),
            None => serde_yaml::to_string(self),
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => None,
        other => serde_yaml::to_string(other)
            .ok()
            .map(|s| s.trim_end().to_string()),
    }
}

fn opt_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_to_string))
}

fn scalar_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(map
        .into_iter()
        .map(|(key, value)| {
            let value = scalar_to_string(&value).unwrap_or_default();
            (key, value)
        })
        .collect())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
