#![forbid(unsafe_code)]

//! Public glossary: canonical spelling to origin script

use crate::error::WwaqError;
use crate::rules::builtin::TERM_RULES;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Every term with a known origin-script spelling, keyed by canonical form
pub fn public_glossary() -> BTreeMap<&'static str, &'static str> {
    TERM_RULES
        .iter()
        .filter_map(|entry| entry.origin.map(|origin| (entry.correct, origin)))
        .collect()
}

/// The glossary as a YAML mapping
pub fn render_glossary() -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&public_glossary())
}

/// Write the glossary to `path` as YAML
pub fn export_glossary(path: impl AsRef<Path>) -> Result<(), WwaqError> {
    let path = path.as_ref();
    let yaml = render_glossary()?;
    fs::write(path, yaml)?;
    tracing::info!("glossary written to {}", path.display());
    Ok(())
}
