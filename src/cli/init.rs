//! Initialize a WWAQ project
//!
//! Creates a default wwaq.toml in the working directory.

use crate::config::{CONFIG_FILE, DEFAULT_CONFIG};
use std::fs;
use std::path::Path;

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of init command
#[derive(Debug, Default, PartialEq, Eq)]
pub struct InitResult {
    /// Files that were created
    pub created: Vec<String>,
    /// Files that were skipped (already existed)
    pub skipped: Vec<String>,
    /// Files that were overwritten
    pub overwritten: Vec<String>,
}

/// Run the init command in the working directory
///
/// # Arguments
/// * `force` - If true, overwrite an existing wwaq.toml; otherwise skip it
pub fn run_init(force: bool) -> Result<InitResult, InitError> {
    run_init_in(Path::new("."), force)
}

/// Run the init command with `dir` as project root
pub fn run_init_in(dir: &Path, force: bool) -> Result<InitResult, InitError> {
    let mut result = InitResult::default();
    handle_file(&dir.join(CONFIG_FILE), CONFIG_FILE, DEFAULT_CONFIG, force, &mut result)?;
    Ok(result)
}

/// Handle creation of a single file
fn handle_file(
    path: &Path,
    label: &str,
    content: &str,
    force: bool,
    result: &mut InitResult,
) -> Result<(), InitError> {
    if path.exists() {
        if force {
            fs::write(path, content)?;
            result.overwritten.push(label.to_string());
        } else {
            result.skipped.push(label.to_string());
        }
    } else {
        fs::write(path, content)?;
        result.created.push(label.to_string());
    }

    Ok(())
}
