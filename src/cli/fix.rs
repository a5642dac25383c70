//! Fix command: rewrite a text file into its corrected form

use crate::cli::common::{EXIT_SUCCESS, report_error, write_output};
use crate::engine::TextConformanceEngine;
use crate::error::WwaqError;
use std::fs;
use std::path::Path;

pub fn run_fix(path: &Path, output: Option<&Path>) -> i32 {
    match run_fix_inner(path, output) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn run_fix_inner(path: &Path, output: Option<&Path>) -> Result<(), WwaqError> {
    let content = fs::read_to_string(path)?;
    let engine = TextConformanceEngine::new()?;
    let fixed = engine.transform(&content);

    if fixed == content {
        tracing::info!("{} already conforms", path.display());
    }
    write_output(output, &fixed)?;
    Ok(())
}
