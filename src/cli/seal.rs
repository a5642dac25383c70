//! Seal command: append an EOM Matrix sigillum to a confirmed text

use crate::cli::common::{EXIT_SUCCESS, load_config, report_error, write_output};
use crate::error::WwaqError;
use crate::export::SigillumRegistry;
use crate::export::sigillum::parse_hns;
use std::fs;
use std::path::Path;

/// Run the seal command
///
/// Exit code 1 when the text does not end with `Q!`, 2 on load errors.
pub fn run_seal(
    path: &Path,
    module: &str,
    hns: &str,
    registry: Option<&Path>,
    output: Option<&Path>,
) -> i32 {
    match run_seal_inner(path, module, hns, registry, output) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => report_error(&e),
    }
}

fn run_seal_inner(
    path: &Path,
    module: &str,
    hns: &str,
    registry: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), WwaqError> {
    let hns = parse_hns(hns)?;
    let registry_path = match registry {
        Some(path) => path.to_path_buf(),
        None => load_config()?.sigillum.registry,
    };

    let text = fs::read_to_string(path)?;
    let mut registry = SigillumRegistry::open(registry_path)?;
    let sealed = registry.seal_text(&text, module, &hns)?;

    write_output(output, &sealed)?;
    Ok(())
}
