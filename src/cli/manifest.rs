//! Manifest command: run every manifest check and emit the report

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_FAILED, EXIT_SUCCESS, load_config, report_error, resolve_color, resolve_format,
    write_output,
};
use crate::config::OutputFormat as ConfigFormat;
use crate::engine::ManifestStructureValidator;
use crate::error::WwaqError;
use crate::output::{Checked, JsonlFormatter, human};
use std::path::Path;

/// Options of one `wwaq manifest` run
#[derive(Debug, Clone, Copy, Default)]
pub struct ManifestOptions<'a> {
    /// Explicit strictness; None defers to wwaq.toml
    pub strict: Option<bool>,
    pub output: Option<&'a Path>,
    pub format: Option<OutputFormat>,
    pub color: Option<ColorChoice>,
}

/// Run the manifest command
///
/// Exit code 0 when the manifest has no critical findings, 1 when it has,
/// 2 when it cannot be loaded.
pub fn run_manifest(path: &Path, options: ManifestOptions<'_>) -> i32 {
    match run_manifest_inner(path, options) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_FAILED,
        Err(e) => report_error(&e),
    }
}

fn run_manifest_inner(path: &Path, options: ManifestOptions<'_>) -> Result<bool, WwaqError> {
    let config = load_config()?;
    let strict = options.strict.unwrap_or(config.wwaq.strict);

    let mut validator = ManifestStructureValidator::open(path)?.with_strict(strict);
    let passed = validator.run_all();

    match resolve_format(options.format, &config) {
        ConfigFormat::Human => {
            write_output(options.output, &validator.generate_report())?;
            if let Some(output) = options.output {
                let line = format!(
                    "Manifest {}: report written to {}",
                    if passed { "PASSED" } else { "FAILED" },
                    output.display()
                );
                human::print_banner(&line, passed, resolve_color(options.color, &config))?;
            }
        }
        ConfigFormat::Jsonl => {
            let source = validator.path().display().to_string();
            let checked = [Checked::new(source, validator.into_result())];
            write_output(options.output, &JsonlFormatter::new().format(&checked))?;
        }
    }

    Ok(passed)
}
