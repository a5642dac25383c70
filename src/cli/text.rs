//! Text command implementation
//!
//! This module implements the `wwaq text` command, which:
//! - Loads configuration from wwaq.toml (defaults when absent)
//! - Discovers text files, or takes a literal `--text` argument
//! - Validates every input with the conformance engine
//! - Formats output (human or JSONL)
//! - Returns the appropriate exit code

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    EXIT_FAILED, EXIT_SUCCESS, discover_files, load_config, report_error, resolve_color,
    resolve_format,
};
use crate::config::OutputFormat as ConfigFormat;
use crate::engine::TextConformanceEngine;
use crate::error::WwaqError;
use crate::output::{Checked, HumanFormatter, JsonlFormatter, all_valid, human};
use std::fs;

/// Source label used for a literal `--text` argument
pub const LITERAL_SOURCE: &str = "<text>";

/// Run the text command
///
/// # Returns
///
/// Exit code:
/// - 0: every input is free of critical findings
/// - 1: at least one input has critical findings
/// - 2: configuration or I/O error
pub fn run_text(
    paths: &[String],
    text: Option<&str>,
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> i32 {
    match run_text_inner(paths, text, format, color) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_FAILED,
        Err(e) => report_error(&e),
    }
}

fn run_text_inner(
    paths: &[String],
    text: Option<&str>,
    format: Option<OutputFormat>,
    color: Option<ColorChoice>,
) -> Result<bool, WwaqError> {
    let config = load_config()?;
    let format = resolve_format(format, &config);
    let engine = TextConformanceEngine::new()?;

    let checked = match text {
        Some(text) => vec![Checked::new(LITERAL_SOURCE, engine.validate(text))],
        None => {
            let default_paths = [".".to_string()];
            let paths = if paths.is_empty() {
                &default_paths[..]
            } else {
                paths
            };

            let files = discover_files(paths, &config)?;
            if files.is_empty() {
                eprintln!("Warning: No files found to check.");
                return Ok(true);
            }
            if format == ConfigFormat::Human {
                eprintln!("Checking {} files...", files.len());
            }

            let mut checked = Vec::with_capacity(files.len());
            for file in files {
                let content = fs::read_to_string(&file)?;
                checked.push(Checked::new(file.display().to_string(), engine.validate(&content)));
            }
            checked
        }
    };

    let passed = all_valid(&checked);
    match format {
        ConfigFormat::Human => {
            let formatter = HumanFormatter::new();
            print!("{}", formatter.format(&checked));
            human::print_banner(
                &formatter.summary(&checked),
                passed,
                resolve_color(color, &config),
            )?;
        }
        ConfigFormat::Jsonl => print!("{}", JsonlFormatter::new().format(&checked)),
    }

    Ok(passed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_text_exit_codes() {
        assert_eq!(
            run_text(&[], Some("Die Qabbala lehrt.\nQ!"), Some(OutputFormat::Jsonl), None),
            EXIT_SUCCESS
        );
        assert_eq!(
            run_text(&[], Some("Die Kabbala lehrt."), Some(OutputFormat::Jsonl), None),
            EXIT_FAILED
        );
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope").display().to_string();
        // a nonexistent path is walked and reported by the walker
        assert_eq!(
            run_text(&[missing], None, Some(OutputFormat::Jsonl), None),
            crate::cli::common::EXIT_ERROR
        );
    }
}
