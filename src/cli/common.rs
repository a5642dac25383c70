//! Common helper functions shared across CLI commands
//!
//! This module provides shared functionality for loading configuration,
//! discovering files, writing output and mapping errors to exit codes.

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::config::{CONFIG_FILE, ColorOption, Config, OutputFormat as ConfigFormat};
use crate::engine::file_walker::{FileWalker, FileWalkerError};
use crate::error::{ConfigError, WwaqError};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Every input conforms
pub const EXIT_SUCCESS: i32 = 0;
/// At least one input has critical findings, or a seal was refused
pub const EXIT_FAILED: i32 = 1;
/// An input or the configuration could not be loaded
pub const EXIT_ERROR: i32 = 2;

/// Load wwaq.toml from the working directory, or defaults when absent
///
/// # Errors
///
/// Returns `ConfigError::Parse` or `ConfigError::Validation` if wwaq.toml
/// exists but is invalid.
pub(crate) fn load_config() -> Result<Config, ConfigError> {
    Config::load_or_default(CONFIG_FILE)
}

/// Discover text files to check
///
/// Explicit file arguments are taken as given; directories are walked with the
/// include/exclude patterns from the configuration.
pub(crate) fn discover_files(
    paths: &[String],
    config: &Config,
) -> Result<Vec<PathBuf>, FileWalkerError> {
    let mut all_files = Vec::new();

    for path_str in paths {
        let path = Path::new(path_str);

        if path.is_file() {
            all_files.push(path.to_path_buf());
            continue;
        }

        let walker = FileWalker::new(path, &config.wwaq.include, &config.wwaq.exclude)?;
        for result in walker.walk() {
            all_files.push(result?.path);
        }
    }

    Ok(all_files)
}

/// Write `content` to `output`, or to stdout when no path is given
pub(crate) fn write_output(output: Option<&Path>, content: &str) -> io::Result<()> {
    match output {
        Some(path) => fs::write(path, content),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                writeln!(stdout)?;
            }
            stdout.flush()
        }
    }
}

/// Command-line format overrides the configured one
pub(crate) fn resolve_format(cli: Option<OutputFormat>, config: &Config) -> ConfigFormat {
    cli.map(ConfigFormat::from).unwrap_or(config.output.format)
}

pub(crate) fn resolve_color(cli: Option<ColorChoice>, config: &Config) -> ColorOption {
    cli.map(ColorOption::from).unwrap_or(config.output.color)
}

/// Print the error and map it to an exit code
pub(crate) fn report_error(e: &WwaqError) -> i32 {
    eprintln!("Error: {}", e);
    if e.is_load_error() {
        EXIT_ERROR
    } else {
        EXIT_FAILED
    }
}
