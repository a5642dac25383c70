#![forbid(unsafe_code)]

//! Human-readable output
//!
//! Plain report strings plus a colored pass/fail banner written through
//! `termcolor`.

use crate::config::ColorOption;
use crate::engine::ValidationResult;
use crate::manifest::ManifestDocument;
use crate::output::{Checked, all_valid};
use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const RULE_WIDE: usize = 60;
const RULE_NARROW: usize = 40;

/// Formats text validation results for terminals
pub struct HumanFormatter;

impl HumanFormatter {
    pub fn new() -> Self {
        HumanFormatter
    }

    /// One block per input: findings, then a score line
    pub fn format(&self, checked: &[Checked]) -> String {
        let mut output = String::new();

        for item in checked {
            for finding in item.result.findings() {
                let _ = writeln!(output, "{}: {}", item.source, finding);
                if let Some(suggestion) = &finding.suggestion {
                    let _ = writeln!(output, "    suggestion: {}", suggestion);
                }
            }
            let _ = writeln!(
                output,
                "{}: score {}/100 ({} critical, {} warnings)",
                item.source,
                item.result.score(),
                item.result.errors.len(),
                item.result.warnings.len()
            );
        }

        output
    }

    /// Summary line matching the banner color
    pub fn summary(&self, checked: &[Checked]) -> String {
        let failed = checked.iter().filter(|c| !c.result.is_valid()).count();
        if all_valid(checked) {
            format!("WWAQ check PASSED: {} input(s) conform", checked.len())
        } else {
            format!(
                "WWAQ check FAILED: {} of {} input(s) have critical findings",
                failed,
                checked.len()
            )
        }
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Multi-section manifest validation report, closed by `Q!`
pub fn manifest_report(
    path: &Path,
    manifest: &ManifestDocument,
    result: &ValidationResult,
    timestamp: &str,
) -> String {
    let meta = |key: &str| {
        manifest
            .meta
            .get(key)
            .map(String::as_str)
            .unwrap_or("Unknown")
            .to_string()
    };

    let mut lines = vec![
        "=".repeat(RULE_WIDE),
        "WWAQ MANIFEST VALIDATION REPORT".to_string(),
        "=".repeat(RULE_WIDE),
        format!("Manifest: {}", path.display()),
        format!("Timestamp: {}", timestamp),
        format!("Schema: {}", meta("schema")),
        format!("Version: {}", meta("version")),
        String::new(),
    ];

    if result.is_valid() {
        lines.push("✓ VALIDATION PASSED".to_string());
    } else {
        lines.push(format!(
            "✗ VALIDATION FAILED ({} critical)",
            result.errors.len()
        ));
    }
    lines.push(format!("Warnings: {}", result.warnings.len()));
    lines.push(String::new());

    if !result.errors.is_empty() {
        lines.push("ERRORS:".to_string());
        lines.push("-".repeat(RULE_NARROW));
        for finding in &result.errors {
            lines.push(format!(
                "[{}] {}",
                finding.severity.as_str().to_uppercase(),
                finding.location
            ));
            lines.push(format!("  Type: {}", finding.kind));
            lines.push(format!("  Description: {}", finding.message));
            lines.push(String::new());
        }
    }

    if !result.warnings.is_empty() {
        lines.push("WARNINGS:".to_string());
        lines.push("-".repeat(RULE_NARROW));
        for finding in &result.warnings {
            lines.push(format!(
                "[{}] {}",
                finding.severity.as_str().to_uppercase(),
                finding.location
            ));
            lines.push(format!("  {}", finding.message));
        }
    }

    lines.push(String::new());
    lines.push("Q!".to_string());
    lines.join("\n")
}

/// Resolve the configured color option against the actual stream
pub fn color_choice(option: ColorOption, is_terminal: bool) -> ColorChoice {
    match option {
        ColorOption::Always => ColorChoice::Always,
        ColorOption::Never => ColorChoice::Never,
        ColorOption::Auto if is_terminal => ColorChoice::Auto,
        ColorOption::Auto => ColorChoice::Never,
    }
}

/// Write `line` to stdout, green when `passed` and red otherwise
pub fn print_banner(line: &str, passed: bool, color: ColorOption) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice(color, io::stdout().is_terminal()));
    write_banner(&mut stdout, line, passed)
}

pub fn write_banner(out: &mut impl WriteColor, line: &str, passed: bool) -> io::Result<()> {
    let color = if passed { Color::Green } else { Color::Red };
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{}", line)?;
    out.reset()?;
    writeln!(out)
}
