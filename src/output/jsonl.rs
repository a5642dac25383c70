#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order:
//! 1. All finding records (input order, errors before warnings)
//! 2. One summary record per input
//! 3. One status record

use crate::output::{Checked, all_valid};
use crate::rules::Finding;
use serde::Serialize;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    pub fn new() -> Self {
        JsonlFormatter
    }

    pub fn format(&self, checked: &[Checked]) -> String {
        let mut output = String::new();

        for item in checked {
            for finding in item.result.findings() {
                push_record(
                    &mut output,
                    &FindingRecord {
                        record_type: "finding",
                        source: &item.source,
                        finding,
                    },
                );
            }
        }

        for item in checked {
            push_record(
                &mut output,
                &SummaryRecord {
                    record_type: "summary",
                    source: &item.source,
                    valid: item.result.is_valid(),
                    score: item.result.score(),
                    errors: item.result.errors.len() as u64,
                    warnings: item.result.warnings.len() as u64,
                },
            );
        }

        let status = StatusRecord {
            record_type: "status",
            passed: all_valid(checked),
            inputs: checked.len() as u64,
            total_errors: checked.iter().map(|c| c.result.errors.len() as u64).sum(),
            total_warnings: checked.iter().map(|c| c.result.warnings.len() as u64).sum(),
        };
        push_record(&mut output, &status);

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_record(output: &mut String, record: &impl Serialize) {
    match serde_json::to_string(record) {
        Ok(json) => {
            output.push_str(&json);
            output.push('\n');
        }
        Err(e) => tracing::warn!("failed to serialize JSONL record: {}", e),
    }
}

#[derive(Debug, Serialize)]
struct FindingRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    source: &'a str,
    #[serde(flatten)]
    finding: &'a Finding,
}

#[derive(Debug, Serialize)]
struct SummaryRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    source: &'a str,
    valid: bool,
    score: u32,
    errors: u64,
    warnings: u64,
}

#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    inputs: u64,
    total_errors: u64,
    total_warnings: u64,
}
