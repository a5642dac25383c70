#![forbid(unsafe_code)]

//! Manifest structure validation
//!
//! Checks an HNS10 manifest in four passes: meta fields, the module
//! hierarchy, the pipeline references and whole-document terminology.
//! Findings accumulate on the validator across calls.

use crate::engine::result::ValidationResult;
use crate::engine::text::TextConformanceEngine;
use crate::error::WwaqError;
use crate::manifest::ManifestDocument;
use crate::output::human;
use crate::rules::{Finding, ScanContext};
use crate::types::{FindingKind, Hns, Severity};
use chrono::Local;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Meta keys every manifest must carry
pub const REQUIRED_META: [&str; 4] = ["version", "schema", "stand", "ort"];

/// Schema identifier a manifest must declare
pub const EXPECTED_SCHEMA: &str = "HNS10";

/// Canonical sefira names accepted on modules
pub const SEFIRA_NAMEN: [&str; 10] = [
    "Keter", "Chochmah", "Binah", "Chesed", "Gewurah", "Tiferet", "Nezach", "Hod", "Jesod",
    "Malchut",
];

/// Attributions outside the ten sefirot that are still accepted verbatim
pub const SEFIRA_EXCEPTIONS: [&str; 2] = ["Über Malchut - Azilut selbst", "Keter-in-Chochmah"];

const ROOT: &str = "root";
const UNKNOWN_ACTION: &str = "Unknown";

pub struct ManifestStructureValidator {
    manifest: ManifestDocument,
    path: PathBuf,
    engine: TextConformanceEngine,
    strict: bool,
    result: ValidationResult,
}

impl ManifestStructureValidator {
    /// Load the manifest at `path` and build a validator over the built-in rules
    pub fn open(path: impl AsRef<Path>) -> Result<Self, WwaqError> {
        let path = path.as_ref();
        let manifest = ManifestDocument::load(path)?;
        let engine = TextConformanceEngine::new()?;
        Ok(Self::new(manifest, engine).with_path(path))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, WwaqError> {
        let manifest = ManifestDocument::from_yaml_str(yaml)?;
        let engine = TextConformanceEngine::new()?;
        Ok(Self::new(manifest, engine))
    }

    /// Validator over an already parsed document; strict mode is on
    pub fn new(manifest: ManifestDocument, engine: TextConformanceEngine) -> Self {
        Self {
            manifest,
            path: PathBuf::from("<inline>"),
            engine,
            strict: true,
            result: ValidationResult::new(),
        }
    }

    /// Turn strict schema checking on or off
    ///
    /// When off, a schema other than `HNS10` is reported as a warning.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn manifest(&self) -> &ManifestDocument {
        &self.manifest
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Required meta fields and the schema identifier
    ///
    /// Returns true when this check added no critical finding.
    pub fn check_meta(&mut self) -> bool {
        let before = self.result.errors.len();

        let missing: Vec<&str> = REQUIRED_META
            .iter()
            .copied()
            .filter(|key| !self.manifest.meta.contains_key(*key))
            .collect();
        if !missing.is_empty() {
            self.result.push(Finding::new(
                FindingKind::Meta,
                ROOT,
                format!("Missing meta fields: {}", missing.join(", ")),
                Severity::Critical,
            ));
        }

        if let Some(schema) = self.manifest.meta.get("schema")
            && schema != EXPECTED_SCHEMA
        {
            let severity = if self.strict {
                Severity::Critical
            } else {
                Severity::Warning
            };
            self.result.push(Finding::new(
                FindingKind::Schema,
                ROOT,
                format!("Unexpected schema '{}', expected {}", schema, EXPECTED_SCHEMA),
                severity,
            ));
        }

        self.finish_check("meta", before)
    }

    /// Module hierarchy: HNS shape, uniqueness of HNS and ID, sefira names
    pub fn check_structure(&mut self) -> bool {
        let before = self.result.errors.len();

        if self.manifest.struktur.is_empty() {
            self.result.push(Finding::new(
                FindingKind::Structure,
                ROOT,
                "No modules defined in struktur",
                Severity::Critical,
            ));
            return self.finish_check("structure", before);
        }

        let mut seen_hns = HashSet::new();
        let mut seen_ids = HashSet::new();
        let mut findings = Vec::new();

        for (idx, module) in self.manifest.struktur.iter().enumerate() {
            let label = module.label(idx);

            match module.hns.as_deref() {
                None => findings.push(Finding::new(
                    FindingKind::HnsFormat,
                    &label,
                    "Module has no HNS",
                    Severity::Critical,
                )),
                Some(hns) => {
                    if !Hns::is_well_formed(hns) {
                        findings.push(Finding::new(
                            FindingKind::HnsFormat,
                            &label,
                            format!("Invalid HNS format: {}", hns),
                            Severity::Critical,
                        ));
                    }
                    if !seen_hns.insert(hns) {
                        findings.push(Finding::new(
                            FindingKind::DuplicateHns,
                            &label,
                            format!("Duplicate HNS: {}", hns),
                            Severity::Critical,
                        ));
                    }
                }
            }

            if let Some(id) = module.id.as_deref()
                && !seen_ids.insert(id)
            {
                findings.push(Finding::new(
                    FindingKind::DuplicateId,
                    &label,
                    format!("Duplicate module ID: {}", id),
                    Severity::Critical,
                ));
            }

            if let Some(sefira) = module.sefira.as_deref()
                && !is_known_sefira(sefira)
            {
                findings.push(Finding::new(
                    FindingKind::Sefira,
                    &label,
                    format!("Unknown sefira: {}", sefira),
                    Severity::Warning,
                ));
            }
        }

        self.result.extend(findings);
        self.finish_check("structure", before)
    }

    /// Every pipeline step must reference an HNS present in `struktur`
    pub fn check_pipeline(&mut self) -> bool {
        let before = self.result.errors.len();

        if self.manifest.pipeline.is_none() {
            self.result.push(Finding::new(
                FindingKind::Pipeline,
                ROOT,
                "No pipeline defined",
                Severity::Critical,
            ));
            return self.finish_check("pipeline", before);
        }
        if self.manifest.steps().is_empty() {
            self.result.push(Finding::new(
                FindingKind::Pipeline,
                ROOT,
                "Pipeline sequence is empty",
                Severity::Critical,
            ));
            return self.finish_check("pipeline", before);
        }

        let available: HashSet<&str> = self
            .manifest
            .struktur
            .iter()
            .filter_map(|m| m.hns.as_deref())
            .collect();

        let findings: Vec<Finding> = self
            .manifest
            .steps()
            .iter()
            .filter(|step| {
                !step
                    .hns
                    .as_deref()
                    .is_some_and(|hns| available.contains(hns))
            })
            .map(|step| {
                let action = step.aktion.as_deref().unwrap_or(UNKNOWN_ACTION);
                let message = match step.hns.as_deref() {
                    Some(hns) => format!("HNS {} not found in struktur", hns),
                    None => "Pipeline step has no HNS".to_string(),
                };
                Finding::new(FindingKind::Reference, action, message, Severity::Critical)
            })
            .collect();

        self.result.extend(findings);
        self.finish_check("pipeline", before)
    }

    /// Terminology rules over the whole serialized document
    pub fn check_conformance(&mut self) -> bool {
        let before = self.result.errors.len();

        match self.manifest.to_yaml_string() {
            Ok(yaml) => {
                let scan = self.engine.scan(&ScanContext::document(&yaml));
                self.result.extend(scan.findings().cloned());
            }
            Err(e) => {
                tracing::warn!("manifest could not be serialized: {}", e);
                self.result.push(Finding::new(
                    FindingKind::Structure,
                    ROOT,
                    format!("Manifest could not be serialized: {}", e),
                    Severity::Critical,
                ));
            }
        }

        self.finish_check("conformance", before)
    }

    /// Run all four checks in order
    ///
    /// Returns true iff no critical finding has been recorded.
    pub fn run_all(&mut self) -> bool {
        self.check_meta();
        self.check_structure();
        self.check_pipeline();
        self.check_conformance();

        tracing::info!(
            path = %self.path.display(),
            errors = self.result.errors.len(),
            warnings = self.result.warnings.len(),
            "manifest validated"
        );
        self.result.is_valid()
    }

    pub fn errors(&self) -> &[Finding] {
        &self.result.errors
    }

    pub fn warnings(&self) -> &[Finding] {
        &self.result.warnings
    }

    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    pub fn into_result(self) -> ValidationResult {
        self.result
    }

    /// Human-readable report of the findings collected so far
    pub fn generate_report(&self) -> String {
        human::manifest_report(
            &self.path,
            &self.manifest,
            &self.result,
            &Local::now().to_rfc3339(),
        )
    }

    fn finish_check(&self, check: &str, before: usize) -> bool {
        let added = self.result.errors.len() - before;
        tracing::debug!(check, critical = added, "manifest check finished");
        added == 0
    }
}

fn is_known_sefira(sefira: &str) -> bool {
    SEFIRA_NAMEN.contains(&sefira) || SEFIRA_EXCEPTIONS.contains(&sefira)
}
