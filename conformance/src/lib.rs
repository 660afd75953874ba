//! ldshape conformance suite.
//!
//! Re-reads the artifacts the generators emitted and checks the structural
//! guarantees a consumer relies on.
//!
//! # Conformance Scope
//!
//! | Artifact | Checks |
//! |----------|--------|
//! | `shacl_<stem>.jsonld` | declared prefixes, node shape targets, unique ids, identifier form, property paths |
//! | `vocab.jsonld` | enumeration member lists, unique class and enumeration ids |
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = ldshape_conformance::run_all(Path::new("out")).expect("artifacts readable");
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod report;
pub mod validators;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use walkdir::WalkDir;

pub use report::{ConformanceReport, Severity, TestResult};

/// Artifact kinds recognised by file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// `shacl_<stem>.jsonld`.
    Shacl,
    /// `vocab.jsonld`.
    Vocabulary,
}

impl ArtifactKind {
    /// Recognises an artifact from its file name.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        if name == "vocab.jsonld" {
            Some(ArtifactKind::Vocabulary)
        } else if name.starts_with("shacl_") && name.ends_with(".jsonld") {
            Some(ArtifactKind::Shacl)
        } else {
            None
        }
    }
}

/// Validates one artifact file.
///
/// A document that is not valid JSON is a failure result, not an error.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn validate_file(path: &Path, kind: ArtifactKind) -> Result<ConformanceReport> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let validator = match kind {
        ArtifactKind::Shacl => format!("shacl/{file_name}"),
        ArtifactKind::Vocabulary => format!("vocab/{file_name}"),
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let document: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(err) => {
            let mut report = ConformanceReport::new();
            report.push(TestResult::fail(validator, format!("not valid JSON: {err}")));
            return Ok(report);
        }
    };
    tracing::debug!(artifact = %path.display(), "validating");
    Ok(match kind {
        ArtifactKind::Shacl => validators::shacl::validate(&validator, &document),
        ArtifactKind::Vocabulary => validators::vocab::validate(&validator, &document),
    })
}

/// Runs all validators over the artifacts directly inside `artifacts`,
/// in file-name order.
///
/// A missing directory, or one without any artifact, is a failure result.
///
/// # Errors
///
/// Returns an error only if a file system operation fails.
pub fn run_all(artifacts: &Path) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    if !artifacts.is_dir() {
        report.push(TestResult::fail(
            "artifacts",
            format!("{} is not a directory", artifacts.display()),
        ));
        return Ok(report);
    }

    let mut checked = 0usize;
    for entry in WalkDir::new(artifacts)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry
            .with_context(|| format!("Failed to list {}", artifacts.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(kind) = ArtifactKind::from_file_name(&entry.file_name().to_string_lossy()) else {
            continue;
        };
        report.extend(validate_file(entry.path(), kind)?);
        checked += 1;
    }

    if checked == 0 {
        report.push(TestResult::fail(
            "artifacts",
            format!("no shacl_*.jsonld or vocab.jsonld in {}", artifacts.display()),
        ));
    }
    tracing::info!(
        artifacts = checked,
        failures = report.failure_count(),
        "conformance run finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_names() {
        assert_eq!(ArtifactKind::from_file_name("vocab.jsonld"), Some(ArtifactKind::Vocabulary));
        assert_eq!(ArtifactKind::from_file_name("shacl_spec.jsonld"), Some(ArtifactKind::Shacl));
        assert_eq!(ArtifactKind::from_file_name("context.jsonld"), None);
        assert_eq!(ArtifactKind::from_file_name("shacl_spec.json"), None);
    }
}
