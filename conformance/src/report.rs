//! Conformance report types: results, severity levels, and report aggregation.

use std::fmt;

/// Severity level of a conformance check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The check passed.
    Pass,
    /// The check identified a warning (non-blocking).
    Warning,
    /// The check failed (blocks conformance).
    Failure,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Pass => "PASS",
            Severity::Warning => "WARN",
            Severity::Failure => "FAIL",
        })
    }
}

/// A single conformance check result.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Short identifier of the validator that produced this result.
    pub validator: String,
    /// Human-readable message describing the outcome.
    pub message: String,
    /// Severity of the result.
    pub severity: Severity,
    /// Optional additional detail lines.
    pub details: Vec<String>,
}

impl TestResult {
    fn new(validator: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            validator: validator.into(),
            message: message.into(),
            severity,
            details: Vec::new(),
        }
    }

    /// Creates a passing result.
    pub fn pass(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator, message, Severity::Pass)
    }

    /// Creates a failure result.
    pub fn fail(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator, message, Severity::Failure)
    }

    /// Creates a failure result with additional detail lines.
    pub fn fail_with_details(
        validator: impl Into<String>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self {
            details,
            ..Self::fail(validator, message)
        }
    }

    /// Creates a warning result.
    pub fn warn(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(validator, message, Severity::Warning)
    }

    /// Returns true if this result represents a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

/// Aggregated conformance report from all validators.
#[derive(Debug, Default)]
pub struct ConformanceReport {
    /// All individual test results across all validators.
    pub results: Vec<TestResult>,
}

impl ConformanceReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result to this report.
    pub fn push(&mut self, result: TestResult) {
        self.results.push(result);
    }

    /// Extends this report with results from another report.
    pub fn extend(&mut self, other: ConformanceReport) {
        self.results.extend(other.results);
    }

    /// Returns the count of results with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.results.iter().filter(|r| r.severity == severity).count()
    }

    /// Returns the count of failed checks.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.count(Severity::Failure)
    }

    /// Returns true if all checks passed (no failures).
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }

    /// Pushes a pass when `offenders` is empty, otherwise a failure listing
    /// them.
    pub fn check(
        &mut self,
        validator: &str,
        passed: impl Into<String>,
        failed: impl Into<String>,
        offenders: Vec<String>,
    ) {
        if offenders.is_empty() {
            self.push(TestResult::pass(validator, passed));
        } else {
            self.push(TestResult::fail_with_details(validator, failed, offenders));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_records_pass_or_failure() {
        let mut report = ConformanceReport::new();
        report.check("v", "ok", "bad", Vec::new());
        report.check("v", "ok", "bad", vec!["x".to_owned()]);
        report.push(TestResult::warn("v", "hmm"));
        assert_eq!(report.count(Severity::Pass), 1);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.count(Severity::Warning), 1);
        assert!(!report.all_passed());
        assert_eq!(report.results[1].details, vec!["x".to_owned()]);
    }
}
