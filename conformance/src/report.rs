//! Conformance report types: results, severity levels, and report aggregation.

use core::fmt;

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

impl Severity {
    /// Tag printed in front of a result line.
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Pass => "PASS",
            Severity::Warning => "WARN",
            Severity::Failure => "FAIL",
        }
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
    /// Counterexamples or other detail lines.
    pub details: Vec<String>,
}

impl TestResult {
    /// Creates a passing result.
    pub fn pass(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            validator: validator.into(),
            message: message.into(),
            severity: Severity::Pass,
            details: Vec::new(),
        }
    }

    /// Creates a failure result listing the offending cases.
    pub fn fail_with_details(
        validator: impl Into<String>,
        message: impl Into<String>,
        details: Vec<String>,
    ) -> Self {
        Self {
            validator: validator.into(),
            message: message.into(),
            severity: Severity::Failure,
            details,
        }
    }

    /// Creates a warning result.
    pub fn warn(validator: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            validator: validator.into(),
            message: message.into(),
            severity: Severity::Warning,
            details: Vec::new(),
        }
    }

    /// Pass when `failures` is empty, otherwise a failure carrying them.
    ///
    /// At most [`MAX_DETAILS`] counterexamples are kept.
    pub fn from_failures(
        validator: impl Into<String>,
        message: impl Into<String>,
        mut failures: Vec<String>,
    ) -> Self {
        if failures.is_empty() {
            return Self::pass(validator, message);
        }
        let total = failures.len();
        if total > MAX_DETAILS {
            failures.truncate(MAX_DETAILS);
            failures.push(format!("... and {} more", total - MAX_DETAILS));
        }
        Self::fail_with_details(
            validator,
            format!("{} ({total} counterexample(s))", message.into()),
            failures,
        )
    }

    /// Returns true if this result represents a failure.
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

/// Counterexamples kept per failing result.
pub const MAX_DETAILS: usize = 8;

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} — {}",
            self.severity.tag(),
            self.validator,
            self.message
        )?;
        for detail in &self.details {
            write!(f, "\n       {detail}")?;
        }
        Ok(())
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

    /// Number of results with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.results
            .iter()
            .filter(|r| r.severity == severity)
            .count()
    }

    /// Returns the count of failed checks.
    pub fn failure_count(&self) -> usize {
        self.count(Severity::Failure)
    }

    /// Returns true if all checks passed (no failures).
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_truncated() {
        let failures = (0..20).map(|i| format!("case {i}")).collect();
        let result = TestResult::from_failures("adder/demo", "demo", failures);
        assert!(result.is_failure());
        assert_eq!(result.details.len(), MAX_DETAILS + 1);
        assert_eq!(result.details[MAX_DETAILS], "... and 12 more");
        assert_eq!(result.message, "demo (20 counterexample(s))");
    }

    #[test]
    fn empty_failures_pass() {
        let result = TestResult::from_failures("adder/demo", "demo", Vec::new());
        assert_eq!(result.severity, Severity::Pass);
        assert_eq!(result.to_string(), "[PASS] adder/demo — demo");
    }

    #[test]
    fn report_counts() {
        let mut report = ConformanceReport::new();
        report.push(TestResult::pass("a", "ok"));
        report.push(TestResult::warn("b", "meh"));
        assert!(report.all_passed());
        report.push(TestResult::fail_with_details("c", "bad", vec!["x".into()]));
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.count(Severity::Warning), 1);
        assert!(!report.all_passed());
    }
}
