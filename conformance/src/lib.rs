//! Lookahead adder conformance suite.
//!
//! Checks the adder against the properties it must satisfy for every input,
//! not just the ones its unit tests happen to cover.
//!
//! # Conformance Scope
//!
//! | Validator | Property |
//! |-----------|----------|
//! | `adder/scenarios` | documented worked examples, every strategy and schedule |
//! | `adder/operator` | leaf signals, combine associativity and identity |
//! | `adder/equivalence` | tree-block carries equal direct-formula carries |
//! | `adder/reference` | sums equal native addition truncated to `N` bits |
//! | `adder/idempotence` | re-evaluation and schedule choice never change results |
//!
//! # Entry Point
//!
//! ```no_run
//! use lookahead_conformance::{run_all, SuiteConfig};
//!
//! let report = run_all(&SuiteConfig::default()).expect("Failed to run conformance");
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

use tracing::info;

pub use report::{ConformanceReport, Severity, TestResult};

/// Widest operand checked exhaustively when none is configured.
pub const DEFAULT_EXHAUSTIVE_WIDTH: usize = 8;

/// Upper bound on the exhaustive width; `4^12` operand pairs per strategy.
pub const MAX_EXHAUSTIVE_WIDTH: usize = 12;

/// Parameters of a conformance run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Every operand pair of every width up to this one is checked.
    pub max_exhaustive_width: usize,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            max_exhaustive_width: DEFAULT_EXHAUSTIVE_WIDTH,
        }
    }
}

/// Runs all conformance validators and returns the aggregated report.
///
/// Validators are run in this order:
/// 1. Worked scenarios
/// 2. Combine operator algebra
/// 3. Tree/direct carry equivalence
/// 4. Reference addition
/// 5. Idempotence and schedule independence
///
/// # Errors
///
/// Returns an error if the adder rejects an input the suite constructed,
/// which means the suite itself is wrong rather than the adder.
pub fn run_all(config: &SuiteConfig) -> anyhow::Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    let width = exhaustive_width(config, &mut report);
    info!(exhaustive_width = width, "running conformance suite");

    report.extend(validators::scenarios::validate()?);
    report.extend(validators::operator::validate());
    report.extend(validators::equivalence::validate(width)?);
    report.extend(validators::reference::validate(width)?);
    report.extend(validators::idempotence::validate()?);

    info!(
        results = report.results.len(),
        failures = report.failure_count(),
        "conformance suite finished"
    );
    Ok(report)
}

/// The exhaustive width actually used, warning when the request is capped.
fn exhaustive_width(config: &SuiteConfig, report: &mut ConformanceReport) -> usize {
    if config.max_exhaustive_width > MAX_EXHAUSTIVE_WIDTH {
        report.push(TestResult::warn(
            "adder/config",
            format!(
                "exhaustive width {} capped at {MAX_EXHAUSTIVE_WIDTH}",
                config.max_exhaustive_width
            ),
        ));
        MAX_EXHAUSTIVE_WIDTH
    } else {
        config.max_exhaustive_width.max(1)
    }
}
