//! Worked scenarios with known sums.

use anyhow::{Context, Result};
use lookahead::Operand;

use super::all_adders;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "adder/scenarios";

/// `(a, b, c0, expected sum)`.
const SCENARIOS: [(&str, &str, bool, &str); 4] = [
    // 10 + 11 = 21, truncated to 4 bits
    ("1010", "1011", false, "0101"),
    // 15 + 1 = 16 overflows to zero
    ("1111", "0001", false, "0000"),
    // 1 + 1 + 1 = 3, truncated to 1 bit
    ("1", "1", true, "1"),
    ("00000000", "00000000", false, "00000000"),
];

/// Runs each scenario through every strategy and schedule.
///
/// # Errors
///
/// Returns an error if a scenario operand fails to parse or is rejected.
pub fn validate() -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let adders = all_adders();

    for (a, b, c0, expected) in SCENARIOS {
        let x: Operand = a.parse().with_context(|| format!("scenario operand {a}"))?;
        let y: Operand = b.parse().with_context(|| format!("scenario operand {b}"))?;

        let mut failures = Vec::new();
        for (label, adder) in &adders {
            let sum = adder
                .add(&x, &y, c0)
                .with_context(|| format!("{a} + {b} with {label}"))?;
            if sum.to_string() != expected {
                failures.push(format!("{label}: got {sum}, expected {expected}"));
            }
        }
        report.push(TestResult::from_failures(
            VALIDATOR,
            format!("{a} + {b} + {} = {expected}", u8::from(c0)),
            failures,
        ));
    }

    Ok(report)
}
