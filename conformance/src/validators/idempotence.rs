//! Re-evaluation and scheduling never change a result.

use anyhow::{Context, Result};
use lookahead::{Addition, Operand, PgTree, RayonFanout, SerialFanout};

use super::all_adders;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "adder/idempotence";

const PAIRS: [(u128, u128); 4] = [
    (0, 0),
    (u128::MAX, 1),
    (0x0123_4567_89AB_CDEF_FEDC_BA98_7654_3210, 0x1111_2222_3333_4444_5555_6666_7777_8888),
    (0xFFFF_0000_FFFF_0000_FFFF_0000_FFFF_0000, 0x0000_FFFF_0000_FFFF_0000_FFFF_0000_FFFF),
];

/// Builds trees and full traces twice per adder and compares them, then
/// compares across adders.
///
/// # Errors
///
/// Returns an error if the adder rejects one of the fixed 128-bit pairs.
pub fn validate() -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();
    let adders = all_adders();

    let mut tree_failures = Vec::new();
    let mut trace_failures = Vec::new();
    let mut schedule_failures = Vec::new();

    for (a, b) in PAIRS {
        let x = Operand::from_value(a, 128);
        let y = Operand::from_value(b, 128);

        let serial = PgTree::build(&SerialFanout, &x, &y)?;
        let first = PgTree::build(&RayonFanout::new(2), &x, &y)?;
        let second = PgTree::build(&RayonFanout::new(2), &x, &y)?;
        if first != second || first != serial {
            tree_failures.push(format!("{a:#x} + {b:#x}"));
        }

        let mut reference: Option<Addition> = None;
        for (label, adder) in &adders {
            let once = adder.add_traced(&x, &y, true).with_context(|| label.clone())?;
            let twice = adder.add_traced(&x, &y, true).with_context(|| label.clone())?;
            if once != twice {
                trace_failures.push(format!("{label}: {a:#x} + {b:#x}"));
            }
            match &reference {
                None => reference = Some(once),
                Some(expected) => {
                    if once.sum != expected.sum || once.carries != expected.carries {
                        schedule_failures.push(format!("{label}: {a:#x} + {b:#x}"));
                    }
                }
            }
        }
    }

    report.push(TestResult::from_failures(
        VALIDATOR,
        "tree rebuilds are bitwise identical across schedules",
        tree_failures,
    ));
    report.push(TestResult::from_failures(
        VALIDATOR,
        "repeated additions produce identical traces",
        trace_failures,
    ));
    report.push(TestResult::from_failures(
        VALIDATOR,
        "every strategy and schedule yields the same sum and carries",
        schedule_failures,
    ));

    Ok(report)
}
