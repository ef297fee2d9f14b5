//! Tree-block carries against direct-formula carries.

use anyhow::Result;
use lookahead::{carry_into, carry_into_tree, Operand, PgTree, SerialFanout};

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "adder/equivalence";

/// For every power-of-two width up to `max_width`, every operand pair and
/// both carry-ins, compares the two resolvers bit by bit.
///
/// # Errors
///
/// Returns an error if the tree rejects a width the validator generated.
pub fn validate(max_width: usize) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    let widths = (0..usize::BITS)
        .map(|k| 1usize << k)
        .take_while(|&width| width <= max_width);

    for width in widths {
        let mut failures = Vec::new();
        let count = 1u128 << width;
        for a in 0..count {
            for b in 0..count {
                let tree = PgTree::build(
                    &SerialFanout,
                    &Operand::from_value(a, width),
                    &Operand::from_value(b, width),
                )?;
                for c0 in [false, true] {
                    for index in 0..width {
                        let direct = carry_into(tree.leaves(), index, c0);
                        let blocks = carry_into_tree(&tree, index, c0);
                        if direct != blocks {
                            failures.push(format!(
                                "a={a:0width$b} b={b:0width$b} c0={} bit {index}: direct {direct}, tree {blocks}",
                                u8::from(c0)
                            ));
                        }
                    }
                }
            }
        }
        report.push(TestResult::from_failures(
            VALIDATOR,
            format!("tree and direct carries agree at width {width}"),
            failures,
        ));
    }

    Ok(report)
}
