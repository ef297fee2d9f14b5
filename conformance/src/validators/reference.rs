//! Sums against native wrapping addition.

use anyhow::{Context, Result};
use lookahead::{CarryLookaheadAdder, CarryStrategy, Operand, RayonFanout, SerialFanout};

use super::low_mask;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "adder/reference";

const EDGES: [u128; 8] = [
    0,
    1,
    0x5555_5555_5555_5555_5555_5555_5555_5555,
    0xAAAA_AAAA_AAAA_AAAA_AAAA_AAAA_AAAA_AAAA,
    0x0000_0000_FFFF_FFFF_0000_0000_FFFF_FFFF,
    0x8000_0000_0000_0000_8000_0000_0000_0000,
    u128::MAX - 1,
    u128::MAX,
];

/// Exhaustive for every width `1..=max_width`, then edge patterns at 64 and
/// 128 bits. The tree strategy is only exercised on power-of-two widths.
///
/// # Errors
///
/// Returns an error if the adder rejects an operand pair the validator built.
pub fn validate(max_width: usize) -> Result<ConformanceReport> {
    let mut report = ConformanceReport::new();

    for width in 1..=max_width {
        let mut strategies = vec![CarryStrategy::Direct];
        if width.is_power_of_two() {
            strategies.push(CarryStrategy::Tree);
        }
        let count = 1u128 << width;

        for strategy in strategies {
            let adder = CarryLookaheadAdder::serial(strategy);
            let mut failures = Vec::new();
            for a in 0..count {
                for b in 0..count {
                    for c0 in [false, true] {
                        let expected = (a + b + u128::from(c0)) & low_mask(width);
                        let sum = adder
                            .add(
                                &Operand::from_value(a, width),
                                &Operand::from_value(b, width),
                                c0,
                            )
                            .with_context(|| format!("{a} + {b} at width {width}"))?;
                        if sum.value() != Some(expected) {
                            failures.push(format!(
                                "{a} + {b} + {}: got {sum}, expected {expected:0width$b}",
                                u8::from(c0)
                            ));
                        }
                    }
                }
            }
            report.push(TestResult::from_failures(
                VALIDATOR,
                format!("{strategy} sums match native addition at width {width}"),
                failures,
            ));
        }
    }

    for width in [64usize, 128] {
        for strategy in CarryStrategy::ALL {
            let adder = CarryLookaheadAdder::new(RayonFanout::new(8), strategy);
            let mut failures = Vec::new();
            for a in EDGES {
                for b in EDGES {
                    for c0 in [false, true] {
                        let (a, b) = (a & low_mask(width), b & low_mask(width));
                        let expected = a.wrapping_add(b).wrapping_add(u128::from(c0)) & low_mask(width);
                        let sum = adder
                            .add(
                                &Operand::from_value(a, width),
                                &Operand::from_value(b, width),
                                c0,
                            )
                            .with_context(|| format!("{a:#x} + {b:#x} at width {width}"))?;
                        if sum.value() != Some(expected) {
                            failures.push(format!("{a:#x} + {b:#x} + {}", u8::from(c0)));
                        }
                    }
                }
            }
            report.push(TestResult::from_failures(
                VALIDATOR,
                format!("{strategy} sums match native addition on {width}-bit edge patterns"),
                failures,
            ));
        }
    }

    // The serial fan-out must reach the same sums as the pool for the widest case
    let serial = CarryLookaheadAdder::serial(CarryStrategy::Tree);
    let mut failures = Vec::new();
    for a in EDGES {
        let sum = serial
            .add(&Operand::from_value(a, 128), &Operand::from_value(a, 128), true)
            .context("128-bit doubling")?;
        let expected = a.wrapping_add(a).wrapping_add(1);
        if sum.value() != Some(expected) {
            failures.push(format!("2 * {a:#x} + 1"));
        }
    }
    report.push(TestResult::from_failures(
        VALIDATOR,
        "serial 128-bit doubling matches native addition",
        failures,
    ));

    Ok(report)
}
