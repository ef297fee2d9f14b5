//! Algebra of the leaf signals and the combine operator.
//!
//! There are only four distinct propagate/generate pairs, so associativity
//! and identity are checked over every triple.

use lookahead::PgPair;

use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "adder/operator";

const PAIRS: [PgPair; 4] = [
    PgPair::new(false, false),
    PgPair::new(false, true),
    PgPair::new(true, false),
    PgPair::new(true, true),
];

/// Checks leaf identity, associativity and the identity element.
pub fn validate() -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let mut leaf_failures = Vec::new();
    if PgPair::leaf(false, false) != PgPair::new(false, false) {
        leaf_failures.push(format!("leaf(0, 0) = {:?}", PgPair::leaf(false, false)));
    }
    if PgPair::leaf(true, true) != PgPair::new(true, true) {
        leaf_failures.push(format!("leaf(1, 1) = {:?}", PgPair::leaf(true, true)));
    }
    report.push(TestResult::from_failures(
        VALIDATOR,
        "leaf(0, 0) = (0, 0) and leaf(1, 1) = (1, 1)",
        leaf_failures,
    ));

    let mut assoc_failures = Vec::new();
    for x in PAIRS {
        for y in PAIRS {
            for z in PAIRS {
                let lhs = x.combine(y).combine(z);
                let rhs = x.combine(y.combine(z));
                if lhs != rhs {
                    assoc_failures.push(format!("{x:?} {y:?} {z:?}: {lhs:?} != {rhs:?}"));
                }
            }
        }
    }
    report.push(TestResult::from_failures(
        VALIDATOR,
        "combine is associative over all 64 triples",
        assoc_failures,
    ));

    let identity_failures = PAIRS
        .into_iter()
        .filter(|&x| PgPair::IDENTITY.combine(x) != x || x.combine(PgPair::IDENTITY) != x)
        .map(|x| format!("{x:?}"))
        .collect();
    report.push(TestResult::from_failures(
        VALIDATOR,
        "(1, 0) is a two-sided identity",
        identity_failures,
    ));

    report
}
