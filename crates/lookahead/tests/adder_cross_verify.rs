//! Cross-verification of the carry-lookahead adder against native addition.
//!
//! Small widths are checked exhaustively; wide operands are checked on
//! representative edge patterns.

use lookahead::{
    carry_into, carry_into_tree, AdderConfig, CarryLookaheadAdder, CarryStrategy, Operand, PgTree,
    RayonFanout, Schedule, SerialFanout,
};

// =============================================================================
// Exhaustive u8 Tests
// =============================================================================

#[test]
fn cross_verify_add_exhaustive_u8_pairs() {
    for strategy in CarryStrategy::ALL {
        let adder = CarryLookaheadAdder::serial(strategy);
        for a in 0u8..=255 {
            for b in 0u8..=255 {
                for c0 in [false, true] {
                    let sum = adder
                        .add(
                            &Operand::from_value(u128::from(a), 8),
                            &Operand::from_value(u128::from(b), 8),
                            c0,
                        )
                        .unwrap();
                    let native = a.wrapping_add(b).wrapping_add(u8::from(c0));
                    assert_eq!(
                        sum.value(),
                        Some(u128::from(native)),
                        "ADD mismatch at ({a}, {b}, {c0}) with {strategy}"
                    );
                }
            }
        }
    }
}

#[test]
fn cross_verify_carries_exhaustive_u8_pairs() {
    for a in 0u8..=255 {
        for b in 0u8..=255 {
            let tree = PgTree::build(
                &SerialFanout,
                &Operand::from_value(u128::from(a), 8),
                &Operand::from_value(u128::from(b), 8),
            )
            .unwrap();
            for c0 in [false, true] {
                for index in 0..8 {
                    assert_eq!(
                        carry_into(tree.leaves(), index, c0),
                        carry_into_tree(&tree, index, c0),
                        "carry mismatch at bit {index} of ({a}, {b}, {c0})"
                    );
                }
            }
        }
    }
}

// =============================================================================
// Representative Wide Tests
// =============================================================================

const EDGE_U128: [u128; 10] = [
    0,
    1,
    2,
    0x5555_5555_5555_5555_5555_5555_5555_5555,
    0xAAAA_AAAA_AAAA_AAAA_AAAA_AAAA_AAAA_AAAA,
    0xFFFF_FFFF_FFFF_FFFF_0000_0000_0000_0000,
    0x0000_0000_0000_0000_FFFF_FFFF_FFFF_FFFF,
    0x8000_0000_0000_0000_0000_0000_0000_0000,
    u128::MAX - 1,
    u128::MAX,
];

#[test]
fn cross_verify_add_u128_edges() {
    let parallel = CarryLookaheadAdder::new(RayonFanout::new(8), CarryStrategy::Tree);
    let serial = CarryLookaheadAdder::serial(CarryStrategy::Direct);
    for a in EDGE_U128 {
        for b in EDGE_U128 {
            for c0 in [false, true] {
                let x = Operand::from_value(a, 128);
                let y = Operand::from_value(b, 128);
                let native = a.wrapping_add(b).wrapping_add(u128::from(c0));
                assert_eq!(
                    parallel.add(&x, &y, c0).unwrap().value(),
                    Some(native),
                    "tree/parallel mismatch at ({a:#x}, {b:#x}, {c0})"
                );
                assert_eq!(
                    serial.add(&x, &y, c0).unwrap().value(),
                    Some(native),
                    "direct/serial mismatch at ({a:#x}, {b:#x}, {c0})"
                );
            }
        }
    }
}

#[test]
fn cross_verify_wider_than_u128() {
    // 256 ones plus one wraps to zero; plus c0 as well gives one
    let ones = Operand::new(vec![true; 256]);
    let one = Operand::from_value(1, 256);
    let adder = CarryLookaheadAdder::new(RayonFanout::new(32), CarryStrategy::Tree);
    assert_eq!(adder.add(&ones, &one, false).unwrap(), Operand::zero(256));
    assert_eq!(adder.add(&ones, &one, true).unwrap(), one);
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn repeated_evaluation_is_identical() {
    let config = AdderConfig {
        width: 64,
        strategy: CarryStrategy::Tree,
        schedule: Schedule::Parallel { grain: 4 },
        carry_in: true,
    };
    let adder = config.adder();
    let a = Operand::from_value(0x0123_4567_89AB_CDEF, 64);
    let b = Operand::from_value(0x7777_0000_FFFF_1234, 64);
    let first = adder.add_traced(&a, &b, config.carry_in).unwrap();
    let second = adder.add_traced(&a, &b, config.carry_in).unwrap();
    assert_eq!(first, second);
}
