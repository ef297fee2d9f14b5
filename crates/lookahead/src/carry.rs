//! Carry resolution.
//!
//! Bits are indexed MSB first, but carries are naturally described by
//! *rank*, counted from the least-significant end: the bit at index `i` of an
//! `N`-bit operand has rank `k = N - 1 - i`. The carry into rank `k` is the
//! unrolled lookahead recurrence
//!
//! ```text
//! C_k = G_{k-1}
//!     + P_{k-1} G_{k-2}
//!     + P_{k-1} P_{k-2} G_{k-3}
//!     + ...
//!     + P_{k-1} ... P_1 G_0        (first pattern ends here)
//!     + P_{k-1} ... P_1 P_0 c0     (second pattern)
//! ```
//!
//! with `C_0 = c0`. Two strategies evaluate it:
//!
//! | Strategy | Reads | Cost per bit |
//! |----------|-------|--------------|
//! | [`CarryStrategy::Direct`] | leaf pairs only | O(N) |
//! | [`CarryStrategy::Tree`] | aligned blocks of a [`PgTree`] | O(log N) |
//!
//! The direct formula is the reference; the tree form is the same carry
//! computed as `span(i + 1..N).carry_out(c0)`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::fanout::{fill_indexed, Fanout};
use crate::pg::PgPair;
use crate::tree::PgTree;

/// How carries are resolved from propagate/generate signals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarryStrategy {
    /// Unrolled sum-of-products over the leaf pairs. Any width.
    #[default]
    Direct,
    /// Block pairs read from the combination tree. Power-of-two widths only.
    Tree,
}

impl CarryStrategy {
    /// Both strategies, canonical first.
    pub const ALL: [CarryStrategy; 2] = [CarryStrategy::Direct, CarryStrategy::Tree];

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            CarryStrategy::Direct => "direct",
            CarryStrategy::Tree => "tree",
        }
    }
}

impl fmt::Display for CarryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CarryStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(CarryStrategy::Direct),
            "tree" => Ok(CarryStrategy::Tree),
            other => Err(format!(
                "unknown carry strategy {other:?} (expected \"direct\" or \"tree\")"
            )),
        }
    }
}

/// What the resolver reads carries from.
#[derive(Debug, Clone, Copy)]
pub enum CarrySource<'a> {
    /// Leaf pairs, resolved with the direct formula.
    Leaves(&'a [PgPair]),
    /// A built tree, resolved from aligned blocks.
    Tree(&'a PgTree),
}

impl CarrySource<'_> {
    /// Number of bit positions covered.
    pub fn width(&self) -> usize {
        match self {
            CarrySource::Leaves(leaves) => leaves.len(),
            CarrySource::Tree(tree) => tree.width(),
        }
    }

    /// Carry into the bit at `index`.
    pub fn carry_into(&self, index: usize, c0: bool) -> bool {
        match self {
            CarrySource::Leaves(leaves) => carry_into(leaves, index, c0),
            CarrySource::Tree(tree) => carry_into_tree(tree, index, c0),
        }
    }
}

#[inline]
fn at_rank(leaves: &[PgPair], rank: usize) -> PgPair {
    leaves[leaves.len() - 1 - rank]
}

/// `G_{k-1}`: the bit directly below rank `k` generates.
///
/// `rank` must be at least 1.
#[inline]
pub fn local_generate(leaves: &[PgPair], rank: usize) -> bool {
    at_rank(leaves, rank - 1).generate
}

/// Some bit strictly inside `[0, k - 1)` generates, and every bit between it
/// and rank `k` propagates.
///
/// Evaluated as one downward scan that keeps the running propagate product
/// `P_{k-1} ... P_{j+1}`; the scan stops as soon as the product is broken.
pub fn first_pattern(leaves: &[PgPair], rank: usize) -> bool {
    let mut chain = true;
    for j in (0..rank.saturating_sub(1)).rev() {
        chain &= at_rank(leaves, j + 1).propagate;
        if !chain {
            return false;
        }
        if at_rank(leaves, j).generate {
            return true;
        }
    }
    false
}

/// Every bit from rank 0 up to rank `k - 1` propagates, carrying `c0` through.
pub fn second_pattern(leaves: &[PgPair], rank: usize, c0: bool) -> bool {
    c0 && (0..rank).all(|j| at_rank(leaves, j).propagate)
}

/// Carry into the bit at MSB-first `index`, from leaf pairs alone.
///
/// # Panics
///
/// Panics if `index >= leaves.len()`.
pub fn carry_into(leaves: &[PgPair], index: usize, c0: bool) -> bool {
    assert!(index < leaves.len(), "bit {index} out of range");
    let rank = leaves.len() - 1 - index;
    if rank == 0 {
        return c0;
    }
    local_generate(leaves, rank) || first_pattern(leaves, rank) || second_pattern(leaves, rank, c0)
}

/// Carry into the bit at MSB-first `index`, from the tree's aligned blocks.
///
/// # Panics
///
/// Panics if `index >= tree.width()`.
pub fn carry_into_tree(tree: &PgTree, index: usize, c0: bool) -> bool {
    assert!(index < tree.width(), "bit {index} out of range");
    tree.span_pg(index + 1, tree.width())
        .unwrap_or(PgPair::IDENTITY)
        .carry_out(c0)
}

/// Carry into every bit position, MSB first.
///
/// Each position is resolved independently and written to its own slot.
pub fn resolve_carries<F: Fanout>(fanout: &F, source: CarrySource<'_>, c0: bool) -> Vec<bool> {
    let mut carries = vec![false; source.width()];
    fill_indexed(fanout, &mut carries, 0, &|index| source.carry_into(index, c0));
    carries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fanout::{RayonFanout, SerialFanout};
    use crate::operand::Operand;
    use crate::pg::evaluate_leaves;

    fn leaves_of(a: u128, b: u128, width: usize) -> Vec<PgPair> {
        let a = Operand::from_value(a, width);
        let b = Operand::from_value(b, width);
        evaluate_leaves(&SerialFanout, a.bits(), b.bits())
    }

    /// Carries a ripple adder would see, MSB first.
    fn ripple_carries(a: u128, b: u128, c0: bool, width: usize) -> Vec<bool> {
        let mut carries = vec![false; width];
        let mut carry = c0;
        for rank in 0..width {
            carries[width - 1 - rank] = carry;
            let (x, y) = ((a >> rank) & 1 == 1, (b >> rank) & 1 == 1);
            carry = (x && y) || (carry && (x || y));
        }
        carries
    }

    #[test]
    fn lsb_receives_carry_in() {
        let leaves = leaves_of(0b1010, 0b1011, 4);
        assert!(!carry_into(&leaves, 3, false));
        assert!(carry_into(&leaves, 3, true));
    }

    #[test]
    fn rank_one_is_local_generate_or_propagated_c0() {
        // a = 01, b = 00: bit 0 propagates, does not generate
        let leaves = leaves_of(0b01, 0b00, 2);
        assert!(!carry_into(&leaves, 0, false));
        assert!(carry_into(&leaves, 0, true));
        assert!(!first_pattern(&leaves, 1));
    }

    #[test]
    fn first_pattern_is_a_disjunction() {
        // ranks 0..4 (LSB first): G, kill, P, P. The generate at rank 0 is cut
        // off by the kill at rank 1, so nothing reaches rank 4 from below.
        let leaves = leaves_of(0b1101, 0b0001, 4);
        assert!(!first_pattern(&leaves, 4));
        // ranks 0..4: kill, G, P, P. Rank 1 generates and propagates up.
        let leaves = leaves_of(0b1110, 0b0010, 4);
        assert!(first_pattern(&leaves, 4));
        assert!(!local_generate(&leaves, 4));
    }

    #[test]
    fn second_pattern_needs_full_chain() {
        let leaves = leaves_of(0b1111, 0b0000, 4);
        assert!(second_pattern(&leaves, 4, true));
        assert!(!second_pattern(&leaves, 4, false));
        let leaves = leaves_of(0b1011, 0b0000, 4);
        assert!(!second_pattern(&leaves, 4, true));
        assert!(second_pattern(&leaves, 2, true));
    }

    #[test]
    fn direct_and_tree_match_ripple_exhaustively() {
        for width in [1usize, 2, 4] {
            let max = 1u128 << width;
            for a in 0..max {
                for b in 0..max {
                    for c0 in [false, true] {
                        let leaves = leaves_of(a, b, width);
                        let tree = PgTree::from_leaves(&SerialFanout, leaves.clone()).unwrap();
                        let expected = ripple_carries(a, b, c0, width);
                        let direct =
                            resolve_carries(&SerialFanout, CarrySource::Leaves(&leaves), c0);
                        let blocks = resolve_carries(&SerialFanout, CarrySource::Tree(&tree), c0);
                        assert_eq!(direct, expected, "direct {a}+{b}+{c0} @ {width}");
                        assert_eq!(blocks, expected, "tree {a}+{b}+{c0} @ {width}");
                    }
                }
            }
        }
    }

    #[test]
    fn direct_formula_handles_odd_widths() {
        for width in [3usize, 5, 6] {
            let max = 1u128 << width;
            for a in 0..max {
                for b in (0..max).step_by(3) {
                    let leaves = leaves_of(a, b, width);
                    let direct = resolve_carries(&SerialFanout, CarrySource::Leaves(&leaves), true);
                    assert_eq!(direct, ripple_carries(a, b, true, width));
                }
            }
        }
    }

    #[test]
    fn parallel_resolution_matches_serial() {
        let leaves = leaves_of(0x0123_4567_89AB_CDEF, 0xFEDC_BA98_7654_3210, 64);
        let tree = PgTree::from_leaves(&SerialFanout, leaves.clone()).unwrap();
        let serial = resolve_carries(&SerialFanout, CarrySource::Tree(&tree), true);
        let parallel = resolve_carries(&RayonFanout::new(4), CarrySource::Tree(&tree), true);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn strategy_names_round_trip() {
        for strategy in CarryStrategy::ALL {
            assert_eq!(strategy.name().parse::<CarryStrategy>(), Ok(strategy));
        }
        assert!("ripple".parse::<CarryStrategy>().is_err());
        assert_eq!(
            serde_json::to_string(&CarryStrategy::Tree).unwrap(),
            "\"tree\""
        );
    }
}
