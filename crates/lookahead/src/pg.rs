//! Propagate/generate pairs and the block combine operator.
//!
//! # Leaf signals
//!
//! For a single bit position with operand bits `a` and `b`:
//!
//! - `P = a OR b`  (an incoming carry passes through)
//! - `G = a AND b` (a carry is produced regardless of the incoming one)
//!
//! # Combine
//!
//! Two adjacent blocks, `left` more significant than `right`, form one block:
//!
//! ```text
//! P = Pl AND Pr
//! G = Gl OR (Pl AND Gr)
//! ```
//!
//! The operator is associative with identity `(P, G) = (1, 0)`, which is what
//! lets the combination tree be evaluated in any schedule.

use crate::fanout::{fill_indexed, Fanout};

/// Propagate and generate signals of one block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PgPair {
    /// The block passes an incoming carry through unchanged.
    pub propagate: bool,
    /// The block produces a carry independent of any incoming carry.
    pub generate: bool,
}

impl PgPair {
    /// Neutral element of [`combine`](Self::combine): an empty block.
    pub const IDENTITY: PgPair = PgPair {
        propagate: true,
        generate: false,
    };

    /// Constructs a pair from raw signals.
    #[inline]
    pub const fn new(propagate: bool, generate: bool) -> Self {
        Self {
            propagate,
            generate,
        }
    }

    /// Signals of a 1-bit block holding operand bits `a` and `b`.
    #[inline]
    pub const fn leaf(a: bool, b: bool) -> Self {
        Self {
            propagate: a | b,
            generate: a & b,
        }
    }

    /// Merges `self` (the more significant block) with the block to its right.
    ///
    /// ```
    /// use lookahead::PgPair;
    ///
    /// let left = PgPair::leaf(true, false); // propagates
    /// let right = PgPair::leaf(true, true); // generates
    /// assert_eq!(left.combine(right), PgPair::new(true, true));
    /// ```
    #[inline]
    #[must_use]
    pub const fn combine(self, right: PgPair) -> PgPair {
        PgPair {
            propagate: self.propagate & right.propagate,
            generate: self.generate | (self.propagate & right.generate),
        }
    }

    /// Carry leaving the block when `carry_in` enters it at the low end.
    #[inline]
    pub const fn carry_out(self, carry_in: bool) -> bool {
        self.generate | (self.propagate & carry_in)
    }
}

/// Leaf signals for every bit position of `a` and `b`.
///
/// Positions are independent; the slice is halved through `fanout` and each
/// task writes only its own slots. Callers guarantee `a.len() == b.len()`.
pub fn evaluate_leaves<F: Fanout>(fanout: &F, a: &[bool], b: &[bool]) -> Vec<PgPair> {
    debug_assert_eq!(a.len(), b.len());
    let mut leaves = vec![PgPair::default(); a.len()];
    fill_indexed(fanout, &mut leaves, 0, &|i| PgPair::leaf(a[i], b[i]));
    leaves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fanout::{RayonFanout, SerialFanout};

    const ALL: [PgPair; 4] = [
        PgPair::new(false, false),
        PgPair::new(false, true),
        PgPair::new(true, false),
        PgPair::new(true, true),
    ];

    #[test]
    fn leaf_truth_table() {
        assert_eq!(PgPair::leaf(false, false), PgPair::new(false, false));
        assert_eq!(PgPair::leaf(false, true), PgPair::new(true, false));
        assert_eq!(PgPair::leaf(true, false), PgPair::new(true, false));
        assert_eq!(PgPair::leaf(true, true), PgPair::new(true, true));
    }

    #[test]
    fn combine_is_associative() {
        for x in ALL {
            for y in ALL {
                for z in ALL {
                    assert_eq!(
                        x.combine(y).combine(z),
                        x.combine(y.combine(z)),
                        "({x:?}, {y:?}, {z:?})"
                    );
                }
            }
        }
    }

    #[test]
    fn identity_is_neutral() {
        for x in ALL {
            assert_eq!(PgPair::IDENTITY.combine(x), x);
            assert_eq!(x.combine(PgPair::IDENTITY), x);
        }
    }

    #[test]
    fn combine_is_not_commutative() {
        let kill = PgPair::new(false, false);
        let gen = PgPair::new(true, true);
        assert_ne!(kill.combine(gen), gen.combine(kill));
    }

    #[test]
    fn carry_out_of_identity_is_carry_in() {
        assert!(!PgPair::IDENTITY.carry_out(false));
        assert!(PgPair::IDENTITY.carry_out(true));
    }

    #[test]
    fn leaves_match_across_fanouts() {
        let a = [true, false, true, false, true, true, false, false, true];
        let b = [true, true, false, false, true, false, false, true, true];
        let serial = evaluate_leaves(&SerialFanout, &a, &b);
        let parallel = evaluate_leaves(&RayonFanout::new(1), &a, &b);
        assert_eq!(serial, parallel);
        assert_eq!(serial[0], PgPair::new(true, true));
        assert_eq!(serial[3], PgPair::new(false, false));
    }
}
