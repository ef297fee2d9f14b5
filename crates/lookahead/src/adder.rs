//! The full adder stage and the composed carry-lookahead pipeline.
//!
//! ```text
//! a, b ──► leaf P/G ──► [tree, join] ──► carries ──► sum bits
//!                                         ▲
//!                                    c0 ──┘
//! ```
//!
//! Every stage fans out over the bit range with the adder's [`Fanout`]. A
//! stage returns only after all of its tasks have joined, so the next stage
//! never reads a slot that is still being written.

use tracing::{debug, instrument};

use crate::carry::{resolve_carries, CarrySource, CarryStrategy};
use crate::error::AdderError;
use crate::fanout::{fill_indexed, Fanout, SerialFanout};
use crate::operand::Operand;
use crate::pg::{evaluate_leaves, PgPair};
use crate::tree::{checked_width, PgTree};

/// Addition of two bits, dropping the carry.
#[inline]
pub const fn half_sum(a: bool, b: bool) -> bool {
    a ^ b
}

/// Sum bit of one position given its resolved carry-in.
#[inline]
pub const fn sum_bit(a: bool, b: bool, carry_in: bool) -> bool {
    half_sum(half_sum(a, b), carry_in)
}

/// Everything computed on the way to a sum, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Addition {
    /// The `N`-bit sum, MSB first.
    pub sum: Operand,
    /// Leaf propagate/generate pairs, MSB first.
    pub leaves: Vec<PgPair>,
    /// The combination tree, when the tree strategy was used.
    pub tree: Option<PgTree>,
    /// Carry into each bit, MSB first.
    pub carries: Vec<bool>,
}

/// A carry-lookahead adder over fixed-width operands.
///
/// # Example
///
/// ```
/// use lookahead::{CarryLookaheadAdder, CarryStrategy, Operand};
///
/// let adder = CarryLookaheadAdder::serial(CarryStrategy::Tree);
/// let a: Operand = "1010".parse().unwrap();
/// let b: Operand = "1011".parse().unwrap();
/// assert_eq!(adder.add(&a, &b, false).unwrap().to_string(), "0101");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CarryLookaheadAdder<F> {
    fanout: F,
    strategy: CarryStrategy,
}

impl CarryLookaheadAdder<SerialFanout> {
    /// A single-threaded adder.
    pub fn serial(strategy: CarryStrategy) -> Self {
        Self::new(SerialFanout, strategy)
    }
}

impl<F: Fanout> CarryLookaheadAdder<F> {
    /// An adder that schedules every stage through `fanout`.
    pub fn new(fanout: F, strategy: CarryStrategy) -> Self {
        Self { fanout, strategy }
    }

    /// The carry strategy in use.
    pub fn strategy(&self) -> CarryStrategy {
        self.strategy
    }

    /// The fan-out in use.
    pub fn fanout(&self) -> &F {
        &self.fanout
    }

    /// `(a + b + c0) mod 2^N`, MSB first.
    ///
    /// # Errors
    ///
    /// See [`add_traced`](Self::add_traced).
    pub fn add(&self, a: &Operand, b: &Operand, c0: bool) -> Result<Operand, AdderError> {
        self.add_traced(a, b, c0).map(|addition| addition.sum)
    }

    /// Like [`add`](Self::add), also returning the intermediate signals.
    ///
    /// # Errors
    ///
    /// - [`AdderError::WidthMismatch`] when `a` and `b` differ in width.
    /// - [`AdderError::EmptyOperand`] for zero-width operands.
    /// - [`AdderError::NotPowerOfTwo`] when the tree strategy is asked to
    ///   add operands whose width is not `2^k`.
    #[instrument(level = "debug", skip_all, fields(width = a.width(), strategy = %self.strategy))]
    pub fn add_traced(&self, a: &Operand, b: &Operand, c0: bool) -> Result<Addition, AdderError> {
        let width = checked_width(a, b)?;
        if self.strategy == CarryStrategy::Tree && !width.is_power_of_two() {
            return Err(AdderError::NotPowerOfTwo { width });
        }

        let leaves = evaluate_leaves(&self.fanout, a.bits(), b.bits());
        debug!(width, "leaf signals evaluated");

        let (tree, carries) = match self.strategy {
            CarryStrategy::Direct => {
                let carries = resolve_carries(&self.fanout, CarrySource::Leaves(&leaves), c0);
                (None, carries)
            }
            CarryStrategy::Tree => {
                let tree = PgTree::from_leaves(&self.fanout, leaves.clone())?;
                let carries = resolve_carries(&self.fanout, CarrySource::Tree(&tree), c0);
                (Some(tree), carries)
            }
        };
        debug!(width, "carries resolved");

        let sum = self.sum_bits(a.bits(), b.bits(), &carries);
        Ok(Addition {
            sum: Operand::new(sum),
            leaves,
            tree,
            carries,
        })
    }

    fn sum_bits(&self, a: &[bool], b: &[bool], carries: &[bool]) -> Vec<bool> {
        let mut sum = vec![false; a.len()];
        fill_indexed(&self.fanout, &mut sum, 0, &|i| sum_bit(a[i], b[i], carries[i]));
        sum
    }
}
