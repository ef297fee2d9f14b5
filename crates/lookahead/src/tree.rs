//! The propagate/generate combination tree.
//!
//! For an `N = 2^h` bit operand the tree has `h + 1` levels. Level 0 holds the
//! `N` leaf pairs; level `l` holds one pair per aligned block of `2^l` bits.
//! A node is addressed by `(level, left_index)`, the left index being the
//! MSB-first position of the first bit of its block.
//!
//! ```text
//! level 2            [0..4)
//! level 1      [0..2)      [2..4)
//! level 0    [0]   [1]   [2]   [3]
//! ```
//!
//! # Construction
//!
//! Each level is one owned vector. A task building the subtree over some span
//! receives, for every level below its root, the contiguous sub-slice of slots
//! that subtree owns. Halving all of them gives two disjoint sets of slices
//! for the two children, so children can be built concurrently and the
//! parent's own slot is written only after [`Fanout::join`] returns. That is
//! `N - 1` combine evaluations in total, at depth `h`.

use core::fmt;

use tracing::{debug, instrument};

use crate::error::AdderError;
use crate::fanout::Fanout;
use crate::operand::Operand;
use crate::pg::{evaluate_leaves, PgPair};

/// A fully built combination tree. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgTree {
    levels: Vec<Vec<PgPair>>,
}

impl PgTree {
    /// Evaluates the leaves of `a` and `b` and combines them up to the root.
    ///
    /// # Errors
    ///
    /// Rejects empty operands, operands of different widths, and widths that
    /// are not a power of two. Nothing is evaluated on error.
    #[instrument(level = "debug", skip_all, fields(width = a.width()))]
    pub fn build<F: Fanout>(fanout: &F, a: &Operand, b: &Operand) -> Result<Self, AdderError> {
        let width = checked_width(a, b)?;
        require_power_of_two(width)?;
        let leaves = evaluate_leaves(fanout, a.bits(), b.bits());
        Ok(Self::combine_levels(fanout, leaves))
    }

    /// Builds the upper levels over already evaluated leaves.
    ///
    /// # Errors
    ///
    /// Rejects an empty leaf array and widths that are not a power of two.
    pub fn from_leaves<F: Fanout>(fanout: &F, leaves: Vec<PgPair>) -> Result<Self, AdderError> {
        if leaves.is_empty() {
            return Err(AdderError::EmptyOperand);
        }
        require_power_of_two(leaves.len())?;
        Ok(Self::combine_levels(fanout, leaves))
    }

    fn combine_levels<F: Fanout>(fanout: &F, leaves: Vec<PgPair>) -> Self {
        let width = leaves.len();
        let height = width.trailing_zeros() as usize;

        let mut levels = Vec::with_capacity(height + 1);
        levels.push(leaves);
        for level in 1..=height {
            levels.push(vec![PgPair::default(); width >> level]);
        }

        if let Some((root, below)) = levels.split_last_mut() {
            let below: Vec<&mut [PgPair]> = below.iter_mut().map(Vec::as_mut_slice).collect();
            combine_node(fanout, &mut root[0], below);
        }

        debug!(width, height, "combination tree built");
        Self { levels }
    }

    /// Number of leaf positions.
    #[inline]
    pub fn width(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of levels above the leaves, `log2(width)`.
    #[inline]
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    /// Leaf pairs, MSB first.
    #[inline]
    pub fn leaves(&self) -> &[PgPair] {
        &self.levels[0]
    }

    /// The pair spanning the whole operand.
    #[inline]
    pub fn root(&self) -> PgPair {
        self.levels[self.height()][0]
    }

    /// All blocks of one level, MSB first.
    pub fn level(&self, level: usize) -> Option<&[PgPair]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// The block at `level` whose span starts at bit `left_index`.
    ///
    /// Returns `None` when `left_index` is not aligned to the block size of
    /// that level or lies outside the operand.
    pub fn node(&self, level: usize, left_index: usize) -> Option<PgPair> {
        let slots = self.levels.get(level)?;
        if left_index & ((1 << level) - 1) != 0 {
            return None;
        }
        slots.get(left_index >> level).copied()
    }

    /// Combined signals of bits `[start, end)`, from at most `2 * height`
    /// aligned blocks.
    ///
    /// An empty range yields [`PgPair::IDENTITY`]. Returns `None` when the
    /// range is reversed or runs past the operand.
    pub fn span_pg(&self, start: usize, end: usize) -> Option<PgPair> {
        if start > end || end > self.width() {
            return None;
        }
        let height = self.height();
        let mut acc = PgPair::IDENTITY;
        let mut pos = start;
        while pos < end {
            let mut level = if pos == 0 {
                height
            } else {
                (pos.trailing_zeros() as usize).min(height)
            };
            while pos + (1 << level) > end {
                level -= 1;
            }
            acc = acc.combine(self.levels[level][pos >> level]);
            pos += 1 << level;
        }
        Some(acc)
    }
}

/// Fills `node` from the subtree whose lower levels are `below`.
///
/// `below[l]` is the run of level-`l` slots owned by this subtree; the last
/// entry holds exactly the node's two children.
fn combine_node<F: Fanout>(fanout: &F, node: &mut PgPair, below: Vec<&mut [PgPair]>) {
    // leaf, supplied by the leaf evaluator
    let Some(span) = below.first().map(|leaves| leaves.len()) else {
        return;
    };

    let mut left = Vec::with_capacity(below.len());
    let mut right = Vec::with_capacity(below.len());
    for slots in below {
        let (lo, hi) = slots.split_at_mut(slots.len() / 2);
        left.push(lo);
        right.push(hi);
    }

    let (Some([left_node]), Some([right_node])) = (left.pop(), right.pop()) else {
        debug_assert!(false, "unbalanced split over a span of {span} bits");
        return;
    };

    fanout.join(
        span,
        || combine_node(fanout, &mut *left_node, left),
        || combine_node(fanout, &mut *right_node, right),
    );
    *node = left_node.combine(*right_node);
}

pub(crate) fn checked_width(a: &Operand, b: &Operand) -> Result<usize, AdderError> {
    if a.width() != b.width() {
        return Err(AdderError::WidthMismatch {
            left: a.width(),
            right: b.width(),
        });
    }
    if a.width() == 0 {
        return Err(AdderError::EmptyOperand);
    }
    Ok(a.width())
}

pub(crate) fn require_power_of_two(width: usize) -> Result<(), AdderError> {
    if width.is_power_of_two() {
        Ok(())
    } else {
        Err(AdderError::NotPowerOfTwo { width })
    }
}

impl fmt::Display for PgTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (level, slots) in self.levels.iter().enumerate() {
            write!(f, "level {level:>2} P |")?;
            for pair in slots {
                write!(f, " {}", u8::from(pair.propagate))?;
            }
            writeln!(f)?;
            write!(f, "         G |")?;
            for pair in slots {
                write!(f, " {}", u8::from(pair.generate))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
