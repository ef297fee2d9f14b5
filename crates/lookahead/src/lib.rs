//! Carry-lookahead addition over a parallel-prefix propagate/generate tree.
//!
//! A ripple adder makes bit `i` wait for the carry out of bit `i - 1`. A
//! carry-lookahead adder instead derives every carry directly from per-bit
//! *propagate* and *generate* signals, so all positions can be resolved
//! independently and the block-level signals can be built as a balanced
//! parallel-prefix tree of depth `log2(N)`.
//!
//! # Pipeline
//!
//! ```text
//! Operand a ─┐
//!            ├─► leaf P/G ─► combination tree ─► carry resolver ─► full adders ─► sum
//! Operand b ─┘   (pg)        (tree, optional)    (carry)           (adder)
//! ```
//!
//! | Stage | Per bit | Depends on |
//! |-------|---------|------------|
//! | Leaf P/G | `P = a OR b`, `G = a AND b` | its own operand bits |
//! | Tree | `(Pl AND Pr, Gl OR (Pl AND Gr))` | both children |
//! | Carry | unrolled lookahead recurrence | leaves (or tree blocks) of lower bits |
//! | Sum | `a XOR b XOR c` | its own carry |
//!
//! # Bit Order
//!
//! Operands are MSB first: index 0 is the most significant bit. Sums wrap
//! modulo `2^N`; the carry out of the top bit is not reported.
//!
//! # Concurrency
//!
//! Every stage walks the bit range by recursive halving through a
//! [`Fanout`]. [`SerialFanout`] is a plain post-order traversal;
//! [`RayonFanout`] forks both halves onto the rayon pool. Tasks write only
//! through disjoint `&mut` halves, and a stage returns only after every task
//! has joined.
//!
//! # Example
//!
//! ```
//! use lookahead::{AdderConfig, CarryStrategy, Operand, Schedule};
//!
//! let config = AdderConfig {
//!     width: 4,
//!     strategy: CarryStrategy::Tree,
//!     schedule: Schedule::Serial,
//!     ..AdderConfig::default()
//! };
//! let a: Operand = "1111".parse().unwrap();
//! let b: Operand = "0001".parse().unwrap();
//! config.check_operands(&a, &b).unwrap();
//!
//! let sum = config.adder().add(&a, &b, config.carry_in).unwrap();
//! assert_eq!(sum.to_string(), "0000");
//! ```

pub mod adder;
pub mod carry;
pub mod config;
pub mod error;
pub mod fanout;
pub mod operand;
pub mod pg;
pub mod tree;

pub use adder::{half_sum, sum_bit, Addition, CarryLookaheadAdder};
pub use carry::{
    carry_into, carry_into_tree, first_pattern, local_generate, resolve_carries, second_pattern,
    CarrySource, CarryStrategy,
};
pub use config::{AdderConfig, DEFAULT_WIDTH};
pub use error::{AdderError, ConfigError, ParseOperandError};
pub use fanout::{AnyFanout, Fanout, RayonFanout, Schedule, SerialFanout, DEFAULT_GRAIN};
pub use operand::Operand;
pub use pg::{evaluate_leaves, PgPair};
pub use tree::PgTree;
