//! Error types for operand parsing, adder preconditions and configuration.
//!
//! Every error here is a precondition violation: it is reported before any
//! propagate/generate work starts, so a failed call never yields a partial sum.

use std::path::PathBuf;

use thiserror::Error;

/// Precondition violations rejected by the adder before computation begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AdderError {
    /// An operand has no bits.
    #[error("operands must be at least one bit wide")]
    EmptyOperand,

    /// The two operands have different widths.
    #[error("operand widths differ: {left} bits vs {right} bits")]
    WidthMismatch {
        /// Width of the left operand.
        left: usize,
        /// Width of the right operand.
        right: usize,
    },

    /// The tree strategy was asked to build over a width that is not `2^k`.
    #[error("operand width {width} is not a power of two")]
    NotPowerOfTwo {
        /// The offending width.
        width: usize,
    },

    /// The operands do not match the width fixed at configuration time.
    #[error("configured width is {expected} bits but operands are {found} bits")]
    ConfiguredWidth {
        /// Width from the configuration.
        expected: usize,
        /// Width of the supplied operands.
        found: usize,
    },
}

/// Failure to parse a `'0'`/`'1'` digit string into an [`Operand`](crate::Operand).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseOperandError {
    /// The string contained no binary digits.
    #[error("operand string contains no binary digits")]
    Empty,

    /// A character other than `0`, `1` or the `_` separator.
    #[error("invalid binary digit {found:?} at position {position}")]
    InvalidDigit {
        /// Character offset of the bad digit.
        position: usize,
        /// The character found there.
        found: char,
    },
}

/// Failure to load or validate an [`AdderConfig`](crate::AdderConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration was not valid JSON for [`AdderConfig`](crate::AdderConfig).
    #[error("malformed adder config")]
    Json(#[from] serde_json::Error),

    /// The configured width violates an adder precondition.
    #[error("invalid adder config")]
    Invalid(#[from] AdderError),
}
