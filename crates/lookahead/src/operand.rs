//! Fixed-width binary operands.
//!
//! Bits are stored most-significant first: index `0` is the MSB and index
//! `width - 1` the LSB, matching the way operands are written down.

use core::fmt;
use core::str::FromStr;

use crate::error::ParseOperandError;

/// An ordered sequence of bits, most-significant bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Operand {
    bits: Vec<bool>,
}

impl Operand {
    /// Wraps an MSB-first bit vector.
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// An all-zero operand of the given width.
    pub fn zero(width: usize) -> Self {
        Self {
            bits: vec![false; width],
        }
    }

    /// The low `width` bits of `value`, MSB first.
    ///
    /// Bits above position 127 are always zero.
    ///
    /// ```
    /// use lookahead::Operand;
    ///
    /// assert_eq!(Operand::from_value(10, 4).to_string(), "1010");
    /// assert_eq!(Operand::from_value(21, 4).to_string(), "0101");
    /// ```
    pub fn from_value(value: u128, width: usize) -> Self {
        let bits = (0..width)
            .map(|i| {
                let rank = width - 1 - i;
                rank < 128 && (value >> rank) & 1 == 1
            })
            .collect();
        Self { bits }
    }

    /// Unsigned value of the operand, or `None` when it is wider than 128 bits.
    pub fn value(&self) -> Option<u128> {
        if self.bits.len() > 128 {
            return None;
        }
        Some(
            self.bits
                .iter()
                .fold(0u128, |acc, &bit| (acc << 1) | u128::from(bit)),
        )
    }

    /// Number of bits.
    #[inline]
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// All bits, MSB first.
    #[inline]
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// The bit at `index` (0 = MSB), if in range.
    #[inline]
    pub fn bit(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Consumes the operand, returning its bits.
    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }
}

impl From<Vec<bool>> for Operand {
    fn from(bits: Vec<bool>) -> Self {
        Self::new(bits)
    }
}

impl FromStr for Operand {
    type Err = ParseOperandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = Vec::with_capacity(s.len());
        for (position, found) in s.chars().enumerate() {
            match found {
                '0' => bits.push(false),
                '1' => bits.push(true),
                '_' => {}
                _ => return Err(ParseOperandError::InvalidDigit { position, found }),
            }
        }
        if bits.is_empty() {
            return Err(ParseOperandError::Empty);
        }
        Ok(Self { bits })
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_msb_first() {
        let op: Operand = "1011".parse().unwrap();
        assert_eq!(op.bits(), &[true, false, true, true]);
        assert_eq!(op.value(), Some(11));
        assert_eq!(op.bit(0), Some(true));
        assert_eq!(op.bit(4), None);
    }

    #[test]
    fn separators_are_ignored() {
        let op: Operand = "1111_0000".parse().unwrap();
        assert_eq!(op.width(), 8);
        assert_eq!(op.value(), Some(0xF0));
    }

    #[test]
    fn rejects_bad_digits() {
        assert_eq!(
            "10x1".parse::<Operand>(),
            Err(ParseOperandError::InvalidDigit {
                position: 2,
                found: 'x'
            })
        );
        assert_eq!("".parse::<Operand>(), Err(ParseOperandError::Empty));
        assert_eq!("__".parse::<Operand>(), Err(ParseOperandError::Empty));
    }

    #[test]
    fn from_value_truncates() {
        assert_eq!(Operand::from_value(16, 4), Operand::zero(4));
        assert_eq!(Operand::from_value(u128::MAX, 3).to_string(), "111");
    }

    #[test]
    fn wide_operands_have_no_value() {
        let wide = Operand::from_value(1, 256);
        assert_eq!(wide.width(), 256);
        assert_eq!(wide.value(), None);
        assert_eq!(wide.bit(255), Some(true));
        assert_eq!(wide.bits().iter().filter(|&&b| b).count(), 1);
    }
}
