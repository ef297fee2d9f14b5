//! Adder configuration.
//!
//! The operand width is fixed at configuration time. A config file is plain
//! JSON; every field is optional:
//!
//! ```json
//! {
//!   "width": 128,
//!   "carry_in": false,
//!   "strategy": "tree",
//!   "schedule": { "mode": "parallel", "grain": 32 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::adder::CarryLookaheadAdder;
use crate::carry::CarryStrategy;
use crate::error::{AdderError, ConfigError};
use crate::fanout::{AnyFanout, Schedule};
use crate::operand::Operand;
use crate::tree::require_power_of_two;

/// Width used when none is configured.
pub const DEFAULT_WIDTH: usize = 128;

/// Run configuration for one adder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdderConfig {
    /// Operand width in bits.
    pub width: usize,
    /// Initial carry-in `c0`.
    pub carry_in: bool,
    /// Carry resolution strategy.
    pub strategy: CarryStrategy,
    /// Fan-out policy.
    pub schedule: Schedule,
}

impl Default for AdderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            carry_in: false,
            strategy: CarryStrategy::default(),
            schedule: Schedule::default(),
        }
    }
}

impl AdderConfig {
    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input and
    /// [`ConfigError::Invalid`] when the width fails [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AdderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// As [`from_json`](Self::from_json), plus [`ConfigError::Io`] when the
    /// file cannot be read.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Checks the configured width against the adder preconditions.
    ///
    /// # Errors
    ///
    /// [`AdderError::EmptyOperand`] for width 0, and
    /// [`AdderError::NotPowerOfTwo`] when the tree strategy is configured
    /// over a width that is not `2^k`.
    pub fn validate(&self) -> Result<(), AdderError> {
        if self.width == 0 {
            return Err(AdderError::EmptyOperand);
        }
        if self.strategy == CarryStrategy::Tree {
            require_power_of_two(self.width)?;
        }
        Ok(())
    }

    /// Checks that both operands have the configured width.
    ///
    /// # Errors
    ///
    /// [`AdderError::WidthMismatch`] when the operands differ from each
    /// other, [`AdderError::ConfiguredWidth`] when they differ from the config.
    pub fn check_operands(&self, a: &Operand, b: &Operand) -> Result<(), AdderError> {
        if a.width() != b.width() {
            return Err(AdderError::WidthMismatch {
                left: a.width(),
                right: b.width(),
            });
        }
        if a.width() != self.width {
            return Err(AdderError::ConfiguredWidth {
                expected: self.width,
                found: a.width(),
            });
        }
        Ok(())
    }

    /// An adder with this config's strategy and schedule.
    pub fn adder(&self) -> CarryLookaheadAdder<AnyFanout> {
        CarryLookaheadAdder::new(self.schedule.fanout(), self.strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        let config = AdderConfig::from_json("{}").unwrap();
        assert_eq!(config, AdderConfig::default());
        assert_eq!(config.width, 128);
        assert_eq!(config.strategy, CarryStrategy::Direct);
    }

    #[test]
    fn full_json() {
        let config = AdderConfig::from_json(
            r#"{"width":16,"carry_in":true,"strategy":"tree","schedule":{"mode":"serial"}}"#,
        )
        .unwrap();
        assert_eq!(config.width, 16);
        assert!(config.carry_in);
        assert_eq!(config.strategy, CarryStrategy::Tree);
        assert_eq!(config.schedule, Schedule::Serial);
    }

    #[test]
    fn tree_requires_power_of_two_width() {
        let err = AdderConfig::from_json(r#"{"width":12,"strategy":"tree"}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(AdderError::NotPowerOfTwo { width: 12 })
        ));
        assert!(AdderConfig::from_json(r#"{"width":12}"#).is_ok());
    }

    #[test]
    fn zero_width_and_unknown_fields_rejected() {
        assert!(matches!(
            AdderConfig::from_json(r#"{"width":0}"#),
            Err(ConfigError::Invalid(AdderError::EmptyOperand))
        ));
        assert!(matches!(
            AdderConfig::from_json(r#"{"bits":8}"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn operands_checked_against_width() {
        let config = AdderConfig {
            width: 4,
            ..AdderConfig::default()
        };
        let four = Operand::zero(4);
        let eight = Operand::zero(8);
        assert_eq!(config.check_operands(&four, &four), Ok(()));
        assert_eq!(
            config.check_operands(&eight, &eight),
            Err(AdderError::ConfiguredWidth {
                expected: 4,
                found: 8
            })
        );
        assert_eq!(
            config.check_operands(&four, &eight),
            Err(AdderError::WidthMismatch { left: 4, right: 8 })
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AdderConfig::load(Path::new("/nonexistent/lookahead.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn configured_adder_adds() {
        let config = AdderConfig {
            width: 8,
            strategy: CarryStrategy::Tree,
            schedule: Schedule::Parallel { grain: 2 },
            ..AdderConfig::default()
        };
        let sum = config
            .adder()
            .add(&Operand::from_value(200, 8), &Operand::from_value(100, 8), false)
            .unwrap();
        assert_eq!(sum.value(), Some(44));
    }
}
