//! Validators, one module per property family.

pub mod equivalence;
pub mod idempotence;
pub mod operator;
pub mod reference;
pub mod scenarios;

use lookahead::{AnyFanout, CarryLookaheadAdder, CarryStrategy, Schedule};

/// Every strategy on a serial schedule and on a maximally forking one.
pub(crate) fn all_adders() -> Vec<(String, CarryLookaheadAdder<AnyFanout>)> {
    let schedules = [Schedule::Serial, Schedule::Parallel { grain: 1 }];
    CarryStrategy::ALL
        .into_iter()
        .flat_map(|strategy| {
            schedules.into_iter().map(move |schedule| {
                let label = match schedule {
                    Schedule::Serial => format!("{strategy}/serial"),
                    Schedule::Parallel { grain } => format!("{strategy}/parallel:{grain}"),
                };
                (label, CarryLookaheadAdder::new(schedule.fanout(), strategy))
            })
        })
        .collect()
}

/// Mask of the low `width` bits.
pub(crate) fn low_mask(width: usize) -> u128 {
    if width >= 128 {
        u128::MAX
    } else {
        (1u128 << width) - 1
    }
}
