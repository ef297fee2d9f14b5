//! Fork-join fan-out over a recursively halved bit range.
//!
//! Every stage of the adder walks `[0, N)` the same way: split at the
//! midpoint, evaluate both halves, and only then touch anything that depends
//! on both. [`Fanout`] is the single point where that "evaluate both halves"
//! step is allowed to run concurrently.
//!
//! ```text
//!              [0, 8)                 join: parent reads both children
//!          ┌─────┴─────┐
//!       [0, 4)       [4, 8)           two independent tasks
//!      ┌──┴──┐      ┌──┴──┐
//!   [0,2) [2,4)  [4,6) [6,8)
//! ```
//!
//! Tasks only ever write through the disjoint `&mut` halves they are handed,
//! so no locking is needed; `join` returning is the barrier.

use serde::{Deserialize, Serialize};

/// Default span below which [`RayonFanout`] stops forking.
pub const DEFAULT_GRAIN: usize = 64;

/// Evaluates two independent halves of a span and waits for both.
pub trait Fanout: Sync {
    /// Runs `left` and `right`, returning once both have completed.
    ///
    /// `span` is the number of bit positions covered by the two halves
    /// together; implementations use it to decide whether forking is worth it.
    fn join<A, B, RA, RB>(&self, span: usize, left: A, right: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send;
}

/// Post-order evaluation on the calling thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerialFanout;

impl Fanout for SerialFanout {
    #[inline]
    fn join<A, B, RA, RB>(&self, _span: usize, left: A, right: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        let ra = left();
        let rb = right();
        (ra, rb)
    }
}

/// Work-stealing fan-out on the global rayon pool.
///
/// Spans narrower than `grain` are evaluated synchronously in the calling
/// task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayonFanout {
    grain: usize,
}

impl RayonFanout {
    /// Forks every span of at least `grain` bits. A grain of 0 is treated as 1.
    pub fn new(grain: usize) -> Self {
        Self {
            grain: grain.max(1),
        }
    }

    /// The fork threshold.
    pub fn grain(&self) -> usize {
        self.grain
    }
}

impl Default for RayonFanout {
    fn default() -> Self {
        Self::new(DEFAULT_GRAIN)
    }
}

impl Fanout for RayonFanout {
    #[inline]
    fn join<A, B, RA, RB>(&self, span: usize, left: A, right: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        if span >= self.grain {
            rayon::join(left, right)
        } else {
            (left(), right())
        }
    }
}

/// Configured scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Schedule {
    /// Single-threaded post-order traversal.
    Serial,
    /// Fork-join on the rayon pool.
    Parallel {
        /// Minimum span that is split into concurrent tasks.
        #[serde(default = "default_grain")]
        grain: usize,
    },
}

fn default_grain() -> usize {
    DEFAULT_GRAIN
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule::Parallel {
            grain: DEFAULT_GRAIN,
        }
    }
}

impl Schedule {
    /// The fan-out implementing this schedule.
    pub fn fanout(self) -> AnyFanout {
        match self {
            Schedule::Serial => AnyFanout::Serial(SerialFanout),
            Schedule::Parallel { grain } => AnyFanout::Rayon(RayonFanout::new(grain)),
        }
    }
}

/// A fan-out chosen at run time from a [`Schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyFanout {
    /// See [`SerialFanout`].
    Serial(SerialFanout),
    /// See [`RayonFanout`].
    Rayon(RayonFanout),
}

impl Fanout for AnyFanout {
    #[inline]
    fn join<A, B, RA, RB>(&self, span: usize, left: A, right: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        match self {
            AnyFanout::Serial(f) => f.join(span, left, right),
            AnyFanout::Rayon(f) => f.join(span, left, right),
        }
    }
}

/// Fills `out[i]` with `f(offset + i)` by recursive halving.
///
/// Each leaf task writes exactly one slot of `out`; the halves handed to the
/// two sides of a join never overlap.
pub(crate) fn fill_indexed<F, T, G>(fanout: &F, out: &mut [T], offset: usize, f: &G)
where
    F: Fanout,
    T: Send,
    G: Fn(usize) -> T + Sync,
{
    match out.len() {
        0 => {}
        1 => out[0] = f(offset),
        len => {
            let mid = len / 2;
            let (lo, hi) = out.split_at_mut(mid);
            fanout.join(
                len,
                || fill_indexed(fanout, lo, offset, f),
                || fill_indexed(fanout, hi, offset + mid, f),
            );
        }
    }
}
