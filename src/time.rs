//! Simulated time.
//!
//! Simulated time in `nodesim` is a plain integer tick count rather than a
//! wall-clock timestamp: there is no notion of "now" outside of a running
//! [`Simulator`](crate::simulation::Simulator), and no two simulations ever
//! need to agree on an epoch.
//!
//! The source specification represents "no pending event" with a sentinel
//! tick value (`noEvent`). This rewrite uses `Option<SimulationTime>`
//! instead, which is the idiomatic Rust equivalent and rules out the
//! sentinel accidentally colliding with a real tick.

use std::ops::Add;
use std::rc::Rc;
use std::cell::Cell;

/// A point in simulated time, measured in discrete ticks.
///
/// `SimulationTime` is a thin newtype over `u64` so that tick counts can't be
/// accidentally mixed up with unrelated integers (message payloads, loop
/// counters, and so on) at call sites such as [`Link::send_delayed`]'s
/// `extra_delay` argument.
///
/// [`Link::send_delayed`]: crate::ports::Link::send_delayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SimulationTime(pub(crate) u64);

impl SimulationTime {
    /// Tick zero, the time at which a [`Simulator`](crate::simulation::Simulator)
    /// starts.
    pub const ZERO: Self = SimulationTime(0);

    /// Creates a `SimulationTime` from a raw tick count.
    pub const fn new(ticks: u64) -> Self {
        SimulationTime(ticks)
    }

    /// Returns the raw tick count.
    pub const fn ticks(self) -> u64 {
        self.0
    }

    pub(crate) fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for SimulationTime {
    type Output = SimulationTime;

    fn add(self, rhs: Self) -> Self::Output {
        SimulationTime(self.0 + rhs.0)
    }
}

impl From<u64> for SimulationTime {
    fn from(ticks: u64) -> Self {
        SimulationTime(ticks)
    }
}

impl std::fmt::Display for SimulationTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t={}", self.0)
    }
}

/// The shared, interior-mutable clock cell a [`Simulator`](crate::simulation::Simulator)
/// hands out (cloned) to every component it registers.
///
/// Two edges belong to the same simulator if and only if their clock handles
/// point at the same cell (`Rc::ptr_eq`); this is how
/// [`Connect::connect`](crate::ports::Connect::connect) implements the
/// cross-simulator check without a dedicated "simulator identity" type.
pub(crate) type SimClock = Rc<Cell<u64>>;

/// Returns the earliest (minimum) of a set of optional times, treating
/// `None` ("no pending event") as larger than any concrete time.
///
/// This is the building block the [`component!`](crate::component) macro
/// uses to fold a component's Port/Timer head times into its own
/// `next_event`.
pub fn earliest<I>(times: I) -> Option<SimulationTime>
where
    I: IntoIterator<Item = Option<SimulationTime>>,
{
    times.into_iter().flatten().min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earliest_ignores_none_and_picks_the_minimum() {
        let times = [None, Some(SimulationTime::new(5)), Some(SimulationTime::new(2))];
        assert_eq!(earliest(times), Some(SimulationTime::new(2)));
    }

    #[test]
    fn earliest_of_all_none_is_none() {
        let times: [Option<SimulationTime>; 3] = [None, None, None];
        assert_eq!(earliest(times), None);
    }

    #[test]
    fn addition_is_saturating_free_and_exact() {
        let t = SimulationTime::new(10) + SimulationTime::new(5);
        assert_eq!(t, SimulationTime::new(15));
    }
}
