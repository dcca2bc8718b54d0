//! The simulation error taxonomy.
//!
//! All validation failures raised synchronously by the engine share a
//! single error type, [`SimulationError`]. There is no retry policy and no
//! recovery path baked into the engine: callers may match on the error's
//! reason, but a behavior callback is not expected to recover from one.

use std::error::Error;
use std::fmt;

use crate::time::SimulationTime;

/// An error raised synchronously by a validation check in the engine.
///
/// None of these are retryable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// A [`Link`](crate::ports::Link) or [`BcastLink`](crate::ports::BcastLink)
    /// was constructed with a latency of zero.
    InvalidLatency,
    /// [`Timer::set`](crate::ports::Timer::set) was called with a delay of
    /// zero.
    InvalidDelay,
    /// [`Link::send`](crate::ports::Link::send) was called before the link
    /// was connected to a target port.
    Unconnected,
    /// `connect` was called with a link and a port owned by components
    /// registered with different simulators.
    CrossSimulator,
    /// An edge's owning-component back-reference was already set to a
    /// different component than the one now being bound.
    BackRefConflict,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidLatency => {
                write!(f, "link latency must be strictly positive")
            }
            SimulationError::InvalidDelay => {
                write!(f, "timer delay must be strictly positive")
            }
            SimulationError::Unconnected => {
                write!(f, "link was not connected to a target port")
            }
            SimulationError::CrossSimulator => write!(
                f,
                "cannot connect a link and a port owned by components of different simulators"
            ),
            SimulationError::BackRefConflict => write!(
                f,
                "edge is already bound to a different owning component"
            ),
        }
    }
}

impl Error for SimulationError {}

/// Convenience helper so callers can build an `Err` without repeating
/// `SimulationError::` at call sites that check a bound.
pub(crate) fn ensure_positive(ticks: SimulationTime, err: SimulationError) -> Result<(), SimulationError> {
    if ticks.is_zero() {
        Err(err)
    } else {
        Ok(())
    }
}
