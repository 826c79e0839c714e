//! Constants affecting timer stepping and API defaults.

use std::time::Duration;

/// Number of update-loop frames assumed per second when a host
/// steps timers without supplying clock readings.
pub const DEFAULT_TICK_RATE: usize = 50;

/// Length of time between any two fixed-step frames.
pub const TIMESTEP_LENGTH: Duration = Duration::from_millis(1000 / DEFAULT_TICK_RATE as u64);

/// Number of timer slots allocated ahead of time by a [`TimerManager`].
///
/// [`TimerManager`]: crate::TimerManager
pub const DEFAULT_PREALLOCATED_TIMERS: usize = 8;
