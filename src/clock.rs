//! Monotonic time sources used to drive timer updates.
//!
//! Timers never read the system clock themselves: they consume readings
//! handed in by their caller, which keeps update arithmetic deterministic
//! and testable. A [`TimeSource`] supplies those readings when a host
//! prefers to let a [`TimerManager`] drive its own ticks.
//!
//! [`TimerManager`]: crate::TimerManager

use parking_lot::Mutex;
use std::time::{Duration, Instant};

/// A monotonic clock, reported as the time elapsed since some
/// fixed origin.
///
/// Readings must be non-decreasing across calls on the same source.
/// Timers compare successive readings to compute elapsed time, so the
/// choice of origin is irrelevant as long as it never changes.
pub trait TimeSource: Send + Sync {
    /// Returns the current reading of this clock.
    fn now(&self) -> Duration;
}

/// [`TimeSource`] backed by [`Instant`], with its origin fixed at
/// creation time.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Creates a clock whose readings start at zero from this moment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven [`TimeSource`] for tests and deterministic replay.
///
/// The reading only changes when [`advance`] or [`set`] are called,
/// so a host (or test) controls exactly how much time each tick sees.
///
/// [`advance`]: ManualClock::advance
/// [`set`]: ManualClock::set
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
}

impl ManualClock {
    /// Creates a clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock with the given starting reading.
    #[must_use]
    pub fn starting_at(now: Duration) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the reading forward by `dt`.
    pub fn advance(&self, dt: Duration) {
        *self.now.lock() += dt;
    }

    /// Overwrites the reading.
    ///
    /// Moving a reading backwards violates the monotonicity contract
    /// seen by timers; they will clamp the resulting negative interval
    /// to zero.
    pub fn set(&self, now: Duration) {
        *self.now.lock() = now;
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();

        assert!(second >= first);
    }

    #[test]
    fn manual_clock_advances_by_exact_steps() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_millis(16));
        clock.advance(Duration::from_millis(16));

        assert_eq!(clock.now(), Duration::from_millis(32));
    }

    #[test]
    fn manual_clock_set_overwrites() {
        let clock = ManualClock::starting_at(Duration::from_secs(5));
        clock.set(Duration::from_secs(2));

        assert_eq!(clock.now(), Duration::from_secs(2));
    }
}
