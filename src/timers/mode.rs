use serde::{Deserialize, Serialize};

/// Countdown status of a timer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[non_exhaustive]
pub enum TimerMode {
    /// The countdown is live, and will expire once its value
    /// reaches zero.
    Running,
    /// The countdown has run out.
    ///
    /// Expired timers may be re-armed via [`reset`].
    ///
    /// [`reset`]: super::SourceTimer::reset
    Expired,
    /// The timer has been manually stopped, and cannot be restarted.
    Stopped,
}

impl TimerMode {
    /// Returns whether the timer has irreversibly stopped.
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, TimerMode::Stopped)
    }

    /// Returns whether the countdown is still live.
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self, TimerMode::Running)
    }
}

impl Default for TimerMode {
    fn default() -> Self {
        Self::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_is_default_and_live() {
        let mode = TimerMode::default();
        assert!(mode.is_running());
        assert!(!mode.is_done());
    }

    #[test]
    fn expired_is_neither_live_nor_done() {
        assert!(!TimerMode::Expired.is_running());
        assert!(!TimerMode::Expired.is_done());
    }

    #[test]
    fn stopped_is_done() {
        assert!(TimerMode::Stopped.is_done());
        assert!(!TimerMode::Stopped.is_running());
    }
}
