use crate::constants::DEFAULT_PREALLOCATED_TIMERS;

/// Configuration for timer managers.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct Config {
    /// Configures whether expired timers are evicted from a manager
    /// during the tick in which they expire.
    ///
    /// Fade-out and one-shot timers are typically discarded as soon as
    /// they fire; hosts which re-arm timers in place should disable this
    /// and call [`TimerManager::remove`] themselves.
    ///
    /// Defaults to `true`.
    ///
    /// [`TimerManager::remove`]: crate::TimerManager::remove
    pub auto_remove: bool,

    /// Number of concurrently tracked timers to allocate memory for.
    ///
    /// This should be set at, or just above, the number of sources the
    /// host expects to track at the same time, to prevent reallocation
    /// inside the update loop.
    ///
    /// Defaults to [`DEFAULT_PREALLOCATED_TIMERS`].
    pub preallocated_timers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_remove: true,
            preallocated_timers: DEFAULT_PREALLOCATED_TIMERS,
        }
    }
}

// Setters in a builder pattern.
impl Config {
    /// Sets this `Config`'s expired-timer eviction behaviour.
    #[must_use]
    pub fn auto_remove(mut self, auto_remove: bool) -> Self {
        self.auto_remove = auto_remove;
        self
    }

    /// Sets this `Config`'s number of preallocated timer slots.
    #[must_use]
    pub fn preallocated_timers(mut self, preallocated_timers: usize) -> Self {
        self.preallocated_timers = preallocated_timers;
        self
    }
}
