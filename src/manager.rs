use crate::{
    clock::{SystemClock, TimeSource},
    error::{ControlError, TimerResult},
    events::{EventContext, EventHandler, EventStore, TimerEvent},
    timers::{SourceTimer, TimerState},
    Config,
};
use dashmap::DashMap;
use derivative::Derivative;
use parking_lot::Mutex;
use std::{sync::Arc, time::Duration};
use tracing::debug;

/// A registry of [`SourceTimer`]s, keyed by their owning resource.
///
/// This mirrors how an engine's sound manager tracks its live sources:
/// one timer per resource key (e.g. the URL of a background-music track),
/// all advanced together once per frame. Inserting a timer under a key
/// already in use replaces the previous timer, just as restarting a
/// track supersedes its old fade.
///
/// Expiries observed during a tick are reported to [`EventHandler`]s
/// registered via [`add_event`], and to any channel subscribers from
/// [`event_feed`]. With [`Config::auto_remove`] set (the default),
/// expired timers are evicted after their handlers have run.
///
/// # Example
///
/// ```rust
/// use cadenza::{timers::SourceTimer, TimerManager};
/// use std::time::Duration;
///
/// let manager: TimerManager<usize> = TimerManager::new();
/// manager.insert(SourceTimer::new(3, 0.25).owner("bgm://title"));
///
/// manager.tick_at(Duration::from_secs(1)); // baseline
/// manager.tick_at(Duration::from_secs(2)); // expires and evicts
///
/// assert!(manager.is_empty());
/// ```
///
/// [`add_event`]: TimerManager::add_event
/// [`event_feed`]: TimerManager::event_feed
#[derive(Derivative)]
#[derivative(Debug)]
pub struct TimerManager<S> {
    timers: DashMap<String, SourceTimer<S>>,
    events: Mutex<EventStore>,
    feeds: Mutex<Vec<flume::Sender<TimerState>>>,
    #[derivative(Debug = "ignore")]
    clock: Arc<dyn TimeSource>,
    config: Config,
}

impl<S> TimerManager<S> {
    /// Creates an empty manager with default configuration and a
    /// [`SystemClock`] starting now.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    /// Creates an empty manager from the given configuration.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self {
            timers: DashMap::with_capacity(config.preallocated_timers),
            events: Mutex::new(EventStore::new()),
            feeds: Mutex::new(Vec::new()),
            clock: Arc::new(SystemClock::new()),
            config,
        }
    }

    /// Replaces the [`TimeSource`] used by [`tick`].
    ///
    /// [`tick`]: TimerManager::tick
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn TimeSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns this manager's configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers `timer` under its owner key.
    ///
    /// Returns the previous timer under that key, if any.
    pub fn insert(&self, timer: SourceTimer<S>) -> Option<SourceTimer<S>> {
        debug!("Tracking timer {} under {:?}.", timer.uuid, timer.owner);

        self.timers.insert(timer.owner.clone(), timer)
    }

    /// Removes and returns the timer under `owner`.
    ///
    /// Fires [`TimerEvent::Removed`] on success.
    pub fn remove(&self, owner: &str) -> TimerResult<SourceTimer<S>> {
        let (_, timer) = self.timers.remove(owner).ok_or(ControlError::NotFound)?;

        debug!("Dropped timer {} under {:?}.", timer.uuid, owner);

        let state = timer.state();
        self.events
            .lock()
            .fire(TimerEvent::Removed, &EventContext::Timer(&state));

        Ok(timer)
    }

    /// Captures a state snapshot of the timer under `owner`, if present.
    #[must_use]
    pub fn get_state(&self, owner: &str) -> Option<TimerState> {
        self.timers.get(owner).map(|entry| entry.value().state())
    }

    /// Returns whether a timer is registered under `owner`.
    #[must_use]
    pub fn contains(&self, owner: &str) -> bool {
        self.timers.contains_key(owner)
    }

    /// Returns the number of tracked timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns whether no timers are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Re-arms the timer under `owner` with a fresh countdown value,
    /// firing [`TimerEvent::Reset`].
    pub fn reset(&self, owner: &str, value: f32) -> TimerResult<()> {
        let state = {
            let mut entry = self.timers.get_mut(owner).ok_or(ControlError::NotFound)?;
            entry.value_mut().reset(value)?;
            entry.value().state()
        };

        self.events
            .lock()
            .fire(TimerEvent::Reset, &EventContext::Timer(&state));

        Ok(())
    }

    /// Stops the timer under `owner` without removing it.
    ///
    /// Stopped timers never expire, and are left in place by ticks.
    pub fn stop(&self, owner: &str) -> TimerResult<()> {
        let mut entry = self.timers.get_mut(owner).ok_or(ControlError::NotFound)?;
        entry.value_mut().stop();

        Ok(())
    }

    /// Registers a handler to be fired whenever `evt` occurs on any
    /// tracked timer.
    pub fn add_event<H>(&self, evt: TimerEvent, handler: H)
    where
        H: EventHandler + 'static,
    {
        self.events.lock().add_event(evt, handler);
    }

    /// Subscribes to expiry notices.
    ///
    /// Each timer expiry observed during a tick sends one [`TimerState`]
    /// snapshot to every live subscriber. Dropped receivers are pruned
    /// on the next send.
    #[must_use]
    pub fn event_feed(&self) -> flume::Receiver<TimerState> {
        let (tx, rx) = flume::unbounded();
        self.feeds.lock().push(tx);

        rx
    }

    /// Advances every tracked timer using this manager's [`TimeSource`].
    pub fn tick(&self) {
        self.tick_at(self.clock.now());
    }

    /// Advances every tracked timer to the monotonic clock reading `now`.
    ///
    /// Timers observed to expire during this tick fire
    /// [`TimerEvent::Expired`] handlers and feed subscriptions; with
    /// [`Config::auto_remove`] set they are then evicted, firing
    /// [`TimerEvent::Removed`]. Handlers always run before eviction.
    pub fn tick_at(&self, now: Duration) {
        let mut expired = Vec::new();

        for mut entry in self.timers.iter_mut() {
            let timer = entry.value_mut();
            let was_expired = timer.is_expired();
            timer.update_timer(now);

            if timer.is_expired() && !was_expired {
                expired.push(timer.state());
            }
        }

        if expired.is_empty() {
            return;
        }

        {
            let mut events = self.events.lock();
            let mut feeds = self.feeds.lock();

            for state in &expired {
                events.fire(TimerEvent::Expired, &EventContext::Timer(state));
                feeds.retain(|tx| tx.send(state.clone()).is_ok());
            }
        }

        if self.config.auto_remove {
            for state in &expired {
                drop(self.remove(&state.owner));
            }
        }
    }

    /// Captures state snapshots of all tracked timers.
    ///
    /// Iteration order is unspecified.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TimerState> {
        self.timers
            .iter()
            .map(|entry| entry.value().state())
            .collect()
    }
}

impl<S> Default for TimerManager<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use flume::Sender;

    // Forwards fired states over a channel, so tests can observe
    // event dispatch from outside the manager.
    struct Forward {
        tx: Sender<(TimerEvent, TimerState)>,
        evt: TimerEvent,
    }

    impl EventHandler for Forward {
        fn act(&mut self, ctx: &EventContext<'_>) -> Option<TimerEvent> {
            let EventContext::Timer(state) = ctx;
            drop(self.tx.send((self.evt, (*state).clone())));

            None
        }
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn insert_and_query() {
        let manager: TimerManager<u32> = TimerManager::new();
        assert!(manager.is_empty());

        manager.insert(SourceTimer::new(1, 3.0).owner("bgm://title"));

        assert_eq!(manager.len(), 1);
        assert!(manager.contains("bgm://title"));

        let state = manager.get_state("bgm://title").unwrap();
        assert_eq!(state.remaining, 3.0);
        assert_eq!(state.owner, "bgm://title");
    }

    #[test]
    fn insert_replaces_same_owner() {
        let manager: TimerManager<u32> = TimerManager::new();
        manager.insert(SourceTimer::new(1, 3.0).owner("bgm://title"));
        let old = manager.insert(SourceTimer::new(2, 9.0).owner("bgm://title"));

        assert_eq!(old.map(|t| t.source), Some(Some(1)));
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.get_state("bgm://title").map(|s| s.remaining), Some(9.0));
    }

    #[test]
    fn remove_missing_is_not_found() {
        let manager: TimerManager<u32> = TimerManager::new();

        assert_eq!(
            manager.remove("bgm://missing").map(|_| ()),
            Err(ControlError::NotFound)
        );
        assert_eq!(manager.reset("bgm://missing", 1.0), Err(ControlError::NotFound));
        assert_eq!(manager.stop("bgm://missing"), Err(ControlError::NotFound));
    }

    #[test]
    fn tick_expires_and_evicts() {
        let manager: TimerManager<u32> = TimerManager::new();
        manager.insert(SourceTimer::new(1, 1.0).owner("sfx/ting.wav"));
        manager.insert(SourceTimer::new(2, 60.0).owner("bgm://battle"));

        let (tx, rx) = flume::unbounded();
        manager.add_event(
            TimerEvent::Expired,
            Forward {
                tx: tx.clone(),
                evt: TimerEvent::Expired,
            },
        );
        manager.add_event(
            TimerEvent::Removed,
            Forward {
                tx,
                evt: TimerEvent::Removed,
            },
        );

        manager.tick_at(secs(10));
        assert!(rx.try_recv().is_err());

        manager.tick_at(secs(12));

        let (evt, state) = rx.try_recv().unwrap();
        assert_eq!(evt, TimerEvent::Expired);
        assert_eq!(state.owner, "sfx/ting.wav");
        assert!(state.remaining <= 0.0);

        let (evt, state) = rx.try_recv().unwrap();
        assert_eq!(evt, TimerEvent::Removed);
        assert_eq!(state.owner, "sfx/ting.wav");

        // Long-running timer survives the tick.
        assert_eq!(manager.len(), 1);
        assert!(manager.contains("bgm://battle"));
    }

    #[test]
    fn expired_timers_stay_without_auto_remove() {
        let manager: TimerManager<u32> =
            TimerManager::from_config(Config::default().auto_remove(false));
        manager.insert(SourceTimer::new(1, 1.0).owner("bgm://title"));

        manager.tick_at(secs(0));
        manager.tick_at(secs(2));

        let state = manager.get_state("bgm://title").unwrap();
        assert!(state.remaining <= 0.0);
        assert!(!state.mode.is_running());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn expiry_reaches_feed_subscribers() {
        let manager: TimerManager<u32> = TimerManager::new();
        let feed = manager.event_feed();

        manager.insert(SourceTimer::new(1, 0.5).owner("sfx/ting.wav"));
        manager.tick_at(secs(1));
        manager.tick_at(secs(2));

        let state = feed.try_recv().unwrap();
        assert_eq!(state.owner, "sfx/ting.wav");
        assert!(state.remaining <= 0.0);
    }

    #[test]
    fn tick_uses_configured_clock() {
        let clock = Arc::new(ManualClock::new());
        let manager: TimerManager<u32> = TimerManager::new().with_clock(clock.clone());

        manager.insert(SourceTimer::new(1, 1.0).owner("bgm://title"));

        manager.tick(); // baseline at 0
        clock.advance(secs(2));
        manager.tick();

        assert!(manager.is_empty());
    }

    #[test]
    fn reset_rearms_and_fires() {
        let manager: TimerManager<u32> =
            TimerManager::from_config(Config::default().auto_remove(false));
        manager.insert(SourceTimer::new(1, 1.0).owner("bgm://title"));

        let (tx, rx) = flume::unbounded();
        manager.add_event(
            TimerEvent::Reset,
            Forward {
                tx,
                evt: TimerEvent::Reset,
            },
        );

        manager.tick_at(secs(0));
        manager.tick_at(secs(5));
        assert!(!manager.get_state("bgm://title").unwrap().mode.is_running());

        manager.reset("bgm://title", 3.0).unwrap();

        let (_, state) = rx.try_recv().unwrap();
        assert_eq!(state.remaining, 3.0);
        assert!(state.mode.is_running());
    }

    #[test]
    fn stopped_timers_never_expire() {
        let manager: TimerManager<u32> = TimerManager::new();
        manager.insert(SourceTimer::new(1, 1.0).owner("bgm://title"));
        manager.stop("bgm://title").unwrap();

        manager.tick_at(secs(0));
        manager.tick_at(secs(100));

        // Still present: auto_remove only evicts expiries.
        assert!(manager.contains("bgm://title"));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let manager: TimerManager<u32> = TimerManager::new();
        manager.insert(SourceTimer::new(1, 2.5).owner("bgm://title"));
        manager.tick_at(secs(4));

        let snap = manager.snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let back: Vec<TimerState> = serde_json::from_str(&json).unwrap();

        assert_eq!(snap, back);
    }
}
