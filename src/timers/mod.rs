//! Per-source playback timers.
//!
//! A [`SourceTimer`] tracks the timing metadata an audio engine keeps
//! around each live source: which resource created it (typically a URL),
//! a handle to the source itself, the monotonic clock reading seen at the
//! last update, and a countdown value in seconds.
//!
//! Timers are driven by their caller. Each frame, the host reads its
//! monotonic clock and passes the reading to [`update_timer`]; the timer
//! subtracts the observed interval from its countdown. The very first
//! update only establishes a baseline, so a timer created mid-session
//! does not instantly lose the time elapsed before it existed.
//!
//! The source handle is held for the caller's convenience and is never
//! read, written, or liveness-checked; its validity (and the clock's
//! monotonicity) are the caller's contract.
//!
//! [`update_timer`]: SourceTimer::update_timer

mod mode;
mod state;

pub use self::{mode::*, state::*};

use crate::{
    constants::TIMESTEP_LENGTH,
    error::{ControlError, TimerResult},
};
use std::time::Duration;
use tracing::{trace, warn};
use uuid::Uuid;

/// Playback timing metadata for one audio source.
///
/// `S` is the host engine's own source-handle type; a timer stores one
/// without taking any interest in it, so non-owning ids, `Arc`s, and
/// plain copies are all workable choices.
///
/// # Example
///
/// ```rust
/// use cadenza::timers::SourceTimer;
/// use std::time::Duration;
///
/// // The host's handle type -- here, just an index into its source pool.
/// let mut timer = SourceTimer::new(7usize, 5.0).owner("bgm://title-screen");
///
/// timer.update_timer(Duration::from_secs(10)); // baseline
/// timer.update_timer(Duration::from_secs(12));
///
/// assert_eq!(timer.remaining(), 3.0);
/// ```
#[derive(Clone, Debug)]
pub struct SourceTimer<S> {
    /// Key of the external context which created this timer, e.g. the
    /// URL of a background-music track.
    ///
    /// Informational only; never validated.
    pub owner: String,

    /// Handle to the externally-owned audio source this timer describes.
    ///
    /// `None` for default-constructed timers.
    pub source: Option<S>,

    /// Unique identifier for this timer.
    ///
    /// Defaults to a random 128-bit number.
    pub uuid: Uuid,

    mode: TimerMode,
    timer: f32,
    last_update: Option<Duration>,
    play_time: Duration,
}

impl<S> Default for SourceTimer<S> {
    fn default() -> Self {
        Self {
            owner: String::new(),
            source: None,
            uuid: Uuid::default(),
            mode: TimerMode::default(),
            timer: 0.0,
            last_update: None,
            play_time: Duration::default(),
        }
    }
}

impl<S> SourceTimer<S> {
    /// Creates a timer for `source` with `initial_time` seconds on the
    /// countdown and a random [`Uuid`].
    #[must_use]
    pub fn new(source: S, initial_time: f32) -> Self {
        Self::new_with_uuid(source, initial_time, Uuid::new_v4())
    }

    /// Creates a timer for `source` with `initial_time` seconds on the
    /// countdown and a custom [`Uuid`].
    #[must_use]
    pub fn new_with_uuid(source: S, initial_time: f32, uuid: Uuid) -> Self {
        Self {
            source: Some(source),
            timer: initial_time,
            uuid,
            ..Self::default()
        }
    }

    /// Sets the owning-context key in a manner that allows method
    /// chaining.
    #[must_use]
    pub fn owner<O: Into<String>>(mut self, owner: O) -> Self {
        self.owner = owner.into();
        self
    }

    /// Sets this timer's unique identifier.
    #[must_use]
    pub fn uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = uuid;
        self
    }

    /// Advances this timer to the monotonic clock reading `now`.
    ///
    /// The first call establishes a baseline and deducts nothing;
    /// every later call subtracts the interval since the previous
    /// reading from the countdown. A reading earlier than the previous
    /// one breaks the caller's monotonicity contract and is treated as
    /// zero elapsed time.
    ///
    /// A running timer whose countdown reaches zero moves to
    /// [`TimerMode::Expired`]. Updates past that point keep subtracting,
    /// so [`remaining`] may go negative.
    ///
    /// [`remaining`]: SourceTimer::remaining
    pub fn update_timer(&mut self, now: Duration) {
        let elapsed = match self.last_update {
            Some(last) => {
                if now < last {
                    warn!(
                        "Clock reading for timer {} went backwards ({:?} < {:?}); \
                         treating as zero elapsed.",
                        self.uuid, now, last,
                    );
                }
                now.saturating_sub(last)
            },
            None => Duration::default(),
        };

        self.last_update = Some(now);
        self.play_time += elapsed;
        self.timer -= elapsed.as_secs_f32();

        self.check_expiry();
    }

    /// Advances this timer by one fixed frame of [`TIMESTEP_LENGTH`],
    /// for hosts which step at a known rate rather than reading a clock.
    ///
    /// The stored last-update reading is advanced by the same amount, so
    /// fixed stepping and clock readings should not be mixed on one
    /// timer.
    pub fn step_frame(&mut self) {
        if let Some(last) = self.last_update.as_mut() {
            *last += TIMESTEP_LENGTH;
        }

        self.play_time += TIMESTEP_LENGTH;
        self.timer -= TIMESTEP_LENGTH.as_secs_f32();

        self.check_expiry();
    }

    /// Re-arms this timer with a fresh countdown value.
    ///
    /// The last-update baseline is retained, so the next update measures
    /// elapsed time from the previous reading as usual.
    ///
    /// Stopped timers cannot be restarted, and return
    /// [`ControlError::Finished`].
    pub fn reset(&mut self, value: f32) -> TimerResult<()> {
        if self.mode.is_done() {
            return Err(ControlError::Finished);
        }

        self.timer = value;
        self.mode = TimerMode::Running;

        Ok(())
    }

    /// Manually stops this timer.
    ///
    /// This is *final*: a stopped timer never expires, and cannot be
    /// re-armed.
    pub fn stop(&mut self) {
        self.mode = TimerMode::Stopped;
    }

    /// Returns the remaining countdown value, in seconds.
    ///
    /// Negative once observed time overshoots the initial value.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        self.timer
    }

    /// Returns the clock reading seen at the last update, if any update
    /// has happened yet.
    #[must_use]
    pub fn last_update(&self) -> Option<Duration> {
        self.last_update
    }

    /// Returns the total observed elapsed time across all updates.
    #[must_use]
    pub fn play_time(&self) -> Duration {
        self.play_time
    }

    /// Returns the countdown status of this timer.
    #[must_use]
    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Returns whether this timer's countdown has run out.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.mode == TimerMode::Expired
    }

    /// Captures a snapshot of this timer's state.
    #[must_use]
    pub fn state(&self) -> TimerState {
        TimerState {
            owner: self.owner.clone(),
            uuid: self.uuid,
            mode: self.mode,
            remaining: self.timer,
            last_update: self.last_update,
            play_time: self.play_time,
        }
    }

    fn check_expiry(&mut self) {
        if self.mode.is_running() && self.timer <= 0.0 {
            self.mode = TimerMode::Expired;
            trace!("Timer {} ({}) expired.", self.uuid, self.owner);
        }
    }
}
