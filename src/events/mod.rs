//! Events relating to timers, and handlers for responding to them.
//!
//! Timers themselves only mutate their own fields; anything a host wants
//! to *happen* when a countdown runs out is expressed as an
//! [`EventHandler`] registered against a [`TimerEvent`] class on a
//! [`TimerManager`], or as a channel subscription via
//! [`TimerManager::event_feed`].
//!
//! Handlers are called synchronously from whichever call advanced the
//! timer, i.e. from inside the host's own update loop. They should be
//! cheap; long-running work belongs on the far side of a channel.
//!
//! [`TimerManager`]: crate::TimerManager
//! [`TimerManager::event_feed`]: crate::TimerManager::event_feed

mod store;
mod timer;

pub use self::{store::*, timer::*};

use crate::timers::TimerState;

/// Information about the timer which fired an event.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum EventContext<'a> {
    /// Timer event context, carrying a snapshot of the firing timer's
    /// state at the moment the event occurred.
    Timer(&'a TimerState),
}

impl EventContext<'_> {
    /// Retrieves the state snapshot attached to this event.
    #[must_use]
    pub fn state(&self) -> &TimerState {
        match self {
            Self::Timer(state) => state,
        }
    }
}

/// Responses to timer state changes.
///
/// Handlers are registered against one [`TimerEvent`] class, and persist
/// while `act` returns `None`; returning `Some(other)` re-registers the
/// handler against `other` instead.
pub trait EventHandler: Send {
    /// Respond to one firing of the subscribed event.
    fn act(&mut self, ctx: &EventContext<'_>) -> Option<TimerEvent>;
}
