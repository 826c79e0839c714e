use super::{EventContext, EventHandler, TimerEvent};
use derivative::Derivative;
use std::collections::HashMap;
use tracing::debug;

/// Storage for [`EventHandler`]s, keyed by the [`TimerEvent`] class
/// they listen for.
///
/// Handlers attached to the same event class fire in the order they
/// were added.
#[derive(Derivative, Default)]
#[derivative(Debug)]
pub struct EventStore {
    #[derivative(Debug = "ignore")]
    handlers: HashMap<TimerEvent, Vec<Box<dyn EventHandler>>>,
}

impl EventStore {
    /// Creates an empty event store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a handler, to be fired whenever `evt` occurs.
    pub fn add_event<H>(&mut self, evt: TimerEvent, handler: H)
    where
        H: EventHandler + 'static,
    {
        self.handlers.entry(evt).or_default().push(Box::new(handler));
    }

    /// Returns whether no handlers are registered for any event class.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(Vec::is_empty)
    }

    /// Fires all handlers registered against `evt`.
    ///
    /// A handler returning `Some(other)` is moved to listen for `other`
    /// from the next event onwards; returning `None` (or its current
    /// class) leaves it in place.
    pub fn fire(&mut self, evt: TimerEvent, ctx: &EventContext<'_>) {
        let Some(fired) = self.handlers.remove(&evt) else {
            return;
        };

        debug!("Firing {} handler(s) for {:?}.", fired.len(), evt);

        let mut kept = Vec::with_capacity(fired.len());
        let mut migrated = Vec::new();

        for mut handler in fired {
            match handler.act(ctx) {
                None => kept.push(handler),
                Some(new_evt) if new_evt == evt => kept.push(handler),
                Some(new_evt) => migrated.push((new_evt, handler)),
            }
        }

        if !kept.is_empty() {
            self.handlers.insert(evt, kept);
        }

        for (new_evt, handler) in migrated {
            self.handlers.entry(new_evt).or_default().push(handler);
        }
    }
}
