/// Timer events correspond to certain actions or changes
/// of timer state, such as a countdown running out or a timer
/// being evicted from its manager.
///
/// Timer events persist while the `act` of their [`EventHandler`]
/// returns `None`.
///
/// [`EventHandler`]: super::EventHandler
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TimerEvent {
    /// The attached timer's countdown has reached (or crossed) zero.
    ///
    /// This fires once per expiry: a timer which is re-armed via
    /// [`reset`] will fire again when it next runs out.
    ///
    /// [`reset`]: crate::timers::SourceTimer::reset
    Expired,
    /// The attached timer was re-armed with a fresh countdown value.
    Reset,
    /// The attached timer was removed from its manager, either manually
    /// or by expiry eviction.
    Removed,
}
