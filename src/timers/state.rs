use super::TimerMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// State of a [`SourceTimer`], designed to be passed to event handlers
/// and retrieved via [`TimerManager::get_state`].
///
/// Snapshots are serialisable so that a host may persist timing state
/// across application suspension, e.g. to resume a background-music fade
/// where it left off.
///
/// [`SourceTimer`]: super::SourceTimer
/// [`TimerManager::get_state`]: crate::TimerManager::get_state
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct TimerState {
    /// Owning-context key of this timer.
    pub owner: String,
    /// Unique identifier of this timer.
    pub uuid: Uuid,
    /// Countdown status of this timer.
    pub mode: TimerMode,
    /// Remaining countdown value, in seconds.
    ///
    /// May be negative: updates keep subtracting observed time after
    /// expiry, and the crate never clamps the stored value.
    pub remaining: f32,
    /// Clock reading seen at the last update, if any update has
    /// happened yet.
    pub last_update: Option<Duration>,
    /// Total observed elapsed time, increasing monotonically.
    pub play_time: Duration,
}
