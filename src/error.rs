//! Timer control error handling.

use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Errors associated with control and manipulation of timers.
///
/// Unless otherwise stated, these don't invalidate an existing timer,
/// but do advise on valid operations and commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ControlError {
    /// The operation failed because no timer was registered under the
    /// given owner key, or it has already been removed.
    NotFound,
    /// The operation failed because the timer has been manually stopped,
    /// and cannot be restarted.
    Finished,
}

impl Display for ControlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "failed to operate on timer: ")?;
        match self {
            ControlError::NotFound => write!(f, "no timer under that owner key"),
            ControlError::Finished => write!(f, "timer was stopped"),
        }
    }
}

impl Error for ControlError {}

/// Alias for most fallible calls on timers and [`TimerManager`]s.
///
/// [`TimerManager`]: crate::TimerManager
pub type TimerResult<T> = Result<T, ControlError>;
