#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
//! Cadenza is a small bookkeeping library for audio engines, tracking
//! playback timing metadata for each live audio source.
//!
//! The host engine remains in charge of its sources and of its monotonic
//! clock; cadenza records, per source, an owning resource key (typically a
//! URL), a non-owning handle to the source, the clock reading seen at the
//! last update, and a countdown value. Timers are advanced from the host's
//! per-frame update loop, either one at a time via
//! [`SourceTimer::update_timer`] or in bulk through a [`TimerManager`].
//!
//! The library offers:
//!  * A [`SourceTimer`] countdown generic over the host's source handle
//!  type, so engines never hand over ownership of their audio objects.
//!  * A [`TimerManager`] registry keyed by owning resource, with event
//!  handlers and channel subscriptions fired as timers expire.
//!  * Pluggable [`TimeSource`]s, including a deterministic manual clock
//!  for tests and replay.
//!
//! Cadenza performs no mixing, decoding, or device I/O: it only measures
//! time, and tells you when it has run out.

#![warn(clippy::pedantic)]
#![allow(
    // Allowed as they are too pedantic
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc
)]

pub mod clock;
mod config;
pub mod constants;
pub mod error;
pub mod events;
mod manager;
pub mod timers;

pub use crate::{
    clock::{ManualClock, SystemClock, TimeSource},
    events::{EventContext, EventHandler, TimerEvent},
    manager::TimerManager,
    timers::{SourceTimer, TimerState},
};

pub use config::Config;
