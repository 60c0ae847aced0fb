//! Countdown Timers - grouped countdown timers with pluggable presentation
//!
//! A [`Timer`] counts a `MM:SS` duration down on a tokio ticker and publishes
//! lifecycle events. A [`TimerGroup`] owns an ordered set of timers, tracks the
//! current selection and hosts the shared mount point their progress bars are
//! drawn into.

pub mod config;
pub mod console;
pub mod duration;
pub mod error;
pub mod group;
pub mod id;
pub mod notify;
pub mod presentation;
pub mod tasks;
pub mod timer;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, TimerError};
pub use group::{GroupConfig, GroupEvent, GroupId, TimerGroup};
pub use presentation::{Presentation, TextBar};
pub use timer::{Timer, TimerEvent, TimerEventKind, TimerId, TimerOptions, TimerStatus};
pub use utils::signals::shutdown_signal;
