//! Timer module
//!
//! The countdown state machine, its options, snapshots and events.

pub mod event;
pub mod options;
pub mod state;
#[allow(clippy::module_inception)]
pub mod timer;

// Re-export main types
pub use crate::id::TimerId;
pub use event::{TimerEvent, TimerEventKind};
pub use options::{TimerOptions, DEFAULT_INTERVAL};
pub use state::{TimerSnapshot, TimerStatus};
pub use timer::Timer;
