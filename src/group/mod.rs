//! Timer group module
//!
//! Owns an ordered set of timers, the current selection and the shared mount point.

pub mod config;
pub mod event;
#[allow(clippy::module_inception)]
pub mod group;

// Re-export main types
pub use crate::id::GroupId;
pub use config::GroupConfig;
pub use event::GroupEvent;
pub(crate) use group::GroupInner;
pub use group::TimerGroup;
