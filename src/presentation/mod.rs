//! Presentation module
//!
//! Rendering strategies a timer drives at each state transition, and the
//! shared mount point a group hands to them.

pub mod mount;
pub mod strategy;
pub mod text_bar;
pub mod traced;

// Re-export main types
pub use mount::{MountPoint, Row};
pub use strategy::{Headless, Presentation};
pub use text_bar::TextBar;
pub use traced::TracingPresentation;
