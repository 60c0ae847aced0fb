//! Background tasks module
//!
//! Periodic work spawned onto the tokio runtime on behalf of timers.

pub mod ticker;

// Re-export main types
pub use ticker::Ticker;
