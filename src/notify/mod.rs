//! Event notification module
//!
//! A small publish/subscribe component composed into timers and groups.

pub mod notifier;

pub use notifier::{handler, Handler, Notifier};
pub(crate) use notifier::panic_message;
