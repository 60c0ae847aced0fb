//! Error types for timer and group operations

use thiserror::Error;

use crate::id::TimerId;

/// Errors surfaced synchronously by timer and group operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Duration string does not look like `MM:SS`.
    #[error("invalid duration format: {0:?}")]
    InvalidDurationFormat(String),

    /// Group operation with no explicit target and no current selection.
    #[error("no timer selected")]
    NoTimerSelected,

    /// The timer is not part of this group.
    #[error("timer {0} is not in this group")]
    TimerNotInGroup(String),

    /// An identifier string does not belong to the expected kind of object.
    #[error("{value:?} is not a {expected} identifier")]
    NotAnInstance { value: String, expected: &'static str },

    /// The timer was constructed from an unparsable duration.
    #[error("timer {0} is invalid")]
    InvalidTimer(TimerId),

    /// The timer has ended and must be reset first.
    #[error("timer {0} has ended")]
    TimerInactive(TimerId),

    /// The timer is already part of a group.
    #[error("timer {0} already belongs to a group")]
    AlreadyGrouped(TimerId),

    /// The timer does not belong to any group.
    #[error("timer {0} has no group")]
    NoGroup(TimerId),

    /// Ticking needs a tokio runtime.
    #[error("no tokio runtime available to drive the ticker")]
    NoRuntime,
}

/// Result type alias for timer operations.
pub type Result<T> = std::result::Result<T, TimerError>;
