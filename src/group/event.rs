//! Group events

use serde::Serialize;

use crate::id::TimerId;

pub const TIMER_CREATED: &str = "timer:created";
/// A timer asked to be deleted. The group handles this itself.
pub const TIMER_DELETE: &str = "timer:delete";
pub const TIMER_DELETED: &str = "timer:deleted";
pub const TIMER_SELECTED: &str = "timer:selected";

/// Payload delivered to group event handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GroupEvent {
    Created {
        timer: TimerId,
    },
    DeleteRequested {
        timer: TimerId,
    },
    Deleted {
        timer: TimerId,
        current: Option<TimerId>,
    },
    Selected {
        timer: TimerId,
    },
}

impl GroupEvent {
    /// Name the event is published under.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => TIMER_CREATED,
            Self::DeleteRequested { .. } => TIMER_DELETE,
            Self::Deleted { .. } => TIMER_DELETED,
            Self::Selected { .. } => TIMER_SELECTED,
        }
    }
}
