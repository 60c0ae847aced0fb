//! Timer lifecycle events

use serde::{Deserialize, Serialize};

use super::state::TimerSnapshot;

/// Names under which timer events are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerEventKind {
    Start,
    Tick,
    Pause,
    Stop,
    Reset,
    Add,
    Done,
    Destroy,
}

impl TimerEventKind {
    pub const ALL: [Self; 8] = [
        Self::Start,
        Self::Tick,
        Self::Pause,
        Self::Stop,
        Self::Reset,
        Self::Add,
        Self::Done,
        Self::Destroy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Tick => "tick",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Reset => "reset",
            Self::Add => "add",
            Self::Done => "done",
            Self::Destroy => "destroy",
        }
    }
}

/// Payload delivered to timer event handlers.
#[derive(Debug, Clone, Serialize)]
pub struct TimerEvent {
    pub kind: TimerEventKind,
    pub timer: TimerSnapshot,
}
