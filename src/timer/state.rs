//! Timer status and point-in-time snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{duration, id::TimerId};

/// Lifecycle state of a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// Built from an unparsable duration. Terminal.
    Invalid,
    /// Constructed or reset, not started.
    Idle,
    /// Ticker active.
    Running,
    /// Ticker suspended, remaining time kept.
    Paused,
    /// Expired or stopped. Only `reset` leaves this state.
    Ended,
}

impl TimerStatus {
    pub fn is_running(self) -> bool {
        self == Self::Running
    }

    pub fn is_ended(self) -> bool {
        self == Self::Ended
    }

    pub fn is_valid(self) -> bool {
        self != Self::Invalid
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Ended => "ended",
        }
    }
}

/// Copy of a timer's observable state, handed to presentations and handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub id: TimerId,
    pub label: Option<String>,
    pub status: TimerStatus,
    /// Remaining time. Can dip below zero on the completing tick.
    pub current_ms: i64,
    pub original_ms: u64,
    pub added_ms: u64,
    pub interval_ms: u64,
    pub at: DateTime<Utc>,
}

impl TimerSnapshot {
    /// Full countdown length including added time.
    pub fn total_ms(&self) -> u64 {
        self.original_ms + self.added_ms
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        duration::format(self.current_ms)
    }

    /// Remaining share of the total, 0.0 ..= 100.0.
    pub fn remaining_pct(&self) -> f64 {
        let total = self.total_ms();
        if total == 0 {
            return 0.0;
        }
        (self.current_ms as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Label if present, otherwise the id.
    pub fn name(&self) -> &str {
        self.label.as_deref().unwrap_or(self.id.as_str())
    }
}
