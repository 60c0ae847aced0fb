//! Replies printed back to the console

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{group::TimerGroup, id::TimerId, timer::TimerSnapshot};

/// Result of one console command
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timers: Vec<TimerSnapshot>,
    pub current: Option<TimerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<String>,
}

impl Reply {
    /// Create a new reply describing the group's state
    pub fn new(status: &str, message: String, group: &TimerGroup) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timers: group.list_all().iter().map(|t| t.snapshot()).collect(),
            current: group.current_timer().map(|t| t.id().clone()),
            canvas: None,
        }
    }

    pub fn ok(message: String, group: &TimerGroup) -> Self {
        Self::new("ok", message, group)
    }

    pub fn error(message: String, group: &TimerGroup) -> Self {
        Self::new("error", message, group)
    }

    /// Attach the rendered mount point
    pub fn with_canvas(mut self, canvas: Option<String>) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn is_error(&self) -> bool {
        self.status == "error"
    }

    /// Human-readable form
    pub fn to_text(&self) -> String {
        let mut out = if self.is_error() {
            format!("error: {}", self.message)
        } else {
            self.message.clone()
        };
        if let Some(canvas) = self.canvas.as_deref().filter(|c| !c.is_empty()) {
            out.push('\n');
            out.push_str(canvas);
        }
        out
    }

    /// One line per timer, current marked with `*`
    pub fn listing(&self) -> String {
        if self.timers.is_empty() {
            return "no timers".to_string();
        }
        self.timers
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let marker = if self.current.as_ref() == Some(&t.id) { '*' } else { ' ' };
                format!(
                    "{}{:>2}. {} {:<8} {} {}",
                    marker,
                    i + 1,
                    t.id,
                    t.status.as_str(),
                    t.display(),
                    t.label.as_deref().unwrap_or("")
                )
                .trim_end()
                .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
