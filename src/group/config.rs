//! Group configuration

use serde::{Deserialize, Serialize};

/// Options a host passes when creating a [`TimerGroup`](super::TimerGroup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupConfig {
    /// Create a mount point and render timers by default.
    pub render_ui: bool,
    /// Name of the host container the mount point renders into.
    pub mount_selector: String,
    /// Release a timer's presentation as soon as it stops or expires.
    pub cleanup_on_delete: bool,
}

impl GroupConfig {
    /// Headless group with default settings.
    pub fn new() -> Self {
        Self {
            render_ui: false,
            mount_selector: "timers".to_string(),
            cleanup_on_delete: false,
        }
    }

    /// Group that renders into `mount_selector`.
    pub fn with_ui(mount_selector: impl Into<String>) -> Self {
        Self {
            render_ui: true,
            mount_selector: mount_selector.into(),
            ..Self::new()
        }
    }

    pub fn cleanup_on_delete(mut self, cleanup: bool) -> Self {
        self.cleanup_on_delete = cleanup;
        self
    }
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self::new()
    }
}
