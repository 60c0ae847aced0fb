//! Construction options for a timer

use std::{fmt, time::Duration};

use crate::{group::TimerGroup, presentation::Presentation};

/// Default tick granularity.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Options accepted by [`Timer::new`](super::Timer::new) and
/// [`TimerGroup::create_timer`].
pub struct TimerOptions {
    pub label: Option<String>,
    /// Group to register into. Set automatically by `create_timer`.
    pub group: Option<TimerGroup>,
    /// Whether presentation hooks run. `None` inherits the group's setting.
    pub render_ui: Option<bool>,
    /// Rendering strategy. A UI timer without one gets a `TextBar`.
    pub presentation: Option<Box<dyn Presentation>>,
    pub interval: Duration,
}

impl TimerOptions {
    pub fn new() -> Self {
        Self {
            label: None,
            group: None,
            render_ui: None,
            presentation: None,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn group(mut self, group: &TimerGroup) -> Self {
        self.group = Some(group.clone());
        self
    }

    pub fn render_ui(mut self, render_ui: bool) -> Self {
        self.render_ui = Some(render_ui);
        self
    }

    /// Use `presentation` and turn rendering on unless explicitly disabled.
    pub fn presentation(mut self, presentation: impl Presentation + 'static) -> Self {
        self.presentation = Some(Box::new(presentation));
        self.render_ui.get_or_insert(true);
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerOptions")
            .field("label", &self.label)
            .field("group", &self.group.as_ref().map(|g| g.id().to_string()))
            .field("render_ui", &self.render_ui)
            .field("presentation", &self.presentation)
            .field("interval", &self.interval)
            .finish()
    }
}
