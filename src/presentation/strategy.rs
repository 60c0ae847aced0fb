//! Rendering hooks a timer calls at each state transition

use std::fmt;

use super::mount::MountPoint;
use crate::timer::TimerSnapshot;

/// Strategy for rendering a single timer.
///
/// Every hook defaults to doing nothing, so a strategy only overrides what it
/// renders. Hooks run while the timer's state is locked and must not call
/// back into the timer. A hook that panics is logged and the presentation is
/// dropped; the timer keeps counting without it.
pub trait Presentation: fmt::Debug + Send {
    /// Allocate visual resources.
    fn generate(&mut self, _timer: &TimerSnapshot) {}

    /// Attach the resources under `mount`.
    fn inject(&mut self, _mount: &MountPoint) {}

    /// Re-render the current state.
    fn update(&mut self, _timer: &TimerSnapshot) {}

    fn reset(&mut self, _timer: &TimerSnapshot) {}

    fn pause(&mut self, _timer: &TimerSnapshot) {}

    fn stop(&mut self, _timer: &TimerSnapshot) {}

    fn done(&mut self, _timer: &TimerSnapshot) {}

    /// Release visual resources.
    fn destroy(&mut self) {}
}

/// Renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Presentation for Headless {}
