//! Presentation that logs every hook instead of drawing

use tracing::{debug, info};

use super::{mount::MountPoint, strategy::Presentation};
use crate::timer::TimerSnapshot;

/// Logs each rendering hook through `tracing`.
#[derive(Debug, Default, Clone)]
pub struct TracingPresentation {
    name: Option<String>,
}

impl TracingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("<ungenerated>")
    }
}

impl Presentation for TracingPresentation {
    fn generate(&mut self, timer: &TimerSnapshot) {
        self.name = Some(timer.name().to_string());
        debug!("Presentation generate: {}", self.name());
    }

    fn inject(&mut self, mount: &MountPoint) {
        debug!("Presentation inject: {} into {}", self.name(), mount.id());
    }

    fn update(&mut self, timer: &TimerSnapshot) {
        debug!(
            "Presentation update: {} {} ({:.0}%)",
            self.name(),
            timer.display(),
            timer.remaining_pct()
        );
    }

    fn reset(&mut self, timer: &TimerSnapshot) {
        debug!("Presentation reset: {} to {}", self.name(), timer.display());
    }

    fn pause(&mut self, timer: &TimerSnapshot) {
        debug!("Presentation pause: {} at {}", self.name(), timer.display());
    }

    fn stop(&mut self, timer: &TimerSnapshot) {
        info!("Presentation stop: {} at {}", self.name(), timer.display());
    }

    fn done(&mut self, _timer: &TimerSnapshot) {
        info!("Presentation done: {}", self.name());
    }

    fn destroy(&mut self) {
        debug!("Presentation destroy: {}", self.name());
    }
}
