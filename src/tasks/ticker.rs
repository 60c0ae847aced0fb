//! Fixed-cadence repeating task with a cancel handle

use std::{ops::ControlFlow, time::Duration};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::error::{Result, TimerError};

/// Handle to a spawned repeating task.
///
/// The callback first fires one full period after spawning, then every period
/// until it returns `ControlFlow::Break` or the handle is cancelled. Dropping
/// the handle cancels the task.
#[derive(Debug, Default)]
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// A handle with nothing scheduled.
    pub fn idle() -> Self {
        Self { handle: None }
    }

    /// Spawn `on_tick` on the current tokio runtime at a fixed `period`.
    pub fn spawn<F>(period: Duration, mut on_tick: F) -> Result<Self>
    where
        F: FnMut() -> ControlFlow<()> + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        let period = period.max(Duration::from_millis(1));

        let handle = runtime.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            // Late ticks shift the schedule rather than bursting to catch up.
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if on_tick().is_break() {
                    debug!("Ticker finished");
                    break;
                }
            }
        });

        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Cancel the task. Cancelling an idle or already cancelled ticker is a no-op.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Whether a task is scheduled and has not finished.
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
