//! Countdown timer state machine
//!
//! A [`Timer`] is a cheap, cloneable handle. Its state lives behind a mutex
//! shared with the ticker task, which holds only a weak reference, so each
//! tick and each direct call runs to completion before the next one starts.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!   |        |          |
//!   +--------+----------+--> Ended --reset--> Idle
//!
//! Invalid (unparsable duration) accepts no transitions.
//! ```

use std::{
    fmt,
    ops::ControlFlow,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};
use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::{
    event::{TimerEvent, TimerEventKind},
    options::TimerOptions,
    state::{TimerSnapshot, TimerStatus},
};
use crate::{
    duration,
    error::{Result, TimerError},
    group::{GroupInner, TimerGroup},
    id::TimerId,
    notify::{panic_message, Handler, Notifier},
    presentation::{Presentation, TextBar},
    tasks::Ticker,
};

/// Handle to a single countdown timer.
#[derive(Clone)]
pub struct Timer {
    inner: Arc<TimerInner>,
}

struct TimerInner {
    id: TimerId,
    label: Option<String>,
    interval: Duration,
    core: Mutex<TimerCore>,
    events: Notifier<TimerEvent>,
}

struct TimerCore {
    status: TimerStatus,
    original_ms: u64,
    added_ms: u64,
    current_ms: i64,
    ticker: Ticker,
    /// Bumped on every start so a superseded ticker cannot act.
    epoch: u64,
    presentation: Option<Box<dyn Presentation>>,
    group: Weak<GroupInner>,
    /// Release presentation resources as soon as the timer ends.
    cleanup: bool,
    destroyed: bool,
}

impl TimerCore {
    fn new(status: TimerStatus, original_ms: u64) -> Self {
        Self {
            status,
            original_ms,
            added_ms: 0,
            current_ms: original_ms as i64,
            ticker: Ticker::idle(),
            epoch: 0,
            presentation: None,
            group: Weak::new(),
            cleanup: false,
            destroyed: false,
        }
    }

    /// Run one presentation hook. A presentation that panics is logged and
    /// dropped; the timer carries on without it.
    fn present(
        &mut self,
        id: &TimerId,
        hook: &str,
        f: impl FnOnce(&mut (dyn Presentation + 'static)),
    ) {
        let Some(presentation) = self.presentation.as_mut() else {
            return;
        };
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| f(&mut **presentation))) {
            error!(
                "Presentation {} hook for timer {} panicked: {}",
                hook,
                id,
                panic_message(payload.as_ref())
            );
            self.presentation = None;
        }
    }

    fn release_presentation(&mut self, id: &TimerId) {
        self.present(id, "destroy", |presentation| presentation.destroy());
        self.presentation = None;
    }
}

impl Timer {
    /// Create a timer from a `MM:SS` duration.
    ///
    /// Unparsable input yields a timer in the `Invalid` state that rejects
    /// every operation; check [`Timer::is_valid`] before use, or call
    /// [`Timer::try_new`] to get the error instead.
    pub fn new(duration: &str, options: TimerOptions) -> Self {
        match duration::parse(duration) {
            Ok(ms) => Self::build(ms, options),
            Err(e) => {
                warn!("Creating invalid timer: {}", e);
                Self::assemble(
                    options.label,
                    options.interval,
                    TimerCore::new(TimerStatus::Invalid, 0),
                )
            }
        }
    }

    /// Create a timer, surfacing an unparsable duration as an error.
    pub fn try_new(duration: &str, options: TimerOptions) -> Result<Self> {
        let ms = duration::parse(duration)?;
        Ok(Self::build(ms, options))
    }

    fn build(original_ms: u64, options: TimerOptions) -> Self {
        let TimerOptions {
            label,
            group,
            render_ui,
            presentation,
            interval,
        } = options;

        let render_ui =
            render_ui.unwrap_or_else(|| group.as_ref().is_some_and(|g| g.config().render_ui));
        let mut core = TimerCore::new(TimerStatus::Idle, original_ms);
        core.group = group.as_ref().map(TimerGroup::downgrade).unwrap_or_default();
        core.cleanup = group.as_ref().is_some_and(|g| g.config().cleanup_on_delete);
        if render_ui {
            core.presentation = Some(presentation.unwrap_or_else(default_presentation));
        }

        let timer = Self::assemble(label, interval, core);

        {
            let id = &timer.inner.id;
            let mut core = timer.core();
            let snapshot = timer.snapshot_of(&core);
            core.present(id, "generate", |p| p.generate(&snapshot));
            if let Some(mount) = group.as_ref().and_then(TimerGroup::mount) {
                core.present(id, "inject", |p| p.inject(mount));
            }
            core.present(id, "update", |p| p.update(&snapshot));
        }

        if let Some(group) = &group {
            group.register(timer.clone());
        }

        info!(
            "Created timer {} ({}) for {}",
            timer.inner.id,
            timer.inner.label.as_deref().unwrap_or("unlabelled"),
            duration::format(original_ms as i64)
        );
        timer
    }

    fn assemble(
        label: Option<String>,
        interval: Duration,
        core: TimerCore,
    ) -> Self {
        Self {
            inner: Arc::new(TimerInner {
                id: TimerId::generate(),
                label,
                interval: interval.max(Duration::from_millis(1)),
                core: Mutex::new(core),
                events: Notifier::new(),
            }),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin or resume counting down.
    ///
    /// Already running or ended timers ignore the call. Needs a tokio runtime.
    pub fn start(&self) -> Result<()> {
        let snapshot = {
            let mut core = self.core();
            if self.is_destroyed_for(&core, "start") {
                return Ok(());
            }
            match core.status {
                TimerStatus::Invalid => return Err(TimerError::InvalidTimer(self.inner.id.clone())),
                TimerStatus::Running | TimerStatus::Ended => {
                    debug!("Timer {} is {}, ignoring start", self.inner.id, core.status.as_str());
                    return Ok(());
                }
                TimerStatus::Idle | TimerStatus::Paused => {}
            }

            let epoch = core.epoch + 1;
            let weak = Arc::downgrade(&self.inner);
            core.ticker = Ticker::spawn(self.inner.interval, move || match weak.upgrade() {
                Some(inner) => Timer { inner }.advance(epoch),
                None => ControlFlow::Break(()),
            })?;
            core.epoch = epoch;
            core.status = TimerStatus::Running;
            self.snapshot_of(&core)
        };

        info!("Timer {} started with {} remaining", snapshot.name(), snapshot.display());
        self.publish(TimerEventKind::Start, snapshot);
        Ok(())
    }

    /// Suspend the countdown, keeping the remaining time.
    pub fn pause(&self) {
        let snapshot = {
            let mut core = self.core();
            if self.is_destroyed_for(&core, "pause") || core.status != TimerStatus::Running {
                return;
            }
            core.ticker.cancel();
            core.status = TimerStatus::Paused;
            let snapshot = self.snapshot_of(&core);
            core.present(&self.inner.id, "pause", |p| p.pause(&snapshot));
            snapshot
        };

        info!("Timer {} paused at {}", snapshot.name(), snapshot.display());
        self.publish(TimerEventKind::Pause, snapshot);
    }

    /// End the timer without waiting for expiry. Idempotent.
    pub fn stop(&self) {
        let snapshot = {
            let mut core = self.core();
            if self.is_destroyed_for(&core, "stop") {
                return;
            }
            match core.status {
                TimerStatus::Idle | TimerStatus::Running | TimerStatus::Paused => {}
                TimerStatus::Ended | TimerStatus::Invalid => return,
            }
            core.ticker.cancel();
            core.status = TimerStatus::Ended;
            let snapshot = self.snapshot_of(&core);
            core.present(&self.inner.id, "stop", |p| p.stop(&snapshot));
            if core.cleanup {
                core.release_presentation(&self.inner.id);
            }
            snapshot
        };

        info!("Timer {} stopped at {}", snapshot.name(), snapshot.display());
        self.publish(TimerEventKind::Stop, snapshot);
    }

    /// Return to `Idle` with the original duration. Added time is discarded.
    pub fn reset(&self) -> Result<()> {
        let snapshot = {
            let mut core = self.core();
            if self.is_destroyed_for(&core, "reset") {
                return Ok(());
            }
            if core.status == TimerStatus::Invalid {
                return Err(TimerError::InvalidTimer(self.inner.id.clone()));
            }
            core.ticker.cancel();
            core.status = TimerStatus::Idle;
            core.added_ms = 0;
            core.current_ms = core.original_ms as i64;
            let snapshot = self.snapshot_of(&core);
            core.present(&self.inner.id, "update", |p| p.update(&snapshot));
            core.present(&self.inner.id, "reset", |p| p.reset(&snapshot));
            snapshot
        };

        info!("Timer {} reset to {}", snapshot.name(), snapshot.display());
        self.publish(TimerEventKind::Reset, snapshot);
        Ok(())
    }

    /// Grant extra time given as a `MM:SS` string.
    ///
    /// Rejected input leaves the timer untouched.
    pub fn add(&self, input: &str) -> Result<()> {
        let (extra, snapshot) = {
            let mut core = self.core();
            if self.is_destroyed_for(&core, "add") {
                return Ok(());
            }
            match core.status {
                TimerStatus::Invalid => return Err(TimerError::InvalidTimer(self.inner.id.clone())),
                TimerStatus::Ended => return Err(TimerError::TimerInactive(self.inner.id.clone())),
                TimerStatus::Idle | TimerStatus::Running | TimerStatus::Paused => {}
            }
            let extra = duration::parse(input)?;
            core.added_ms += extra;
            core.current_ms += extra as i64;
            let snapshot = self.snapshot_of(&core);
            core.present(&self.inner.id, "update", |p| p.update(&snapshot));
            (extra, snapshot)
        };

        info!(
            "Added {} to timer {}, now {}",
            duration::format(extra as i64),
            snapshot.name(),
            snapshot.display()
        );
        self.publish(TimerEventKind::Add, snapshot);
        Ok(())
    }

    /// Cancel ticking and release presentation resources.
    ///
    /// Every later call on this timer is ignored.
    pub fn destroy(&self) {
        let snapshot = {
            let mut core = self.core();
            if core.destroyed {
                return;
            }
            core.ticker.cancel();
            core.release_presentation(&self.inner.id);
            core.destroyed = true;
            if matches!(
                core.status,
                TimerStatus::Idle | TimerStatus::Running | TimerStatus::Paused
            ) {
                core.status = TimerStatus::Ended;
            }
            self.snapshot_of(&core)
        };

        debug!("Timer {} destroyed", snapshot.name());
        self.publish(TimerEventKind::Destroy, snapshot);
    }

    /// Ask the owning group to delete this timer.
    pub fn request_delete(&self) -> Result<()> {
        let group = self
            .group()
            .ok_or_else(|| TimerError::NoGroup(self.inner.id.clone()))?;
        group.request_delete(&self.inner.id);
        Ok(())
    }

    // ── Ticking ──────────────────────────────────────────────────────

    fn advance(&self, epoch: u64) -> ControlFlow<()> {
        let (tick, done) = {
            let mut core = self.core();
            if core.destroyed || core.epoch != epoch || core.status != TimerStatus::Running {
                return ControlFlow::Break(());
            }
            core.current_ms -= self.interval_ms() as i64;
            let tick = self.snapshot_of(&core);
            core.present(&self.inner.id, "update", |p| p.update(&tick));
            let done = (core.current_ms <= 0).then(|| self.finish(&mut core));
            (tick, done)
        };

        debug!("Timer {} tick: {}", tick.name(), tick.display());
        self.publish(TimerEventKind::Tick, tick);

        match done {
            Some(snapshot) => {
                info!("Timer {} done", snapshot.name());
                self.publish(TimerEventKind::Done, snapshot);
                ControlFlow::Break(())
            }
            None => ControlFlow::Continue(()),
        }
    }

    fn finish(&self, core: &mut TimerCore) -> TimerSnapshot {
        core.ticker.cancel();
        core.status = TimerStatus::Ended;
        let snapshot = self.snapshot_of(core);
        core.present(&self.inner.id, "done", |p| p.done(&snapshot));
        if core.cleanup {
            core.release_presentation(&self.inner.id);
        }
        snapshot
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Subscribe to a lifecycle event of this timer.
    pub fn on(&self, kind: TimerEventKind, handler: Handler<TimerEvent>) {
        self.inner.events.on(kind.as_str(), handler);
    }

    /// Unsubscribe every registration of `handler` for `kind`.
    pub fn off(&self, kind: TimerEventKind, handler: &Handler<TimerEvent>) {
        self.inner.events.off(kind.as_str(), handler);
    }

    fn publish(&self, kind: TimerEventKind, timer: TimerSnapshot) {
        self.inner
            .events
            .trigger(kind.as_str(), &TimerEvent { kind, timer });
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> &TimerId {
        &self.inner.id
    }

    pub fn label(&self) -> Option<&str> {
        self.inner.label.as_deref()
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    pub fn status(&self) -> TimerStatus {
        self.core().status
    }

    pub fn is_valid(&self) -> bool {
        self.status().is_valid()
    }

    pub fn is_running(&self) -> bool {
        self.status().is_running()
    }

    pub fn is_ended(&self) -> bool {
        self.status().is_ended()
    }

    pub fn is_destroyed(&self) -> bool {
        self.core().destroyed
    }

    pub fn current_ms(&self) -> i64 {
        self.core().current_ms
    }

    pub fn original_ms(&self) -> u64 {
        self.core().original_ms
    }

    pub fn added_ms(&self) -> u64 {
        self.core().added_ms
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let core = self.core();
        self.snapshot_of(&core)
    }

    /// The group this timer belongs to, if it is still registered.
    pub fn group(&self) -> Option<TimerGroup> {
        let weak = self.core().group.clone();
        weak.upgrade().map(TimerGroup::from_inner)
    }

    /// Other timers in the same group.
    pub fn siblings(&self) -> Vec<Timer> {
        self.group()
            .map(|group| {
                group
                    .list_all()
                    .into_iter()
                    .filter(|t| t.id() != self.id())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn detach_group(&self) {
        self.core().group = Weak::new();
    }

    /// Adopt `group` as this timer's owner and draw into its mount point.
    ///
    /// Checked and applied under the timer's lock, so a timer can only ever
    /// join one group.
    pub(crate) fn attach_group(&self, group: &TimerGroup) -> Result<()> {
        let mut core = self.core();
        if core.status == TimerStatus::Invalid {
            return Err(TimerError::InvalidTimer(self.inner.id.clone()));
        }
        if core.destroyed {
            return Err(TimerError::TimerInactive(self.inner.id.clone()));
        }
        if core.group.upgrade().is_some() {
            return Err(TimerError::AlreadyGrouped(self.inner.id.clone()));
        }

        core.group = group.downgrade();
        core.cleanup = group.config().cleanup_on_delete;
        if let Some(mount) = group.mount() {
            let snapshot = self.snapshot_of(&core);
            core.present(&self.inner.id, "inject", |p| p.inject(mount));
            core.present(&self.inner.id, "update", |p| p.update(&snapshot));
        }
        Ok(())
    }

    fn interval_ms(&self) -> u64 {
        self.inner.interval.as_millis() as u64
    }

    fn snapshot_of(&self, core: &TimerCore) -> TimerSnapshot {
        TimerSnapshot {
            id: self.inner.id.clone(),
            label: self.inner.label.clone(),
            status: core.status,
            current_ms: core.current_ms,
            original_ms: core.original_ms,
            added_ms: core.added_ms,
            interval_ms: self.interval_ms(),
            at: Utc::now(),
        }
    }

    fn is_destroyed_for(&self, core: &TimerCore, operation: &str) -> bool {
        if core.destroyed {
            warn!("Ignoring {} on destroyed timer {}", operation, self.inner.id);
        }
        core.destroyed
    }

    fn core(&self) -> MutexGuard<'_, TimerCore> {
        self.inner.core.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn default_presentation() -> Box<dyn Presentation> {
    Box::new(TextBar::new())
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Timer {}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.core();
        f.debug_struct("Timer")
            .field("id", &self.inner.id)
            .field("label", &self.inner.label)
            .field("status", &core.status)
            .field("current_ms", &core.current_ms)
            .field("original_ms", &core.original_ms)
            .field("added_ms", &core.added_ms)
            .finish()
    }
}
