//! Ordered collection of timers with a current selection

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};
use tracing::{debug, info, warn};

use super::{
    config::GroupConfig,
    event::{GroupEvent, TIMER_DELETE},
};
use crate::{
    error::{Result, TimerError},
    id::{GroupId, TimerId},
    notify::{handler, Handler, Notifier},
    presentation::MountPoint,
    timer::{Timer, TimerOptions},
};

/// Handle to a group of timers. Clones share the same group.
#[derive(Clone)]
pub struct TimerGroup {
    inner: Arc<GroupInner>,
}

pub(crate) struct GroupInner {
    id: GroupId,
    config: GroupConfig,
    mount: Option<MountPoint>,
    state: Mutex<GroupState>,
    events: Notifier<GroupEvent>,
}

#[derive(Default)]
struct GroupState {
    timers: Vec<Timer>,
    /// Always names a timer in `timers` when set.
    current: Option<TimerId>,
}

impl GroupState {
    fn position(&self, id: &TimerId) -> Option<usize> {
        self.timers.iter().position(|t| t.id() == id)
    }

    fn find(&self, id: &TimerId) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id() == id)
    }

    /// The explicit selection, or the sole timer when there is exactly one.
    fn resolve_current(&mut self) -> Option<TimerId> {
        match &self.current {
            Some(id) => Some(id.clone()),
            None if self.timers.len() == 1 => {
                let id = self.timers[0].id().clone();
                self.current = Some(id.clone());
                Some(id)
            }
            None => None,
        }
    }
}

impl TimerGroup {
    /// Create an empty group. A mount point is created when `render_ui` is on.
    pub fn new(config: GroupConfig) -> Self {
        let id = GroupId::generate();
        let mount = config
            .render_ui
            .then(|| MountPoint::new(&id, &config.mount_selector));

        let inner = Arc::new(GroupInner {
            id,
            config,
            mount,
            state: Mutex::new(GroupState::default()),
            events: Notifier::new(),
        });

        // Timers ask for their own deletion through this event.
        let weak = Arc::downgrade(&inner);
        inner.events.on(
            TIMER_DELETE,
            handler(move |event: &GroupEvent| {
                let (Some(inner), GroupEvent::DeleteRequested { timer }) = (weak.upgrade(), event)
                else {
                    return;
                };
                if let Err(e) = TimerGroup::from_inner(inner).delete_timer(Some(timer)) {
                    warn!("Failed to delete timer {} on request: {}", timer, e);
                }
            }),
        );

        info!(
            "Created timer group {} (ui={}, cleanup={})",
            inner.id, inner.config.render_ui, inner.config.cleanup_on_delete
        );
        Self { inner }
    }

    /// Create a timer in this group and make it the current selection.
    pub fn create_timer(&self, duration: &str, options: TimerOptions) -> Result<Timer> {
        let timer = Timer::try_new(duration, options.group(self))?;
        self.state().current = Some(timer.id().clone());

        self.publish(GroupEvent::Created {
            timer: timer.id().clone(),
        });
        self.publish(GroupEvent::Selected {
            timer: timer.id().clone(),
        });
        Ok(timer)
    }

    /// Put an existing standalone timer into this group.
    ///
    /// The timer is appended after the others. The selection does not change.
    /// Invalid, destroyed and already grouped timers are rejected.
    pub fn add(&self, timer: &Timer) -> Result<()> {
        timer.attach_group(self)?;
        self.register(timer.clone());
        info!("Added timer {} to group {}", timer.id(), self.inner.id);
        Ok(())
    }

    /// Remove a timer and release its presentation.
    ///
    /// With no target the current selection is deleted. Deleting the current
    /// timer selects the one before it, or nothing if it was first.
    pub fn delete_timer(&self, target: Option<&TimerId>) -> Result<Timer> {
        let (removed, current) = {
            let mut state = self.state();
            let id = match target {
                Some(id) => id.clone(),
                None => state.resolve_current().ok_or(TimerError::NoTimerSelected)?,
            };
            let index = state
                .position(&id)
                .ok_or_else(|| TimerError::TimerNotInGroup(id.to_string()))?;

            let removed = state.timers.remove(index);
            if state.current.as_ref() == Some(&id) {
                let previous = index.checked_sub(1).map(|prev| state.timers[prev].id().clone());
                state.current = previous;
            }
            (removed, state.current.clone())
        };

        removed.detach_group();
        removed.destroy();

        info!(
            "Deleted timer {} from group {}, current now {}",
            removed.id(),
            self.inner.id,
            current.as_ref().map_or("none", TimerId::as_str)
        );
        self.publish(GroupEvent::Deleted {
            timer: removed.id().clone(),
            current,
        });
        Ok(removed)
    }

    /// The timer operations act on when no explicit target is given.
    pub fn current_timer(&self) -> Option<Timer> {
        let mut state = self.state();
        let id = state.resolve_current()?;
        state.find(&id).cloned()
    }

    /// Like [`current_timer`](Self::current_timer), but an error when nothing is selected.
    pub fn require_current(&self) -> Result<Timer> {
        self.current_timer().ok_or(TimerError::NoTimerSelected)
    }

    /// Select the timer with `id`.
    pub fn set_current_timer(&self, id: &TimerId) -> Result<Timer> {
        let timer = {
            let mut state = self.state();
            let timer = state
                .find(id)
                .cloned()
                .ok_or_else(|| TimerError::TimerNotInGroup(id.to_string()))?;
            state.current = Some(id.clone());
            timer
        };

        debug!("Selected timer {} in group {}", id, self.inner.id);
        self.publish(GroupEvent::Selected { timer: id.clone() });
        Ok(timer)
    }

    /// All timers, in creation order.
    pub fn list_all(&self) -> Vec<Timer> {
        self.state().timers.clone()
    }

    pub fn len(&self) -> usize {
        self.state().timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().timers.is_empty()
    }

    pub fn get(&self, id: &TimerId) -> Option<Timer> {
        self.state().find(id).cloned()
    }

    /// Timer at `index` in creation order.
    pub fn timer_at(&self, index: usize) -> Option<Timer> {
        self.state().timers.get(index).cloned()
    }

    /// Look up a timer by its id string.
    pub fn find(&self, id: &str) -> Result<Timer> {
        let id = TimerId::parse(id)?;
        self.get(&id)
            .ok_or_else(|| TimerError::TimerNotInGroup(id.to_string()))
    }

    pub fn id(&self) -> &GroupId {
        &self.inner.id
    }

    pub fn config(&self) -> &GroupConfig {
        &self.inner.config
    }

    /// Shared rendering container, present when the group renders UI.
    pub fn mount(&self) -> Option<&MountPoint> {
        self.inner.mount.as_ref()
    }

    /// Current contents of the mount point.
    pub fn render(&self) -> Option<String> {
        self.inner.mount.as_ref().map(MountPoint::render)
    }

    /// Subscribe to a group event by name (see [`super::event`]).
    pub fn on(&self, event_name: &str, handler: Handler<GroupEvent>) {
        self.inner.events.on(event_name, handler);
    }

    pub fn off(&self, event_name: &str, handler: &Handler<GroupEvent>) {
        self.inner.events.off(event_name, handler);
    }

    pub(crate) fn register(&self, timer: Timer) {
        debug!("Registering timer {} in group {}", timer.id(), self.inner.id);
        self.state().timers.push(timer);
    }

    pub(crate) fn request_delete(&self, id: &TimerId) {
        debug!("Timer {} requested deletion from group {}", id, self.inner.id);
        self.publish(GroupEvent::DeleteRequested { timer: id.clone() });
    }

    pub(crate) fn downgrade(&self) -> Weak<GroupInner> {
        Arc::downgrade(&self.inner)
    }

    pub(crate) fn from_inner(inner: Arc<GroupInner>) -> Self {
        Self { inner }
    }

    fn publish(&self, event: GroupEvent) {
        self.inner.events.trigger(event.name(), &event);
    }

    fn state(&self) -> MutexGuard<'_, GroupState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TimerGroup {
    fn default() -> Self {
        Self::new(GroupConfig::default())
    }
}

impl PartialEq for TimerGroup {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for TimerGroup {}

impl fmt::Debug for TimerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("TimerGroup")
            .field("id", &self.inner.id)
            .field("config", &self.inner.config)
            .field("timers", &state.timers.iter().map(Timer::id).collect::<Vec<_>>())
            .field("current", &state.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        group::event::{TIMER_CREATED, TIMER_DELETED, TIMER_SELECTED},
        testing::Recorder,
        timer::TimerStatus,
    };

    fn group_of(n: usize) -> (TimerGroup, Vec<Timer>) {
        let group = TimerGroup::default();
        let timers = (0..n)
            .map(|i| {
                group
                    .create_timer("1:00", TimerOptions::new().label(format!("t{i}")))
                    .unwrap()
            })
            .collect();
        (group, timers)
    }

    #[test]
    fn create_timer_appends_and_selects() {
        let (group, timers) = group_of(3);

        assert_eq!(group.list_all(), timers);
        assert_eq!(group.current_timer(), Some(timers[2].clone()));
        assert_eq!(group.timer_at(1), Some(timers[1].clone()));
        assert_eq!(timers[0].group(), Some(group.clone()));
    }

    #[test]
    fn create_timer_surfaces_invalid_duration() {
        let group = TimerGroup::default();

        let err = group.create_timer("1:75", TimerOptions::new()).unwrap_err();

        assert_eq!(err, TimerError::InvalidDurationFormat("1:75".to_string()));
        assert!(group.is_empty());
        assert!(group.current_timer().is_none());
    }

    #[test]
    fn sole_timer_is_selected_implicitly() {
        let group = TimerGroup::default();
        let timer = Timer::new("0:30", TimerOptions::new().group(&group));

        assert_eq!(group.len(), 1);
        assert_eq!(group.current_timer(), Some(timer));
    }

    #[test]
    fn invalid_standalone_timer_is_not_registered() {
        let group = TimerGroup::default();
        let timer = Timer::new("bogus", TimerOptions::new().group(&group));

        assert_eq!(timer.status(), TimerStatus::Invalid);
        assert!(group.is_empty());
    }

    #[test]
    fn deleting_only_timer_clears_selection() {
        let (group, timers) = group_of(1);

        let removed = group.delete_timer(None).unwrap();

        assert_eq!(removed, timers[0]);
        assert!(group.is_empty());
        assert!(group.current_timer().is_none());
        assert_eq!(group.delete_timer(None).unwrap_err(), TimerError::NoTimerSelected);
    }

    #[test]
    fn deleting_current_selects_predecessor() {
        let (group, timers) = group_of(3);

        group.delete_timer(None).unwrap();
        assert_eq!(group.current_timer(), Some(timers[1].clone()));

        group.delete_timer(Some(timers[1].id())).unwrap();
        assert_eq!(group.current_timer(), Some(timers[0].clone()));
    }

    #[test]
    fn deleting_middle_current_selects_predecessor_not_successor() {
        let (group, timers) = group_of(3);
        group.set_current_timer(timers[1].id()).unwrap();

        group.delete_timer(None).unwrap();

        assert_eq!(group.current_timer(), Some(timers[0].clone()));
        assert_eq!(group.list_all(), vec![timers[0].clone(), timers[2].clone()]);
    }

    #[test]
    fn add_adopts_standalone_timer() {
        let group = TimerGroup::new(GroupConfig::with_ui("timers"));
        let first = group.create_timer("1:00", TimerOptions::new().label("first")).unwrap();
        let loose = Timer::new("0:30", TimerOptions::new().label("loose").render_ui(true));
        assert!(loose.group().is_none());

        group.add(&loose).unwrap();

        assert_eq!(group.list_all(), vec![first.clone(), loose.clone()]);
        assert_eq!(group.current_timer(), Some(first));
        assert_eq!(loose.group(), Some(group.clone()));
        assert_eq!(group.mount().unwrap().len(), 2);
        let canvas = group.render().unwrap();
        assert!(canvas.lines().nth(1).unwrap().starts_with("loose ["));
    }

    #[test]
    fn add_rejects_grouped_invalid_and_destroyed_timers() {
        let group = TimerGroup::default();
        let other = TimerGroup::default();
        let owned = group.create_timer("1:00", TimerOptions::new()).unwrap();

        assert_eq!(other.add(&owned), Err(TimerError::AlreadyGrouped(owned.id().clone())));
        assert_eq!(group.add(&owned), Err(TimerError::AlreadyGrouped(owned.id().clone())));
        assert_eq!(group.len(), 1);

        let invalid = Timer::new("99:99", TimerOptions::new());
        assert_eq!(other.add(&invalid), Err(TimerError::InvalidTimer(invalid.id().clone())));

        let destroyed = Timer::new("1:00", TimerOptions::new());
        destroyed.destroy();
        assert_eq!(other.add(&destroyed), Err(TimerError::TimerInactive(destroyed.id().clone())));

        assert!(other.is_empty());
        assert_eq!(owned.group(), Some(group));
    }

    #[test]
    fn deleting_first_current_leaves_nothing_selected() {
        let (group, timers) = group_of(3);
        group.set_current_timer(timers[0].id()).unwrap();

        group.delete_timer(None).unwrap();

        assert_eq!(group.len(), 2);
        assert!(group.current_timer().is_none());
        assert_eq!(group.require_current().unwrap_err(), TimerError::NoTimerSelected);
    }

    #[test]
    fn deleting_other_timer_keeps_selection() {
        let (group, timers) = group_of(3);

        group.delete_timer(Some(timers[0].id())).unwrap();

        assert_eq!(group.current_timer(), Some(timers[2].clone()));
    }

    #[test]
    fn deleted_timer_is_destroyed_and_detached() {
        let (group, timers) = group_of(2);

        group.delete_timer(Some(timers[1].id())).unwrap();

        assert!(timers[1].is_destroyed());
        assert!(timers[1].group().is_none());
        assert_eq!(
            group.delete_timer(Some(timers[1].id())).unwrap_err(),
            TimerError::TimerNotInGroup(timers[1].id().to_string())
        );
    }

    #[test]
    fn selecting_foreign_timer_is_rejected() {
        let (group, _) = group_of(1);
        let (_, others) = group_of(1);

        let err = group.set_current_timer(others[0].id()).unwrap_err();

        assert_eq!(err, TimerError::TimerNotInGroup(others[0].id().to_string()));
    }

    #[test]
    fn find_rejects_non_timer_ids() {
        let (group, timers) = group_of(1);

        assert_eq!(group.find(timers[0].id().as_str()).unwrap(), timers[0]);
        assert!(matches!(
            group.find(group.id().as_str()),
            Err(TimerError::NotAnInstance { expected: "timer", .. })
        ));
    }

    #[test]
    fn timer_can_request_its_own_deletion() {
        let (group, timers) = group_of(2);

        timers[1].request_delete().unwrap();

        assert_eq!(group.list_all(), vec![timers[0].clone()]);
        assert_eq!(group.current_timer(), Some(timers[0].clone()));
        assert!(timers[1].is_destroyed());
    }

    #[test]
    fn siblings_exclude_self() {
        let (_group, timers) = group_of(3);

        assert_eq!(timers[1].siblings(), vec![timers[0].clone(), timers[2].clone()]);
    }

    #[test]
    fn ui_group_renders_rows_into_mount() {
        let group = TimerGroup::new(GroupConfig::with_ui("wrapper"));
        let a = group.create_timer("1:00", TimerOptions::new().label("a")).unwrap();
        group.create_timer("2:00", TimerOptions::new().label("b")).unwrap();

        let mount = group.mount().unwrap();
        assert_eq!(mount.selector(), "wrapper");
        assert_eq!(mount.id(), format!("{}-wrapper", group.id()));
        assert_eq!(mount.len(), 2);
        assert!(group.render().unwrap().starts_with("a ["));

        group.delete_timer(Some(a.id())).unwrap();
        assert_eq!(mount.len(), 1);
        assert!(group.render().unwrap().starts_with("b ["));
    }

    #[test]
    fn headless_group_has_no_mount() {
        let (group, _) = group_of(1);
        assert!(group.mount().is_none());
        assert!(group.render().is_none());
    }

    #[test]
    fn ui_group_injects_custom_presentation() {
        let group = TimerGroup::new(GroupConfig::with_ui("wrapper"));
        let recorder = Recorder::default();

        let timer = group
            .create_timer("1:00", TimerOptions::new().presentation(recorder.clone()))
            .unwrap();
        group.delete_timer(Some(timer.id())).unwrap();

        assert_eq!(recorder.calls(), vec!["generate", "inject", "update", "destroy"]);
    }

    #[test]
    fn cleanup_releases_presentation_when_stopped() {
        let group = TimerGroup::new(GroupConfig::with_ui("wrapper").cleanup_on_delete(true));
        let timer = group.create_timer("1:00", TimerOptions::new()).unwrap();
        assert_eq!(group.mount().unwrap().len(), 1);

        timer.stop();

        assert!(group.mount().unwrap().is_empty());
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn publishes_group_events() {
        let group = TimerGroup::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for name in [TIMER_CREATED, TIMER_SELECTED, TIMER_DELETED] {
            let sink = Arc::clone(&seen);
            group.on(
                name,
                handler(move |event: &GroupEvent| sink.lock().unwrap().push(event.name())),
            );
        }

        group.create_timer("1:00", TimerOptions::new()).unwrap();
        group.delete_timer(None).unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![TIMER_CREATED, TIMER_SELECTED, TIMER_DELETED]
        );
    }
}
