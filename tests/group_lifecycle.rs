//! End-to-end group behavior driven through the public API with paused time.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::time::sleep;

use countdown_timers::{
    group::event::{TIMER_CREATED, TIMER_DELETED, TIMER_SELECTED},
    notify::handler,
    presentation::{Headless, TracingPresentation},
    GroupConfig, GroupEvent, TimerError, TimerEvent, TimerEventKind, TimerGroup, TimerOptions,
    TimerStatus,
};

fn fast() -> TimerOptions {
    TimerOptions::new().interval(Duration::from_millis(100))
}

fn record_group_events(group: &TimerGroup) -> Arc<Mutex<Vec<&'static str>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    for name in [TIMER_CREATED, TIMER_SELECTED, TIMER_DELETED] {
        let seen = Arc::clone(&seen);
        group.on(
            name,
            handler(move |event: &GroupEvent| seen.lock().unwrap().push(event.name())),
        );
    }
    seen
}

#[tokio::test(start_paused = true)]
async fn two_timers_share_one_mount() {
    let group = TimerGroup::new(GroupConfig::with_ui("kitchen"));
    let events = record_group_events(&group);

    let tea = group.create_timer("0:02", fast().label("tea")).unwrap();
    let eggs = group.create_timer("0:05", fast().label("eggs")).unwrap();
    assert_eq!(group.current_timer(), Some(eggs.clone()));
    assert_eq!(group.mount().unwrap().len(), 2);

    let finished = Arc::new(Mutex::new(Vec::new()));
    for timer in [&tea, &eggs] {
        let finished = Arc::clone(&finished);
        timer.on(
            TimerEventKind::Done,
            handler(move |event: &TimerEvent| {
                finished.lock().unwrap().push(event.timer.name().to_string())
            }),
        );
    }

    tea.start().unwrap();
    eggs.start().unwrap();
    sleep(Duration::from_millis(2_050)).await;

    assert_eq!(tea.status(), TimerStatus::Ended);
    assert!(eggs.is_running());
    assert_eq!(*finished.lock().unwrap(), vec!["tea"]);

    let canvas = group.render().unwrap();
    let lines: Vec<&str> = canvas.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("tea ["));
    assert!(lines[0].ends_with("(done)"));
    assert!(lines[1].starts_with("eggs ["));

    sleep(Duration::from_millis(3_000)).await;
    assert!(eggs.is_ended());
    assert_eq!(*finished.lock().unwrap(), vec!["tea", "eggs"]);

    assert_eq!(
        *events.lock().unwrap(),
        vec![TIMER_CREATED, TIMER_SELECTED, TIMER_CREATED, TIMER_SELECTED]
    );
}

#[tokio::test(start_paused = true)]
async fn timer_requests_its_own_deletion() {
    let group = TimerGroup::new(GroupConfig::with_ui("timers"));
    let events = record_group_events(&group);
    let first = group.create_timer("1:00", fast()).unwrap();
    let second = group.create_timer("1:00", fast()).unwrap();
    second.start().unwrap();

    second.request_delete().unwrap();

    assert_eq!(group.list_all(), vec![first.clone()]);
    assert_eq!(group.current_timer(), Some(first));
    assert!(second.is_destroyed());
    assert!(second.group().is_none());
    assert_eq!(group.mount().unwrap().len(), 1);
    assert_eq!(events.lock().unwrap().last(), Some(&TIMER_DELETED));

    // Destroyed and detached: no more ticks, no group to ask.
    sleep(Duration::from_secs(2)).await;
    assert_eq!(second.current_ms(), 60_000);
    assert_eq!(second.request_delete(), Err(TimerError::NoGroup(second.id().clone())));
}

#[tokio::test(start_paused = true)]
async fn selection_follows_deletes() {
    let group = TimerGroup::default();
    let a = group.create_timer("0:10", fast()).unwrap();
    let b = group.create_timer("0:20", fast()).unwrap();

    group.set_current_timer(a.id()).unwrap();
    group.delete_timer(None).unwrap();
    assert_eq!(group.current_timer(), None);
    assert_eq!(group.require_current(), Err(TimerError::NoTimerSelected));

    assert_eq!(group.delete_timer(Some(a.id())), Err(TimerError::TimerNotInGroup(a.id().to_string())));
    assert_eq!(group.find(b.id().as_str()), Ok(b.clone()));
    assert!(matches!(group.find("nope"), Err(TimerError::NotAnInstance { .. })));
}

#[tokio::test(start_paused = true)]
async fn cleanup_releases_bars_on_completion() {
    let group = TimerGroup::new(GroupConfig::with_ui("timers").cleanup_on_delete(true));
    let quick = group.create_timer("0:01", fast()).unwrap();
    let _slow = group.create_timer("0:30", fast()).unwrap();
    assert_eq!(group.mount().unwrap().len(), 2);

    quick.start().unwrap();
    sleep(Duration::from_millis(1_050)).await;

    assert!(quick.is_ended());
    assert_eq!(group.mount().unwrap().len(), 1);
    assert_eq!(group.list_all().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn custom_presentations_replace_the_bar() {
    let group = TimerGroup::new(GroupConfig::with_ui("timers"));
    let quiet = group
        .create_timer("0:01", fast().presentation(Headless))
        .unwrap();
    let traced = group
        .create_timer("0:01", fast().presentation(TracingPresentation::new()))
        .unwrap();

    // Neither strategy draws into the mount.
    assert!(group.mount().unwrap().is_empty());

    quiet.start().unwrap();
    traced.start().unwrap();
    traced.pause();
    traced.start().unwrap();
    sleep(Duration::from_millis(1_050)).await;

    assert!(quiet.is_ended());
    assert!(traced.is_ended());
    assert_eq!(group.render().as_deref(), Some(""));
}
