//! Shared helpers for unit tests

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use crate::{
    notify::handler,
    presentation::{MountPoint, Presentation},
    timer::{Timer, TimerEvent, TimerEventKind, TimerSnapshot},
};

/// Presentation that records which hooks ran.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<&'static str>>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, hook: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == hook).count()
    }

    fn push(&self, hook: &'static str) {
        self.calls.lock().unwrap().push(hook);
    }
}

impl Presentation for Recorder {
    fn generate(&mut self, _timer: &TimerSnapshot) {
        self.push("generate");
    }

    fn inject(&mut self, _mount: &MountPoint) {
        self.push("inject");
    }

    fn update(&mut self, _timer: &TimerSnapshot) {
        self.push("update");
    }

    fn reset(&mut self, _timer: &TimerSnapshot) {
        self.push("reset");
    }

    fn pause(&mut self, _timer: &TimerSnapshot) {
        self.push("pause");
    }

    fn stop(&mut self, _timer: &TimerSnapshot) {
        self.push("stop");
    }

    fn done(&mut self, _timer: &TimerSnapshot) {
        self.push("done");
    }

    fn destroy(&mut self) {
        self.push("destroy");
    }
}

/// Count how often `kind` is published by `timer`.
pub fn count_events(timer: &Timer, kind: TimerEventKind) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    timer.on(
        kind,
        handler(move |_: &TimerEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );
    count
}
