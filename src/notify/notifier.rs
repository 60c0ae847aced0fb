//! Named-event publish/subscribe component shared by timers and groups

use std::{
    collections::HashMap,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Mutex, PoisonError},
};
use tracing::error;

/// A subscribed callback. Identity (for `off`) is the `Arc` allocation.
pub type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Wrap a closure into a [`Handler`].
pub fn handler<E, F>(f: F) -> Handler<E>
where
    F: Fn(&E) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Maps event names to handlers, kept in subscription order.
///
/// Handlers are invoked outside the internal lock, so a handler may subscribe,
/// unsubscribe or publish on the same notifier. A handler that panics is
/// logged and skipped; the remaining handlers for that event still run.
pub struct Notifier<E> {
    handlers: Mutex<HashMap<String, Vec<Handler<E>>>>,
}

impl<E> Notifier<E> {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(HashMap::new()),
        }
    }

    /// Subscribe `handler` to `event_name`.
    pub fn on(&self, event_name: &str, handler: Handler<E>) {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event_name.to_string())
            .or_default()
            .push(handler);
    }

    /// Remove every registration of `handler` for `event_name`.
    pub fn off(&self, event_name: &str, handler: &Handler<E>) {
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(list) = handlers.get_mut(event_name) {
            list.retain(|h| !Arc::ptr_eq(h, handler));
            if list.is_empty() {
                handlers.remove(event_name);
            }
        }
    }

    /// Invoke every handler registered for `event_name`, in subscription order.
    pub fn trigger(&self, event_name: &str, event: &E) {
        let snapshot: Vec<Handler<E>> = match self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event_name)
        {
            Some(list) => list.clone(),
            None => return,
        };

        for handler in snapshot {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| handler(event))) {
                error!(
                    "Handler for '{}' panicked: {}",
                    event_name,
                    panic_message(payload.as_ref())
                );
            }
        }
    }

    /// Number of handlers currently registered for `event_name`.
    pub fn handler_count(&self, event_name: &str) -> usize {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event_name)
            .map_or(0, Vec::len)
    }
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        let counts: HashMap<&str, usize> = handlers
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();
        f.debug_struct("Notifier").field("handlers", &counts).finish()
    }
}

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
