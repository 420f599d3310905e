// ─── Change Notification ───
// Append-only observer lists with snapshot-then-deliver semantics.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::warn;

/// Observer callback receiving the event source.
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Thread-safe list of observers for one kind of event.
///
/// Delivery works on a copy taken at fire time, so observers may register
/// new observers while being notified; those only see later events. A
/// panicking observer is logged and skipped.
pub struct ListenerList<E: ?Sized> {
    label: &'static str,
    listeners: Mutex<Vec<Arc<dyn Fn(&E) + Send + Sync>>>,
}

impl<E: ?Sized> ListenerList<E> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn add(&self, listener: Arc<dyn Fn(&E) + Send + Sync>) {
        self.lock().push(listener);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Notify every registered observer in registration order.
    ///
    /// Returns the number of observers that panicked.
    pub fn fire(&self, event: &E) -> usize {
        let snapshot: Vec<Arc<dyn Fn(&E) + Send + Sync>> = self.lock().clone();
        let mut failures = 0;

        for listener in snapshot {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                failures += 1;
                warn!("A '{}' listener panicked; continuing with the rest", self.label);
            }
        }

        failures
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<dyn Fn(&E) + Send + Sync>>> {
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<E: ?Sized> std::fmt::Debug for ListenerList<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerList")
            .field("label", &self.label)
            .field("listeners", &self.len())
            .finish()
    }
}
