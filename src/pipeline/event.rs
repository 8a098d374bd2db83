//! Change notifications for preview observers.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::PipelineState;
use crate::fault::FaultEntry;

/// Something observable changed on the preview surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewEvent {
    /// The file set was replaced.
    FilesChanged {
        /// Number of files in the new set.
        count: usize,
    },
    /// The pipeline moved between states.
    StateChanged {
        /// Previous state.
        from: PipelineState,
        /// New state.
        to: PipelineState,
    },
    /// The fault log was emptied for a new render attempt.
    FaultsCleared,
    /// A fault was appended to the log.
    FaultAppended {
        /// The appended entry.
        entry: FaultEntry,
        /// Log length after the append.
        total: usize,
    },
}

type Observer = Arc<dyn Fn(&PreviewEvent) + Send + Sync>;

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
struct Registry {
    next: u64,
    entries: Vec<(ObserverId, Observer)>,
}

/// Shared observer list, cloned into the fault bridge so out-of-band
/// appends notify the same subscribers.
///
/// Callbacks run without the list locked, so an observer may subscribe or
/// unsubscribe from inside a notification. Such changes take effect from
/// the next event.
#[derive(Clone, Default)]
pub struct Observers {
    inner: Arc<RwLock<Registry>>,
}

impl Observers {
    /// Create an empty observer list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.
    pub fn subscribe(&self, observer: impl Fn(&PreviewEvent) + Send + Sync + 'static) -> ObserverId {
        let observer: Observer = Arc::new(observer);
        let mut registry = self.inner.write();
        let id = ObserverId(registry.next);
        registry.next += 1;
        registry.entries.push((id, observer));
        id
    }

    /// Remove an observer. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut registry = self.inner.write();
        let before = registry.entries.len();
        registry.entries.retain(|(entry, _)| *entry != id);
        registry.entries.len() != before
    }

    /// Deliver `event` to every observer in registration order.
    pub fn notify(&self, event: &PreviewEvent) {
        let snapshot: Vec<Observer> = self
            .inner
            .read()
            .entries
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in snapshot {
            observer(event);
        }
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Check if no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_notify_in_order() {
        let observers = Observers::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for id in 0..2 {
            let seen = Arc::clone(&seen);
            observers.subscribe(move |event| {
                if let PreviewEvent::FilesChanged { count } = event {
                    seen.lock().push((id, *count));
                }
            });
        }

        observers.notify(&PreviewEvent::FilesChanged { count: 3 });
        assert_eq!(*seen.lock(), [(0, 3), (1, 3)]);
        assert_eq!(observers.len(), 2);
    }

    #[test]
    fn test_subscribe_from_inside_callback() {
        let observers = Observers::new();
        let registry = observers.clone();
        observers.subscribe(move |event| {
            if *event == PreviewEvent::FaultsCleared {
                registry.subscribe(|_| {});
            }
        });

        observers.notify(&PreviewEvent::FaultsCleared);
        assert_eq!(observers.len(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let observers = Observers::new();
        let hits = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&hits);
        let id = observers.subscribe(move |_| *sink.lock() += 1);

        observers.notify(&PreviewEvent::FaultsCleared);
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify(&PreviewEvent::FaultsCleared);

        assert_eq!(*hits.lock(), 1);
        assert!(observers.is_empty());
    }

    #[test]
    fn test_unsubscribe_self_during_notify() {
        let observers = Observers::new();
        let registry = observers.clone();
        let own_id = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&own_id);
        let id = observers.subscribe(move |_| {
            if let Some(id) = *slot.lock() {
                registry.unsubscribe(id);
            }
        });
        *own_id.lock() = Some(id);

        observers.notify(&PreviewEvent::FaultsCleared);
        assert!(observers.is_empty());
    }
}
