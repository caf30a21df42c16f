//! Observers receive [`ReactionEvent`]s from the catalog builder and services

use parking_lot::Mutex;

use super::ReactionEvent;

/// Sink for reaction events
pub trait ReactionObserver: Send + Sync {
    fn observe(&self, event: ReactionEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ReactionObserver for NoopObserver {
    fn observe(&self, _event: ReactionEvent) {}
}

/// Stores every event in arrival order
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<ReactionEvent>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far
    pub fn events(&self) -> Vec<ReactionEvent> {
        self.events.lock().clone()
    }

    /// Drain all stored events
    pub fn take(&self) -> Vec<ReactionEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Count events of the given type
    pub fn count(&self, event_type: &str) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| e.event_type() == event_type)
            .count()
    }
}

impl ReactionObserver for CollectingObserver {
    fn observe(&self, event: ReactionEvent) {
        self.events.lock().push(event);
    }
}

impl<T: ReactionObserver + ?Sized> ReactionObserver for std::sync::Arc<T> {
    fn observe(&self, event: ReactionEvent) {
        (**self).observe(event);
    }
}
