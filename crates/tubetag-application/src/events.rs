// SPDX-License-Identifier: GPL-3.0-or-later
use std::sync::{Arc, Mutex};

use tubetag_domain::ItemRetagged;

/// Sink for `item.retagged` notifications. The registry publishes one per
/// item it changed; the host decides what happens to them afterwards.
pub trait EventPublisher: Send + Sync {
    fn publish(&self, event: ItemRetagged);
}

/// In-memory bus keeping every retag event of the current run. The batch
/// runner drains it at end of run for its summary.
#[derive(Clone, Default)]
pub struct InMemoryEventBus {
    captured: Arc<Mutex<Vec<ItemRetagged>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.captured.lock().expect("event bus lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Retrieve and clear all captured events
    pub fn drain(&self) -> Vec<ItemRetagged> {
        let mut guard = self.captured.lock().expect("event bus lock");
        std::mem::take(&mut *guard)
    }
}

impl EventPublisher for InMemoryEventBus {
    fn publish(&self, event: ItemRetagged) {
        self.captured
            .lock()
            .expect("event bus lock")
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubetag_domain::{DomainEvent, ImportItem, ItemRetaggedPayload};

    #[test]
    fn publish_and_drain_events() {
        let bus = InMemoryEventBus::new();
        assert!(bus.is_empty());

        let item = ImportItem::new("music/Artist/Album/Song (Official Video).mp3");
        let payload = ItemRetaggedPayload {
            item_id: item.id,
            path: item.path.clone(),
            title: "Song".to_string(),
            album: "Album".to_string(),
            artist: "Artist".to_string(),
        };
        bus.publish(DomainEvent::new("item.retagged", payload));
        assert_eq!(bus.len(), 1);

        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].name, "item.retagged");
        assert_eq!(drained[0].payload.item_id, item.id);
        assert_eq!(drained[0].payload.title, "Song");
        assert!(bus.is_empty());
    }
}
