//! In-memory store for tests and development.

use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::broadcast;

use fiesta_core::{AppError, AppResult, EventId, Username};
use fiesta_events::{Event, EventUpdate, NewEvent};

use crate::change::{ChangeFeed, StoreChange};
use crate::event_store::{EventFilter, EventStore};

const CHANGE_CAPACITY: usize = 16;

/// In-memory `EventStore` with the same observable semantics as the hosted
/// one: conjunctive filters, store-assigned ids, and a change notice on
/// every mutation.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryEventStore {
    rows: RwLock<Vec<Event>>,
    next_id: AtomicI64,
    changes: broadcast::Sender<StoreChange>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a stored row directly, bypassing insert (test setup).
    pub fn seed(&self, event: Event) {
        if let Ok(mut rows) = self.rows.write() {
            rows.push(event);
        }
    }

    fn notify(&self) {
        // No receivers is fine; the feed is best-effort.
        let _ = self.changes.send(StoreChange);
    }
}

impl Default for InMemoryEventStore {
    fn default() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
            changes,
        }
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn query(&self, owner: &Username, filter: &EventFilter) -> AppResult<Vec<Event>> {
        let rows = self
            .rows
            .read()
            .map_err(|_| AppError::remote("store lock poisoned"))?;
        Ok(rows
            .iter()
            .filter(|event| event.username == *owner && filter.matches(event))
            .cloned()
            .collect())
    }

    async fn insert(&self, event: NewEvent) -> AppResult<Event> {
        let id = EventId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let stored = Event {
            id,
            name: event.name,
            address: event.address,
            date: event.date.date_naive(),
            event_type: event.event_type,
            material: event.material,
            username: event.username,
        };

        {
            let mut rows = self
                .rows
                .write()
                .map_err(|_| AppError::remote("store lock poisoned"))?;
            rows.push(stored.clone());
        }

        self.notify();
        Ok(stored)
    }

    async fn update(&self, id: EventId, changes: EventUpdate) -> AppResult<()> {
        {
            let mut rows = self
                .rows
                .write()
                .map_err(|_| AppError::remote("store lock poisoned"))?;
            let row = rows
                .iter_mut()
                .find(|event| event.id == id)
                .ok_or_else(|| AppError::remote(format!("no event with id {id}")))?;

            row.name = changes.name;
            row.address = changes.address;
            row.date = changes.date.date_naive();
            row.event_type = changes.event_type;
            row.material = changes.material;
        }

        self.notify();
        Ok(())
    }

    async fn delete(&self, id: EventId) -> AppResult<()> {
        let removed = {
            let mut rows = self
                .rows
                .write()
                .map_err(|_| AppError::remote("store lock poisoned"))?;
            let before = rows.len();
            rows.retain(|event| event.id != id);
            rows.len() < before
        };

        if removed {
            self.notify();
        }
        Ok(())
    }

    fn subscribe_to_changes(&self) -> ChangeFeed {
        ChangeFeed::new(self.changes.subscribe())
    }
}
