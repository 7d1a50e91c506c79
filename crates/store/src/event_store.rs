//! Store abstraction: owner-scoped queries and client-driven mutations.

use async_trait::async_trait;
use chrono::NaiveDate;

use fiesta_core::{AppResult, EventId, Username};
use fiesta_events::{Event, EventUpdate, NewEvent};

use crate::change::ChangeFeed;

/// Conjunctive query filters; an absent filter means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Case-insensitive prefix match on the event name.
    pub name_prefix: Option<String>,
    /// Events on exactly this date.
    pub exact_date: Option<NaiveDate>,
    /// Events on or after this date (the "hide past events" control).
    pub min_date: Option<NaiveDate>,
}

impl EventFilter {
    /// Whether `event` passes every active constraint.
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(prefix) = &self.name_prefix {
            if !event
                .name
                .to_lowercase()
                .starts_with(&prefix.to_lowercase())
            {
                return false;
            }
        }
        if let Some(date) = self.exact_date {
            if event.date != date {
                return false;
            }
        }
        if let Some(date) = self.min_date {
            if event.date < date {
                return false;
            }
        }
        true
    }
}

/// Remote persistence boundary for event records.
///
/// The hosted store is the system of record; this trait is the full
/// capability surface the application needs from it. Row-level auth on the
/// hosted side scopes every call to the signed-in user, but the owner is
/// still passed explicitly so no implementation has to depend on it.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// All events owned by `owner` that pass `filter`, in store order.
    async fn query(&self, owner: &Username, filter: &EventFilter) -> AppResult<Vec<Event>>;

    /// Persist a new event; the store assigns the row id.
    async fn insert(&self, event: NewEvent) -> AppResult<Event>;

    /// Replace the mutable fields of an existing event.
    async fn update(&self, id: EventId, changes: EventUpdate) -> AppResult<()>;

    /// Destroy an event record. Deleting a row that is already gone is a
    /// no-op, matching the hosted store.
    async fn delete(&self, id: EventId) -> AppResult<()>;

    /// A feed of opaque change notices; on every notice the correct
    /// response is to re-run the current query.
    fn subscribe_to_changes(&self) -> ChangeFeed;
}
