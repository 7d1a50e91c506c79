//! `fiesta-store` — the event store boundary.
//!
//! **Responsibility:** everything between the domain model and the hosted
//! backend: the `EventStore` abstraction, schema-validated decoding of wire
//! payloads, the HTTP client for the hosted store and its change feed, and
//! an in-memory implementation for tests and development.
//!
//! The hosted store is the system of record; this crate never caches or
//! merges. Callers re-query and replace.

pub mod change;
pub mod decode;
pub mod event_store;
pub mod memory;
pub mod remote;

pub use change::{ChangeFeed, StoreChange};
pub use decode::{decode_event, decode_events};
pub use event_store::{EventFilter, EventStore};
pub use memory::InMemoryEventStore;
pub use remote::RemoteEventStore;
