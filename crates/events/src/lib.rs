//! `fiesta-events` — the event-planning domain model.
//!
//! **Responsibility:** validated event and material records, form drafts and
//! their validation, the material aggregation core (line totals, event
//! totals, daily merges), and the write-side timezone adjustment.
//!
//! Everything in this crate is pure and synchronous; IO lives in
//! `fiesta-store`.

pub mod draft;
pub mod event;
pub mod material;
pub mod schedule;
pub mod totals;

pub use draft::{EventDraft, MaterialDraft, ValidatedEvent};
pub use event::{Event, EventType, EventUpdate, NewEvent};
pub use material::Material;
pub use schedule::{adjust_for_timezone, local_utc_offset_minutes, write_moment};
pub use totals::{DailySummary, LineItem, event_total, line_total, merge_materials};
