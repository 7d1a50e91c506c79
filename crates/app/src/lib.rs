//! `fiesta-app` — view models for the event planner.
//!
//! **Responsibility:** the state each screen owns and the operations it
//! runs against the store and the session. Views receive their
//! collaborators explicitly at construction; there is no ambient global
//! state, and every view's state is owned exclusively by that view.
//!
//! Error discipline (applies to every view): a remote failure abandons the
//! operation and keeps the previous state; malformed remote data clears to
//! an empty state; both surface as transient notices. Nothing retries.

pub mod composer;
pub mod config;
pub mod context;
pub mod daily;
pub mod editor;
pub mod events_view;
pub mod notice;
pub mod watch;

pub use composer::EventComposer;
pub use config::AppConfig;
pub use context::AppContext;
pub use daily::DailySummaryView;
pub use editor::EventEditor;
pub use events_view::EventsView;
pub use notice::{Notice, NoticeKind};
pub use watch::watch_changes;
