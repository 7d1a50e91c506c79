//! The event listing: live filters over the signed-in user's events.

use chrono::NaiveDate;

use fiesta_core::{AppError, EventId};
use fiesta_events::Event;
use fiesta_session::SessionProvider;
use fiesta_store::{EventFilter, EventStore};

use crate::context::AppContext;
use crate::notice::Notice;

/// Listing state: the current filter controls and the last result set.
///
/// Refreshes replace the list wholesale: whichever fetch completes last
/// wins, and results are never merged into what is already displayed.
#[derive(Debug, Default)]
pub struct EventsView {
    name_filter: Option<String>,
    date_filter: Option<NaiveDate>,
    upcoming_only: bool,
    events: Vec<Event>,
    notices: Vec<Notice>,
}

impl EventsView {
    /// Fresh listing; past events start hidden.
    pub fn new() -> Self {
        Self {
            upcoming_only: true,
            ..Self::default()
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Live name search. Whitespace-only input clears the filter.
    pub fn set_name_filter(&mut self, raw: &str) {
        let trimmed = raw.trim();
        self.name_filter = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn set_date_filter(&mut self, date: Option<NaiveDate>) {
        self.date_filter = date;
    }

    pub fn upcoming_only(&self) -> bool {
        self.upcoming_only
    }

    pub fn set_upcoming_only(&mut self, upcoming_only: bool) {
        self.upcoming_only = upcoming_only;
    }

    /// The store filter for the current controls; constraints combine
    /// conjunctively.
    pub fn filter(&self, today: NaiveDate) -> EventFilter {
        EventFilter {
            name_prefix: self.name_filter.clone(),
            exact_date: self.date_filter,
            min_date: self.upcoming_only.then_some(today),
        }
    }

    /// Re-run the current query and replace the list with the outcome.
    ///
    /// A remote failure abandons the refresh and keeps the previous list;
    /// malformed data clears it rather than rendering a partial set.
    pub async fn refresh<S, P>(&mut self, ctx: &AppContext<S, P>, today: NaiveDate)
    where
        S: EventStore,
        P: SessionProvider,
    {
        let user = match ctx.require_user().await {
            Ok(user) => user,
            Err(err) => {
                self.events.clear();
                self.notices.push(Notice::error("Not signed in", err.to_string()));
                return;
            }
        };

        match ctx.store.query(&user.username, &self.filter(today)).await {
            Ok(events) => {
                tracing::debug!(count = events.len(), "event listing refreshed");
                self.events = events;
            }
            Err(err @ AppError::Decode(_)) => {
                tracing::warn!(error = %err, "discarding undecodable event listing");
                self.events.clear();
                self.notices.push(Notice::error("Could not read events", err.to_string()));
            }
            Err(err) => {
                tracing::warn!(error = %err, "event listing refresh failed");
                self.notices.push(Notice::error("Could not load events", err.to_string()));
            }
        }
    }

    /// Explicit delete. The listing itself is not touched here; the
    /// follow-up change notice triggers the re-query.
    pub async fn delete<S, P>(&mut self, ctx: &AppContext<S, P>, id: EventId, name: &str)
    where
        S: EventStore,
        P: SessionProvider,
    {
        match ctx.store.delete(id).await {
            Ok(()) => {
                self.notices.push(Notice::info(
                    "Successfully deleted event",
                    format!("Deleted {name}"),
                ));
            }
            Err(err) => {
                tracing::warn!(error = %err, %id, "delete failed");
                self.notices.push(Notice::error(
                    "Error deleting event",
                    format!("Error deleting {name}"),
                ));
            }
        }
    }

    /// Drain queued notices for display.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
