//! Daily material summary across all of a user's events on one date.

use chrono::NaiveDate;

use fiesta_events::DailySummary;
use fiesta_session::SessionProvider;
use fiesta_store::{EventFilter, EventStore};

use crate::context::AppContext;
use crate::notice::Notice;

/// Summary-dialog state: the picked date and the merged materials for it.
#[derive(Debug, Default)]
pub struct DailySummaryView {
    date: Option<NaiveDate>,
    summary: Option<DailySummary>,
    notices: Vec<Notice>,
}

impl DailySummaryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn summary(&self) -> Option<&DailySummary> {
        self.summary.as_ref()
    }

    /// Pick a date and rebuild the summary from the store.
    pub async fn set_date<S, P>(&mut self, ctx: &AppContext<S, P>, date: NaiveDate)
    where
        S: EventStore,
        P: SessionProvider,
    {
        self.date = Some(date);
        self.refresh(ctx).await;
    }

    /// Re-query the picked date and merge the materials of every event on
    /// it. Any failure clears to "no materials" with a notice.
    pub async fn refresh<S, P>(&mut self, ctx: &AppContext<S, P>)
    where
        S: EventStore,
        P: SessionProvider,
    {
        let Some(date) = self.date else {
            self.summary = None;
            return;
        };

        let user = match ctx.require_user().await {
            Ok(user) => user,
            Err(err) => {
                self.summary = None;
                self.notices.push(Notice::error("Not signed in", err.to_string()));
                return;
            }
        };

        let filter = EventFilter {
            exact_date: Some(date),
            ..Default::default()
        };
        match ctx.store.query(&user.username, &filter).await {
            Ok(events) => {
                self.summary = Some(DailySummary::from_events(date, &events));
            }
            Err(err) => {
                tracing::warn!(error = %err, %date, "daily summary query failed");
                self.summary = None;
                self.notices.push(Notice::error("Could not load materials", err.to_string()));
            }
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
