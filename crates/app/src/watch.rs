//! Change-feed driven re-query.

use chrono::Local;

use fiesta_session::SessionProvider;
use fiesta_store::{ChangeFeed, EventStore};

use crate::context::AppContext;
use crate::events_view::EventsView;

/// Follow a change feed, re-running the listing query on every notice.
///
/// The notices carry no payload, so each one simply triggers a full
/// refresh; `on_refresh` runs after each completed one. Returns when the
/// feed closes.
pub async fn watch_changes<S, P, F>(
    mut feed: ChangeFeed,
    view: &mut EventsView,
    ctx: &AppContext<S, P>,
    mut on_refresh: F,
) where
    S: EventStore,
    P: SessionProvider,
    F: FnMut(&mut EventsView),
{
    while feed.changed().await.is_some() {
        tracing::debug!("store change notice; re-running the current query");
        view.refresh(ctx, Local::now().date_naive()).await;
        on_refresh(&mut *view);
    }
}
