//! HTTP client for the hosted store.
//!
//! Speaks a PostgREST-style dialect: table endpoints under `/rest/v1`,
//! horizontal filters as query parameters, an api key plus a bearer token
//! on every request. Row-level auth on the hosted side scopes requests to
//! the signed-in user; the owner filter is still sent explicitly so the
//! client never depends on it.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use fiesta_core::{AppError, AppResult, EventId, Username};
use fiesta_events::{Event, EventUpdate, NewEvent};

use crate::change::{ChangeFeed, StoreChange};
use crate::decode::{decode_event, decode_events};
use crate::event_store::{EventFilter, EventStore};

const CHANGE_CAPACITY: usize = 16;
const EVENT_TABLE: &str = "event";

/// Client for the hosted event store.
///
/// Cheap to clone; clones share the change-feed channel and the underlying
/// connection pool.
#[derive(Debug, Clone)]
pub struct RemoteEventStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: String,
    table: String,
    changes: broadcast::Sender<StoreChange>,
}

impl RemoteEventStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: access_token.into(),
            table: EVENT_TABLE.to_string(),
            changes,
        }
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
    }

    async fn fetch_rows(&self, params: &[(String, String)]) -> AppResult<Vec<JsonValue>> {
        let response = self
            .authed(self.http.get(self.endpoint()))
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::remote(format!("store request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::remote(format!("store returned {status}: {body}")));
        }

        response
            .json::<Vec<JsonValue>>()
            .await
            .map_err(|e| AppError::decode(format!("store response: {e}")))
    }

    /// Start the background poll that drives the change feed.
    ///
    /// The hosted realtime protocol is not spoken here; the table contents
    /// are fingerprinted on an interval instead, and a notice goes out when
    /// the fingerprint moves. Coarse, but the feed's contract is only
    /// "something changed".
    pub fn start_change_poller(&self, owner: Username, interval: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut last: Option<u64> = None;
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                let params = filter_params(&owner, &EventFilter::default());
                match store.fetch_rows(&params).await {
                    Ok(rows) => {
                        let fingerprint = fingerprint_rows(&rows);
                        if last.is_some_and(|prev| prev != fingerprint) {
                            tracing::debug!("store contents changed; notifying subscribers");
                            let _ = store.changes.send(StoreChange);
                        }
                        last = Some(fingerprint);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "change poll failed");
                    }
                }
            }
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store operations
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl EventStore for RemoteEventStore {
    async fn query(&self, owner: &Username, filter: &EventFilter) -> AppResult<Vec<Event>> {
        let rows = self.fetch_rows(&filter_params(owner, filter)).await?;
        decode_events(rows)
    }

    async fn insert(&self, event: NewEvent) -> AppResult<Event> {
        let response = self
            .authed(self.http.post(self.endpoint()))
            .header("Prefer", "return=representation")
            .json(&event)
            .send()
            .await
            .map_err(|e| AppError::remote(format!("store request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::remote(format!("insert failed ({status}): {body}")));
        }

        let mut rows = response
            .json::<Vec<JsonValue>>()
            .await
            .map_err(|e| AppError::decode(format!("insert response: {e}")))?;
        if rows.is_empty() {
            return Err(AppError::decode("insert returned no rows"));
        }
        decode_event(rows.remove(0))
    }

    async fn update(&self, id: EventId, changes: EventUpdate) -> AppResult<()> {
        let response = self
            .authed(self.http.patch(self.endpoint()))
            .query(&[("id", format!("eq.{id}"))])
            .json(&changes)
            .send()
            .await
            .map_err(|e| AppError::remote(format!("store request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::remote(format!("update failed ({status}): {body}")));
        }
        Ok(())
    }

    async fn delete(&self, id: EventId) -> AppResult<()> {
        let response = self
            .authed(self.http.delete(self.endpoint()))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await
            .map_err(|e| AppError::remote(format!("store request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::remote(format!("delete failed ({status}): {body}")));
        }
        Ok(())
    }

    fn subscribe_to_changes(&self) -> ChangeFeed {
        ChangeFeed::new(self.changes.subscribe())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request building
// ─────────────────────────────────────────────────────────────────────────────

/// PostgREST query parameters for an owner-scoped, filtered listing.
fn filter_params(owner: &Username, filter: &EventFilter) -> Vec<(String, String)> {
    let mut params = vec![
        ("select".to_string(), "*".to_string()),
        ("username".to_string(), format!("eq.{owner}")),
    ];
    if let Some(prefix) = &filter.name_prefix {
        params.push(("name".to_string(), format!("ilike.{prefix}*")));
    }
    if let Some(date) = filter.exact_date {
        params.push(("date".to_string(), format!("eq.{date}")));
    }
    if let Some(date) = filter.min_date {
        params.push(("date".to_string(), format!("gte.{date}")));
    }
    params.push(("order".to_string(), "id.asc".to_string()));
    params
}

fn fingerprint_rows(rows: &[JsonValue]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for row in rows {
        row.to_string().hash(&mut hasher);
    }
    hasher.finish()
}
