//! Event creation form.

use fiesta_core::ValidationErrors;
use fiesta_events::{
    Event, EventDraft, MaterialDraft, event_total, local_utc_offset_minutes,
};
use fiesta_session::SessionProvider;
use fiesta_store::EventStore;

use crate::context::AppContext;
use crate::notice::Notice;

/// Creation-form state: the draft being edited, the field errors from the
/// last submit attempt, and queued notices.
#[derive(Debug)]
pub struct EventComposer {
    draft: EventDraft,
    errors: ValidationErrors,
    notices: Vec<Notice>,
    utc_offset_minutes: i32,
}

impl EventComposer {
    /// Fresh form, stamped with the process-local UTC offset.
    pub fn new() -> Self {
        Self::with_utc_offset(local_utc_offset_minutes())
    }

    /// Fresh form with an explicit offset (tests, or a caller that knows
    /// the user's timezone better than the process does).
    pub fn with_utc_offset(utc_offset_minutes: i32) -> Self {
        Self {
            draft: EventDraft::new(),
            errors: ValidationErrors::new(),
            notices: Vec::new(),
            utc_offset_minutes,
        }
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut EventDraft {
        &mut self.draft
    }

    /// Field errors from the last submit, addressable per field for inline
    /// rendering.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn add_material_row(&mut self) {
        self.draft.material.push(MaterialDraft::blank());
    }

    pub fn remove_material_row(&mut self, index: usize) {
        if index < self.draft.material.len() {
            self.draft.material.remove(index);
        }
    }

    /// Live total over the rows as they currently stand. Malformed rows
    /// degrade to defaults instead of blanking the number.
    pub fn running_total(&self) -> f64 {
        event_total(&self.draft.material)
    }

    /// Validate and persist the draft.
    ///
    /// Field errors stay on the form for inline display; a stored event
    /// resets it. The picked calendar date is converted to the write-side
    /// moment, and the session username becomes the owner.
    pub async fn submit<S, P>(&mut self, ctx: &AppContext<S, P>) -> Option<Event>
    where
        S: EventStore,
        P: SessionProvider,
    {
        self.errors = ValidationErrors::new();

        let validated = match self.draft.validate() {
            Ok(validated) => validated,
            Err(errors) => {
                self.errors = errors;
                return None;
            }
        };

        let user = match ctx.require_user().await {
            Ok(user) => user,
            Err(err) => {
                self.notices.push(Notice::error("Not signed in", err.to_string()));
                return None;
            }
        };

        let new_event = validated.into_new_event(user.username, self.utc_offset_minutes);
        match ctx.store.insert(new_event).await {
            Ok(event) => {
                tracing::info!(id = %event.id, "event created");
                self.notices.push(Notice::info(
                    "Successfully added event",
                    format!("{} has been saved", event.name),
                ));
                self.draft = EventDraft::new();
                Some(event)
            }
            Err(err) => {
                tracing::warn!(error = %err, "insert failed");
                self.notices.push(Notice::error("Error adding event", err.to_string()));
                None
            }
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Default for EventComposer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::NaiveDate;
    use fiesta_core::{UserId, Username};
    use fiesta_events::EventType;
    use fiesta_session::{StaticSessionProvider, User};
    use fiesta_store::{EventFilter, InMemoryEventStore};
    use serde_json::json;

    use crate::notice::NoticeKind;

    fn owner() -> Username {
        Username::new("alice").unwrap()
    }

    fn signed_in_ctx(
        store: Arc<InMemoryEventStore>,
    ) -> AppContext<InMemoryEventStore, StaticSessionProvider> {
        let user = User::new(UserId::new(), "alice@example.com", owner());
        AppContext::new(store, Arc::new(StaticSessionProvider::signed_in(user)))
    }

    fn fill_valid(composer: &mut EventComposer) {
        let draft = composer.draft_mut();
        draft.name = "Garcia birthday".to_string();
        draft.address = "45 Rizal Ave, Makati City".to_string();
        draft.date = NaiveDate::from_ymd_opt(2026, 10, 3);
        draft.event_type = Some(EventType::Birthday);
        draft.material[0].material_name = "Balloons".to_string();
        draft.material[0].quantity = json!(30);
        draft.material[0].cost = json!(2.5);
    }

    #[test]
    fn form_starts_with_one_blank_row() {
        let composer = EventComposer::with_utc_offset(0);
        assert_eq!(composer.draft().material.len(), 1);
        assert_eq!(composer.running_total(), 0.0);
    }

    #[test]
    fn running_total_follows_the_rows() {
        let mut composer = EventComposer::with_utc_offset(0);
        composer.draft_mut().material[0].quantity = json!(3);
        composer.draft_mut().material[0].cost = json!(10);
        assert_eq!(composer.running_total(), 30.0);

        composer.add_material_row();
        composer.draft_mut().material[1].quantity = json!("x");
        composer.draft_mut().material[1].cost = json!(5);
        // Malformed quantity counts as 1, not 0.
        assert_eq!(composer.running_total(), 35.0);

        composer.remove_material_row(1);
        assert_eq!(composer.running_total(), 30.0);
    }

    #[tokio::test]
    async fn invalid_draft_keeps_field_errors_inline_and_does_not_insert() {
        let store = Arc::new(InMemoryEventStore::new());
        let ctx = signed_in_ctx(store.clone());
        let mut composer = EventComposer::with_utc_offset(0);

        assert!(composer.submit(&ctx).await.is_none());
        assert!(composer.errors().field("name").is_some());
        assert!(composer.errors().field("date").is_some());

        let events = store.query(&owner(), &EventFilter::default()).await.unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn submit_stamps_owner_and_calendar_date_then_resets() {
        let store = Arc::new(InMemoryEventStore::new());
        let ctx = signed_in_ctx(store.clone());
        let mut composer = EventComposer::with_utc_offset(0);
        fill_valid(&mut composer);

        let event = composer.submit(&ctx).await.expect("insert succeeds");
        assert_eq!(event.username, owner());
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2026, 10, 3).unwrap());

        // The form resets to its seed state and reports success.
        assert_eq!(composer.draft().name, "");
        assert_eq!(composer.draft().material.len(), 1);
        let notices = composer.take_notices();
        assert_eq!(notices[0].kind, NoticeKind::Info);
        assert!(notices[0].detail.contains("Garcia birthday"));
    }

    #[tokio::test]
    async fn submit_without_a_session_queues_a_notice_and_keeps_the_draft() {
        let store = Arc::new(InMemoryEventStore::new());
        let ctx = AppContext::new(store, Arc::new(StaticSessionProvider::signed_out()));
        let mut composer = EventComposer::with_utc_offset(0);
        fill_valid(&mut composer);

        assert!(composer.submit(&ctx).await.is_none());
        assert_eq!(composer.draft().name, "Garcia birthday", "draft survives");
        assert_eq!(composer.take_notices()[0].kind, NoticeKind::Error);
    }
}
