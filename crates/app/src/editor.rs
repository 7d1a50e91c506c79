//! Event edit form: full replacement of the mutable fields.

use fiesta_core::{EventId, ValidationErrors};
use fiesta_events::{Event, EventDraft, MaterialDraft, event_total, local_utc_offset_minutes};
use fiesta_session::SessionProvider;
use fiesta_store::EventStore;

use crate::context::AppContext;
use crate::notice::Notice;

/// Edit-form state, prefilled from a stored event.
///
/// Submitting replaces every mutable field of the row; the owner never
/// changes.
#[derive(Debug)]
pub struct EventEditor {
    id: EventId,
    draft: EventDraft,
    errors: ValidationErrors,
    notices: Vec<Notice>,
    utc_offset_minutes: i32,
}

impl EventEditor {
    pub fn new(event: &Event) -> Self {
        Self::with_utc_offset(event, local_utc_offset_minutes())
    }

    pub fn with_utc_offset(event: &Event, utc_offset_minutes: i32) -> Self {
        Self {
            id: event.id,
            draft: EventDraft::from_event(event),
            errors: ValidationErrors::new(),
            notices: Vec::new(),
            utc_offset_minutes,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut EventDraft {
        &mut self.draft
    }

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

    /// Live total over the rows as they currently stand.
    pub fn running_total(&self) -> f64 {
        event_total(&self.draft.material)
    }

    /// Validate and replace the stored event's mutable fields.
    ///
    /// Returns whether the update went through. Field errors stay on the
    /// form; the updated listing arrives via the change feed.
    pub async fn submit<S, P>(&mut self, ctx: &AppContext<S, P>) -> bool
    where
        S: EventStore,
        P: SessionProvider,
    {
        self.errors = ValidationErrors::new();

        let validated = match self.draft.validate() {
            Ok(validated) => validated,
            Err(errors) => {
                self.errors = errors;
                return false;
            }
        };

        let name = validated.name.clone();
        let changes = validated.into_update(self.utc_offset_minutes);
        match ctx.store.update(self.id, changes).await {
            Ok(()) => {
                tracing::info!(id = %self.id, "event updated");
                self.notices.push(Notice::info(
                    "Event Updated",
                    format!("{name} has been saved"),
                ));
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, id = %self.id, "update failed");
                self.notices.push(Notice::error("Error updating event", err.to_string()));
                false
            }
        }
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
