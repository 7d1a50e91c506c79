//! Form drafts: partially-typed input on its way to a validated record.
//!
//! A draft's numeric fields hold whatever JSON the form produced: numbers,
//! numeric strings, empty strings, nulls. Totals over drafts degrade
//! malformed fields to defaults; validation reads them strictly and
//! collects an error per failing field so each message can sit next to the
//! input it belongs to.

use chrono::NaiveDate;
use fiesta_core::{Username, ValidationErrors};
use serde::{Deserialize, Serialize};
use serde_json::{Value as JsonValue, json};

use crate::event::{Event, EventType, EventUpdate, NewEvent, check_address, check_name};
use crate::material::Material;
use crate::schedule::write_moment;

/// One material row as it sits in a form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDraft {
    #[serde(default)]
    pub material_name: String,
    #[serde(default)]
    pub quantity: JsonValue,
    #[serde(default)]
    pub cost: JsonValue,
}

impl MaterialDraft {
    /// Fresh row as the creation form seeds it.
    pub fn blank() -> Self {
        Self {
            material_name: String::new(),
            quantity: json!(1),
            cost: json!(0),
        }
    }

    /// Strict reading of this row. Field errors are addressed under
    /// `prefix`; the row converts only if it contributed no new errors.
    fn to_material(&self, prefix: &str, errors: &mut ValidationErrors) -> Option<Material> {
        let before = errors.len();

        let name = self.material_name.trim();
        let chars = name.chars().count();
        if chars < 2 {
            errors.push(
                format!("{prefix}.materialName"),
                "name must be at least 2 characters",
            );
        } else if chars > 255 {
            errors.push(
                format!("{prefix}.materialName"),
                "name must be at most 255 characters",
            );
        }

        let quantity = match coerce_number(&self.quantity) {
            Some(quantity) if quantity >= 1.0 => Some(quantity),
            Some(_) => {
                errors.push(format!("{prefix}.quantity"), "quantity must be at least 1");
                None
            }
            None => {
                errors.push(format!("{prefix}.quantity"), "quantity must be a number");
                None
            }
        };

        let cost = match coerce_number(&self.cost) {
            Some(cost) if cost >= 0.0 => Some(cost),
            Some(_) => {
                errors.push(format!("{prefix}.cost"), "cost must be at least 0");
                None
            }
            None => {
                errors.push(format!("{prefix}.cost"), "cost must be a number");
                None
            }
        };

        if errors.len() > before {
            return None;
        }
        Some(Material::new(name, quantity?, cost?))
    }
}

/// Lenient numeric reading of a JSON field: numbers pass through, numeric
/// strings parse, everything else is unusable.
pub(crate) fn coerce_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        JsonValue::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// The whole event form before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub date: Option<NaiveDate>,
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub material: Vec<MaterialDraft>,
}

impl EventDraft {
    /// Creation-form starting state: one blank material row.
    pub fn new() -> Self {
        Self {
            material: vec![MaterialDraft::blank()],
            ..Self::default()
        }
    }

    /// Editor prefill from a stored event.
    pub fn from_event(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            address: event.address.clone(),
            date: Some(event.date),
            event_type: Some(event.event_type),
            material: event
                .material
                .iter()
                .map(|m| MaterialDraft {
                    material_name: m.material_name.clone(),
                    quantity: json!(m.quantity),
                    cost: json!(m.cost),
                })
                .collect(),
        }
    }

    /// Validate every field, collecting all errors rather than stopping at
    /// the first.
    pub fn validate(&self) -> Result<ValidatedEvent, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_name(&self.name, &mut errors);
        check_address(&self.address, &mut errors);
        if self.date.is_none() {
            errors.push("date", "pick a date");
        }
        if self.event_type.is_none() {
            errors.push("eventType", "select an event type");
        }

        let mut material = Vec::with_capacity(self.material.len());
        for (index, row) in self.material.iter().enumerate() {
            if let Some(converted) = row.to_material(&format!("material[{index}]"), &mut errors) {
                material.push(converted);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ValidatedEvent {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            // Both checked above; unreachable when errors is empty.
            date: self.date.unwrap_or_default(),
            event_type: self.event_type.unwrap_or(EventType::Others),
            material,
        })
    }
}

/// Outcome of a successful draft validation: every field typed and
/// bounds-checked, not yet bound to an owner or a write moment.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedEvent {
    pub name: String,
    pub address: String,
    pub date: NaiveDate,
    pub event_type: EventType,
    pub material: Vec<Material>,
}

impl ValidatedEvent {
    /// Bind the owner and stamp the write-side moment for insert.
    pub fn into_new_event(self, username: Username, utc_offset_minutes: i32) -> NewEvent {
        NewEvent {
            name: self.name,
            address: self.address,
            date: write_moment(self.date, utc_offset_minutes),
            event_type: self.event_type,
            material: self.material,
            username,
        }
    }

    /// Full-replace payload for editing an existing event.
    pub fn into_update(self, utc_offset_minutes: i32) -> EventUpdate {
        EventUpdate {
            name: self.name,
            address: self.address,
            date: write_moment(self.date, utc_offset_minutes),
            event_type: self.event_type,
            material: self.material,
        }
    }
}
