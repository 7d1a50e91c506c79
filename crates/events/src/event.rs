//! Event records and their validation bounds.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use fiesta_core::{AppError, EventId, Username, ValidationErrors};
use serde::{Deserialize, Serialize};

use crate::material::Material;

/// Kind of planned occasion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Wedding,
    Birthday,
    Corporate,
    Others,
}

impl EventType {
    /// All kinds, in the order the type picker offers them.
    pub const ALL: [EventType; 4] = [
        EventType::Wedding,
        EventType::Birthday,
        EventType::Corporate,
        EventType::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Wedding => "Wedding",
            EventType::Birthday => "Birthday",
            EventType::Corporate => "Corporate",
            EventType::Others => "Others",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Wedding" => Ok(EventType::Wedding),
            "Birthday" => Ok(EventType::Birthday),
            "Corporate" => Ok(EventType::Corporate),
            "Others" => Ok(EventType::Others),
            other => Err(AppError::decode(format!("unknown event type `{other}`"))),
        }
    }
}

/// A stored event record, owned by exactly one user.
///
/// The store is the system of record; this is the client-side view of one
/// row after schema validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub address: String,
    pub date: NaiveDate,
    pub event_type: EventType,
    #[serde(default)]
    pub material: Vec<Material>,
    pub username: Username,
}

impl Event {
    /// Derived total cost of the event's materials. Never stored.
    pub fn total_cost(&self) -> f64 {
        crate::totals::event_total(&self.material)
    }

    /// Schema check used at the decode boundary; any violation means the
    /// record cannot be trusted.
    pub fn check(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_name(&self.name, &mut errors);
        check_address(&self.address, &mut errors);
        for (index, material) in self.material.iter().enumerate() {
            material.check(&format!("material[{index}]"), &mut errors);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// A validated event that has not been stored yet; the store assigns the id
/// on insert.
///
/// `date` is the write-side moment carrying the timezone adjustment; the
/// store keeps only the calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub name: String,
    pub address: String,
    pub date: DateTime<Utc>,
    pub event_type: EventType,
    pub material: Vec<Material>,
    pub username: Username,
}

/// Full replacement of the mutable fields of a stored event. Editing never
/// patches individual fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub name: String,
    pub address: String,
    pub date: DateTime<Utc>,
    pub event_type: EventType,
    pub material: Vec<Material>,
}

pub(crate) fn check_name(name: &str, errors: &mut ValidationErrors) {
    let chars = name.trim().chars().count();
    if chars < 2 {
        errors.push("name", "name must be at least 2 characters");
    } else if chars > 255 {
        errors.push("name", "name must be at most 255 characters");
    }
}

pub(crate) fn check_address(address: &str, errors: &mut ValidationErrors) {
    let chars = address.trim().chars().count();
    if chars < 10 {
        errors.push("address", "address must be at least 10 characters");
    } else if chars > 255 {
        errors.push("address", "address must be at most 255 characters");
    }
}
