//! Schema validation of wire payloads.
//!
//! Records coming back from the store are duck-typed JSON. They are decoded
//! into typed events and checked against the record schema before the rest
//! of the application sees them. One bad record discards the entire result
//! set: the UI shows an empty state instead of partially-validated rows.

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use fiesta_core::{AppError, AppResult, EventId, Username};
use fiesta_events::{Event, EventType, Material};

/// Raw row shape as the store returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRow {
    id: i64,
    name: String,
    address: String,
    date: String,
    event_type: String,
    #[serde(default)]
    material: Vec<MaterialRow>,
    username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MaterialRow {
    material_name: String,
    quantity: f64,
    cost: f64,
}

/// Decode a whole result set, failing closed: the first row that does not
/// match the schema discards everything.
pub fn decode_events(rows: Vec<JsonValue>) -> AppResult<Vec<Event>> {
    rows.into_iter().map(decode_event).collect()
}

/// Decode and schema-check a single row.
pub fn decode_event(row: JsonValue) -> AppResult<Event> {
    let row: EventRow =
        serde_json::from_value(row).map_err(|e| AppError::decode(format!("event row: {e}")))?;

    let date = parse_stored_date(&row.date)?;
    let event_type = row.event_type.parse::<EventType>()?;
    let username = Username::new(row.username)
        .map_err(|_| AppError::decode(format!("event {}: empty username", row.id)))?;

    let event = Event {
        id: EventId::new(row.id),
        name: row.name,
        address: row.address,
        date,
        event_type,
        material: row
            .material
            .into_iter()
            .map(|m| Material::new(m.material_name, m.quantity, m.cost))
            .collect(),
        username,
    };

    if let Err(errors) = event.check() {
        return Err(AppError::decode(format!("event {}: {errors}", event.id)));
    }
    Ok(event)
}

/// The store column is a calendar date, but write-side values are full
/// datetimes; accept either shape.
fn parse_stored_date(raw: &str) -> AppResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|moment| moment.date_naive())
        .map_err(|_| AppError::decode(format!("unparseable date `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> JsonValue {
        json!({
            "id": 7,
            "name": "Reyes wedding",
            "address": "123 Mabini St, Quezon City",
            "date": "2026-09-12",
            "eventType": "Wedding",
            "material": [
                { "materialName": "Chair", "quantity": 10.0, "cost": 25.0 }
            ],
            "username": "alice"
        })
    }

    #[test]
    fn well_formed_row_decodes() {
        let event = decode_event(row()).unwrap();
        assert_eq!(event.id, EventId::new(7));
        assert_eq!(event.event_type, EventType::Wedding);
        assert_eq!(event.material, vec![Material::new("Chair", 10.0, 25.0)]);
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2026, 9, 12).unwrap());
    }

    #[test]
    fn datetime_valued_date_column_is_accepted() {
        let mut raw = row();
        raw["date"] = json!("2026-09-12T00:00:00+00:00");
        let event = decode_event(raw).unwrap();
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2026, 9, 12).unwrap());
    }

    #[test]
    fn unknown_event_type_fails() {
        let mut raw = row();
        raw["eventType"] = json!("Conference");
        let err = decode_event(raw).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn unparseable_date_fails() {
        let mut raw = row();
        raw["date"] = json!("12/09/2026");
        assert!(decode_event(raw).is_err());
    }

    #[test]
    fn out_of_bounds_fields_fail_the_schema() {
        let mut raw = row();
        raw["address"] = json!("short");
        assert!(decode_event(raw).is_err());

        let mut raw = row();
        raw["material"][0]["quantity"] = json!(0);
        assert!(decode_event(raw).is_err());
    }

    #[test]
    fn non_numeric_quantity_fails_decode() {
        let mut raw = row();
        raw["material"][0]["quantity"] = json!("ten");
        assert!(decode_event(raw).is_err());
    }

    #[test]
    fn missing_material_column_defaults_to_no_lines() {
        let mut raw = row();
        raw.as_object_mut().unwrap().remove("material");
        let event = decode_event(raw).unwrap();
        assert!(event.material.is_empty());
    }

    #[test]
    fn empty_username_fails_closed() {
        let mut raw = row();
        raw["username"] = json!("   ");
        assert!(decode_event(raw).is_err());
    }

    #[test]
    fn one_bad_row_discards_the_whole_set() {
        let mut bad = row();
        bad["eventType"] = json!("Conference");

        let err = decode_events(vec![row(), bad]).unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[test]
    fn empty_result_set_decodes_to_empty() {
        assert_eq!(decode_events(vec![]).unwrap(), vec![]);
    }
}
