//! Material aggregation: line totals, event totals, and the daily merge.
//!
//! Pure arithmetic over small in-memory lists. Totals are always derived on
//! demand and never stored, so every function here is total over its input
//! and safe to recompute on every render without synchronization.

use chrono::NaiveDate;

use crate::draft::{MaterialDraft, coerce_number};
use crate::event::Event;
use crate::material::Material;

/// A line that can contribute to a cost total.
///
/// `None` from either accessor means the underlying field does not hold a
/// usable number; totals substitute defaults instead of failing.
pub trait LineItem {
    fn quantity(&self) -> Option<f64>;
    fn unit_cost(&self) -> Option<f64>;
}

impl LineItem for Material {
    fn quantity(&self) -> Option<f64> {
        Some(self.quantity)
    }

    fn unit_cost(&self) -> Option<f64> {
        Some(self.cost)
    }
}

impl LineItem for MaterialDraft {
    fn quantity(&self) -> Option<f64> {
        coerce_number(&self.quantity)
    }

    fn unit_cost(&self) -> Option<f64> {
        coerce_number(&self.cost)
    }
}

/// Cost contribution of a single line.
///
/// Malformed or missing cost counts as 0 and quantity as 1, so a
/// half-filled form row degrades instead of aborting the whole total.
pub fn line_total<T: LineItem>(item: &T) -> f64 {
    item.unit_cost().unwrap_or(0.0) * item.quantity().unwrap_or(1.0)
}

/// Sum of [`line_total`] over all lines; 0 for an empty list.
pub fn event_total<T: LineItem>(items: &[T]) -> f64 {
    items.iter().map(line_total).sum()
}

/// Merge the material lists of several events into one list.
///
/// Lines are folded left-to-right in order of first appearance. Two lines
/// merge only when both the name and the unit cost match; quantities
/// accumulate and the cost stays as first seen. Same-named lines with a
/// different unit cost remain separate entries.
pub fn merge_materials<I>(lists: I) -> Vec<Material>
where
    I: IntoIterator<Item = Vec<Material>>,
{
    let mut merged: Vec<Material> = Vec::new();
    for item in lists.into_iter().flatten() {
        match merged
            .iter_mut()
            .find(|m| m.material_name == item.material_name && m.cost == item.cost)
        {
            Some(existing) => existing.quantity += item.quantity,
            None => merged.push(item),
        }
    }
    merged
}

/// Materials aggregated across all of a user's events on one calendar date.
///
/// Derived and non-persisted; the grand total is computed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub materials: Vec<Material>,
}

impl DailySummary {
    pub fn from_events(date: NaiveDate, events: &[Event]) -> Self {
        let materials = merge_materials(events.iter().map(|e| e.material.clone()));
        Self { date, materials }
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn total_cost(&self) -> f64 {
        event_total(&self.materials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn line_total_multiplies_quantity_by_cost() {
        assert_eq!(line_total(&Material::new("Chair", 3.0, 10.0)), 30.0);
    }

    #[test]
    fn malformed_quantity_defaults_to_one() {
        let draft = MaterialDraft {
            material_name: "Chair".to_string(),
            quantity: json!("x"),
            cost: json!(10),
        };
        assert_eq!(line_total(&draft), 10.0);
    }

    #[test]
    fn missing_cost_defaults_to_zero() {
        let draft = MaterialDraft {
            material_name: "Chair".to_string(),
            quantity: json!(2),
            cost: json!(null),
        };
        assert_eq!(line_total(&draft), 0.0);
    }

    #[test]
    fn numeric_strings_contribute_like_numbers() {
        let draft = MaterialDraft {
            material_name: "Chair".to_string(),
            quantity: json!("3"),
            cost: json!("10"),
        };
        assert_eq!(line_total(&draft), 30.0);
    }

    #[test]
    fn event_total_of_empty_list_is_zero() {
        assert_eq!(event_total::<Material>(&[]), 0.0);
    }

    #[test]
    fn event_total_sums_line_totals() {
        let materials = vec![
            Material::new("Chair", 2.0, 5.0),
            Material::new("Table", 1.0, 3.0),
        ];
        assert_eq!(event_total(&materials), 13.0);
    }

    #[test]
    fn merge_sums_quantities_for_matching_name_and_cost() {
        let merged = merge_materials(vec![
            vec![Material::new("Chair", 2.0, 5.0)],
            vec![Material::new("Chair", 3.0, 5.0)],
        ]);
        assert_eq!(merged, vec![Material::new("Chair", 5.0, 5.0)]);
    }

    #[test]
    fn same_name_with_different_cost_stays_distinct() {
        let merged = merge_materials(vec![
            vec![Material::new("Chair", 2.0, 5.0)],
            vec![Material::new("Chair", 1.0, 7.0)],
        ]);
        assert_eq!(
            merged,
            vec![
                Material::new("Chair", 2.0, 5.0),
                Material::new("Chair", 1.0, 7.0),
            ]
        );
    }

    #[test]
    fn merge_preserves_order_of_first_appearance() {
        let merged = merge_materials(vec![
            vec![
                Material::new("Table", 1.0, 30.0),
                Material::new("Chair", 4.0, 5.0),
            ],
            vec![
                Material::new("Chair", 6.0, 5.0),
                Material::new("Tent", 1.0, 200.0),
            ],
        ]);
        let names: Vec<&str> = merged.iter().map(|m| m.material_name.as_str()).collect();
        assert_eq!(names, vec!["Table", "Chair", "Tent"]);
        assert_eq!(merged[1].quantity, 10.0);
    }

    #[test]
    fn merge_of_a_single_duplicate_free_list_is_identity() {
        let list = vec![
            Material::new("Chair", 2.0, 5.0),
            Material::new("Table", 1.0, 30.0),
        ];
        assert_eq!(merge_materials(vec![list.clone()]), list);
    }

    #[test]
    fn daily_summary_merges_across_events_and_totals() {
        use chrono::NaiveDate;
        use fiesta_core::{EventId, Username};

        let date = NaiveDate::from_ymd_opt(2026, 9, 12).unwrap();
        let event = |id: i64, material: Vec<Material>| Event {
            id: EventId::new(id),
            name: "Reyes wedding".to_string(),
            address: "123 Mabini St, Quezon City".to_string(),
            date,
            event_type: crate::event::EventType::Wedding,
            material,
            username: Username::new("alice").unwrap(),
        };

        let summary = DailySummary::from_events(
            date,
            &[
                event(1, vec![Material::new("Chair", 2.0, 5.0)]),
                event(
                    2,
                    vec![
                        Material::new("Chair", 3.0, 5.0),
                        Material::new("Tent", 1.0, 200.0),
                    ],
                ),
            ],
        );

        assert_eq!(
            summary.materials,
            vec![
                Material::new("Chair", 5.0, 5.0),
                Material::new("Tent", 1.0, 200.0),
            ]
        );
        assert_eq!(summary.total_cost(), 225.0);
        assert!(!summary.is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn material_strategy() -> impl Strategy<Value = Material> {
            ("[A-Za-z]{2,12}", 1.0f64..1_000.0, 0.0f64..10_000.0)
                .prop_map(|(name, quantity, cost)| Material::new(name, quantity, cost))
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: totals over valid material lists are never negative.
            #[test]
            fn event_total_is_non_negative(
                materials in prop::collection::vec(material_strategy(), 0..20)
            ) {
                prop_assert!(event_total(&materials) >= 0.0);
            }

            /// Property: merging never changes the total quantity per
            /// (name, cost) key, only the grouping.
            #[test]
            fn merge_preserves_total_quantity_per_key(
                lists in prop::collection::vec(
                    prop::collection::vec(material_strategy(), 0..8),
                    0..6,
                )
            ) {
                let flattened: Vec<Material> = lists.iter().flatten().cloned().collect();
                let merged = merge_materials(lists.clone());

                for entry in &merged {
                    let expected: f64 = flattened
                        .iter()
                        .filter(|m| {
                            m.material_name == entry.material_name && m.cost == entry.cost
                        })
                        .map(|m| m.quantity)
                        .sum();
                    prop_assert!((entry.quantity - expected).abs() < 1e-9);
                }
            }

            /// Property: merging is idempotent; folding an already merged
            /// list again changes nothing.
            #[test]
            fn merge_is_idempotent(
                lists in prop::collection::vec(
                    prop::collection::vec(material_strategy(), 0..8),
                    0..6,
                )
            ) {
                let merged = merge_materials(lists);
                prop_assert_eq!(merge_materials(vec![merged.clone()]), merged);
            }
        }
    }
}
