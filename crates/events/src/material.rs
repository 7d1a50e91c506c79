//! Material line items.

use fiesta_core::ValidationErrors;
use serde::{Deserialize, Serialize};

/// One validated supply line of an event: a named material with a quantity
/// and a unit cost.
///
/// Wire field names are the store's camelCase columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub material_name: String,
    pub quantity: f64,
    pub cost: f64,
}

impl Material {
    pub fn new(material_name: impl Into<String>, quantity: f64, cost: f64) -> Self {
        Self {
            material_name: material_name.into(),
            quantity,
            cost,
        }
    }

    /// Schema check for one line. `prefix` addresses the row in a form
    /// (`material[3]`): the name needs at least 2 characters, the quantity
    /// at least 1, the cost at least 0.
    pub(crate) fn check(&self, prefix: &str, errors: &mut ValidationErrors) {
        let chars = self.material_name.trim().chars().count();
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
        if !self.quantity.is_finite() || self.quantity < 1.0 {
            errors.push(
                format!("{prefix}.quantity"),
                "quantity must be at least 1",
            );
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            errors.push(format!("{prefix}.cost"), "cost must be at least 0");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(material: &Material) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        material.check("material[0]", &mut errors);
        errors
    }

    #[test]
    fn well_formed_line_passes() {
        let errors = check(&Material::new("Chair", 2.0, 5.0));
        assert!(errors.is_empty());
    }

    #[test]
    fn short_name_is_flagged_on_its_field() {
        let errors = check(&Material::new("C", 2.0, 5.0));
        assert!(errors.field("material[0].materialName").is_some());
        assert!(errors.field("material[0].quantity").is_none());
    }

    #[test]
    fn zero_quantity_fails_the_minimum() {
        let errors = check(&Material::new("Chair", 0.0, 5.0));
        assert!(errors.field("material[0].quantity").is_some());
    }

    #[test]
    fn negative_cost_is_rejected_but_zero_cost_is_fine() {
        assert!(check(&Material::new("Chair", 1.0, -1.0))
            .field("material[0].cost")
            .is_some());
        assert!(check(&Material::new("Chair", 1.0, 0.0)).is_empty());
    }

    #[test]
    fn non_finite_numbers_never_pass() {
        let errors = check(&Material::new("Chair", f64::NAN, f64::INFINITY));
        assert_eq!(errors.len(), 2);
    }
}
