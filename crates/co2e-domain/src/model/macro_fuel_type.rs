//! Macro fuel type - coarse emission accounting category

use co2e_types::{EmissionScope, MeasurementUnit};
use serde::{Deserialize, Serialize};

/// An emission accounting category (e.g. "Diesel", "Grid Electricity")
///
/// Multiple raw vehicle fuel type strings may map into one category.
/// The `scope` value is invariant for the category's lifetime: changing
/// it would silently reinterpret historical factors, so a scope change
/// is modelled as a new category instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroFuelType {
    /// Stable identifier (e.g. "diesel", "grid-electricity")
    pub id: String,
    /// Display name
    pub name: String,
    /// Emission scope this category is accounted under
    pub scope: EmissionScope,
    /// Unit of the consumption quantity factors are expressed against
    pub unit: MeasurementUnit,
    /// Ordering for display lists
    #[serde(default)]
    pub display_order: u32,
    /// Inactive categories are hidden from new data entry but keep
    /// serving historical factors
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl MacroFuelType {
    pub fn new(id: &str, name: &str, scope: EmissionScope, unit: MeasurementUnit) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            scope,
            unit,
            display_order: 0,
            is_active: true,
        }
    }

    pub fn with_display_order(mut self, order: u32) -> Self {
        self.display_order = order;
        self
    }
}
