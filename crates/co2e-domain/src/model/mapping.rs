//! Vehicle fuel type to macro fuel type mappings

use co2e_types::EmissionScope;
use serde::{Deserialize, Serialize};

/// Links a raw vehicle fuel type string to a macro fuel type for one
/// scope
///
/// A pure fuel type has exactly one mapping; a hybrid composite (e.g.
/// "petrol-hybrid") has two, one per scope, because a refuelling event
/// and a charging event are accounted separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelTypeMacroMapping {
    /// Raw vehicle fuel type string (e.g. "diesel", "petrol-hybrid")
    pub fuel_type: String,
    /// Macro fuel type this scope's consumption is accounted under
    pub macro_fuel_type_id: String,
    pub scope: EmissionScope,
}

impl FuelTypeMacroMapping {
    pub fn new(fuel_type: &str, macro_fuel_type_id: &str, scope: EmissionScope) -> Self {
        Self {
            fuel_type: fuel_type.to_string(),
            macro_fuel_type_id: macro_fuel_type_id.to_string(),
            scope,
        }
    }
}
