//! Resolved emission context

use serde::{Deserialize, Serialize};

use super::emission_factor::GasFactorSet;
use super::gwp::GwpSet;
use super::macro_fuel_type::MacroFuelType;
use co2e_types::EmissionScope;

/// The resolved bundle for one (fuel type, scope) pair: macro fuel type
/// descriptor, per-gas factors and the GWP snapshot, ready for
/// arithmetic
///
/// Created on demand by the resolver, never mutated; lifetime is the
/// single calculation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionContext {
    pub macro_fuel_type: MacroFuelType,
    pub factors: GasFactorSet,
    pub gwp: GwpSet,
}

impl EmissionContext {
    pub fn scope(&self) -> EmissionScope {
        self.macro_fuel_type.scope
    }

    /// GWP-weighted kg CO2e per unit of fuel
    pub fn co2e_per_unit(&self) -> f64 {
        self.factors.co2e_per_unit(&self.gwp)
    }
}
