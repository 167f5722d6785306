//! Pure emission arithmetic
//!
//! Every function here is side-effect-free and total: zero or missing
//! quantities degrade to 0, never NaN or infinity, and repeated calls
//! with identical inputs yield bit-identical results. Externally
//! visible results are rounded to 2 decimals; intermediate sums are
//! accumulated raw and rounded once at the end.

use co2e_types::Gas;
use serde::{Deserialize, Serialize};

use crate::model::{EmissionContext, GasFactorSet, GwpSet};

/// Round to 2 decimal places (half away from zero)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Theoretical emissions in kg: manufacturer CO2 g/km times distance
pub fn theoretical_emissions_kg(co2_g_km: f64, km_travelled: f64) -> f64 {
    if co2_g_km == 0.0 || km_travelled == 0.0 {
        return 0.0;
    }
    round2(co2_g_km * km_travelled / 1000.0)
}

/// Real emissions in kg for a single scope with a pre-weighted factor
///
/// Covers electric vehicles too: their thermal factor is 0 and the
/// result degrades to 0.
pub fn real_emissions_kg(quantity: f64, co2e_per_unit: f64) -> f64 {
    if quantity == 0.0 || co2e_per_unit == 0.0 {
        return 0.0;
    }
    round2(quantity * co2e_per_unit)
}

/// Consumption of one scope: a quantity (litres for scope 1, kWh for
/// scope 2) with the factor and GWP sets to weigh it
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeConsumption {
    pub quantity: f64,
    pub factors: GasFactorSet,
    pub gwp: GwpSet,
}

impl ScopeConsumption {
    pub fn new(quantity: f64, factors: GasFactorSet, gwp: GwpSet) -> Self {
        Self {
            quantity,
            factors,
            gwp,
        }
    }

    /// Pair a resolved context with its scope's consumption quantity
    pub fn from_context(context: &EmissionContext, quantity: f64) -> Self {
        Self {
            quantity,
            factors: context.factors,
            gwp: context.gwp,
        }
    }
}

/// GWP-weighted contribution of one gas, in kg CO2e
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasContribution {
    pub gas: Gas,
    pub co2e_kg: f64,
}

/// Multi-gas, multi-scope real emission result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopedEmissions {
    /// Total kg CO2e across all scopes and gases, rounded once
    pub total_co2e_kg: f64,
    /// Per-gas breakdown, one entry per tracked gas in reporting order
    pub per_gas: Vec<GasContribution>,
}

/// Accumulate quantity * factor * GWP over every scope and gas
///
/// Raw sums throughout; each externally visible figure is rounded once
/// at the end, so the total is not a sum of rounded parts.
pub fn calculate_scoped_emissions(scopes: &[ScopeConsumption]) -> ScopedEmissions {
    let mut raw_per_gas = [0.0f64; Gas::ALL.len()];
    for scope in scopes {
        if scope.quantity == 0.0 {
            continue;
        }
        for (i, gas) in Gas::ALL.iter().enumerate() {
            raw_per_gas[i] += scope.quantity * scope.factors.get(*gas) * scope.gwp.get(*gas);
        }
    }
    let raw_total: f64 = raw_per_gas.iter().sum();

    ScopedEmissions {
        total_co2e_kg: round2(raw_total),
        per_gas: Gas::ALL
            .iter()
            .zip(raw_per_gas.iter())
            .map(|(gas, raw)| GasContribution {
                gas: *gas,
                co2e_kg: round2(*raw),
            })
            .collect(),
    }
}

/// Difference between real and theoretical emissions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionDelta {
    /// real - theoretical, in kg
    pub absolute_kg: f64,
    /// Relative to the theoretical baseline, in percent. 0 when the
    /// baseline is 0: a percentage against a zero baseline is
    /// undefined and must not propagate as infinity or NaN.
    pub percentage: f64,
}

pub fn emission_delta(theoretical_kg: f64, real_kg: f64) -> EmissionDelta {
    let absolute_kg = round2(real_kg - theoretical_kg);
    let percentage = if theoretical_kg == 0.0 {
        0.0
    } else {
        round2((real_kg - theoretical_kg) / theoretical_kg * 100.0)
    };
    EmissionDelta {
        absolute_kg,
        percentage,
    }
}

/// Combined theoretical/real/delta result for one vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleEmissions {
    pub theoretical_kg: f64,
    pub real_kg: f64,
    pub delta: EmissionDelta,
}

/// Legacy single-factor path: one fuel quantity, one pre-weighted
/// factor per litre
pub fn calculate_vehicle_emissions(
    co2_g_km: f64,
    km_travelled: f64,
    fuel_litres: f64,
    co2e_per_litre: f64,
) -> VehicleEmissions {
    let theoretical_kg = theoretical_emissions_kg(co2_g_km, km_travelled);
    let real_kg = real_emissions_kg(fuel_litres, co2e_per_litre);
    VehicleEmissions {
        theoretical_kg,
        real_kg,
        delta: emission_delta(theoretical_kg, real_kg),
    }
}
