//! Time-versioned per-gas emission factors

use chrono::NaiveDate;
use co2e_types::Gas;
use serde::{Deserialize, Serialize};

use super::gwp::GwpSet;

/// Seven-gas coefficient set, each value in kg of that gas per unit of
/// fuel (the unit comes from the macro fuel type)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GasFactorSet {
    #[serde(default)]
    pub co2: f64,
    #[serde(default)]
    pub ch4: f64,
    #[serde(default)]
    pub n2o: f64,
    #[serde(default)]
    pub hfc: f64,
    #[serde(default)]
    pub pfc: f64,
    #[serde(default)]
    pub sf6: f64,
    #[serde(default)]
    pub nf3: f64,
}

impl GasFactorSet {
    /// All-zero factor set, used by the bulk resolver when no factor row
    /// applies so a batch run still completes
    pub fn zero() -> Self {
        Self::default()
    }

    /// Factor set with only a CO2 component
    pub fn co2_only(co2: f64) -> Self {
        Self {
            co2,
            ..Self::default()
        }
    }

    pub fn get(&self, gas: Gas) -> f64 {
        match gas {
            Gas::Co2 => self.co2,
            Gas::Ch4 => self.ch4,
            Gas::N2o => self.n2o,
            Gas::Hfc => self.hfc,
            Gas::Pfc => self.pfc,
            Gas::Sf6 => self.sf6,
            Gas::Nf3 => self.nf3,
        }
    }

    pub fn is_zero(&self) -> bool {
        Gas::ALL.iter().all(|g| self.get(*g) == 0.0)
    }

    /// GWP-weighted total: kg CO2e per unit of fuel
    pub fn co2e_per_unit(&self, gwp: &GwpSet) -> f64 {
        Gas::ALL
            .iter()
            .map(|g| self.get(*g) * gwp.get(*g))
            .sum()
    }
}

/// A temporally-scoped factor row for one macro fuel type
///
/// Rows are append-only: a new row with a later `effective_date`
/// supersedes earlier ones without replacing them, so historical
/// resolutions stay reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactor {
    /// Macro fuel type this row belongs to
    pub macro_fuel_type_id: String,
    /// None = default for the whole category; Some = applies only to
    /// that specific vehicle fuel type string
    #[serde(default)]
    pub fuel_type: Option<String>,
    /// Per-gas coefficients
    pub gases: GasFactorSet,
    /// Source citation (e.g. "DEFRA GHG Conversion Factors 2024")
    pub source: String,
    /// First date this row is in effect
    pub effective_date: NaiveDate,
}

impl EmissionFactor {
    pub fn new(
        macro_fuel_type_id: &str,
        gases: GasFactorSet,
        source: &str,
        effective_date: NaiveDate,
    ) -> Self {
        Self {
            macro_fuel_type_id: macro_fuel_type_id.to_string(),
            fuel_type: None,
            gases,
            source: source.to_string(),
            effective_date,
        }
    }

    /// Restrict this row to a specific vehicle fuel type string
    pub fn for_fuel_type(mut self, fuel_type: &str) -> Self {
        self.fuel_type = Some(fuel_type.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_set() {
        let zero = GasFactorSet::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.co2e_per_unit(&GwpSet::ar5()), 0.0);
    }

    #[test]
    fn test_co2e_per_unit_weighting() {
        let gases = GasFactorSet {
            co2: 2.3,
            ch4: 0.001,
            n2o: 0.0005,
            ..GasFactorSet::default()
        };
        let gwp = GwpSet::ar5();
        // 2.3*1 + 0.001*28 + 0.0005*265 = 2.46325
        assert!((gases.co2e_per_unit(&gwp) - 2.46325).abs() < 1e-9);
    }
}
