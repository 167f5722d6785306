//! Default emission catalog
//!
//! DEFRA-style per-litre/per-kWh factors and IPCC AR5 GWP values,
//! enough to account for a typical mixed fleet out of the box. Two
//! diesel vintages are included so that historical reference dates
//! resolve against the factor set that was in effect at the time.

use chrono::NaiveDate;

use co2e_domain::model::{
    EmissionFactor, FuelTypeMacroMapping, GasFactorSet, GwpConfig, MacroFuelType,
};
use co2e_store::CatalogStore;
use co2e_types::{EmissionScope, Gas, MeasurementUnit, Result};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    // Constant dates, always valid
    NaiveDate::from_ymd_opt(y, m, d).expect("invalid default catalog date")
}

pub fn default_macro_fuel_types() -> Vec<MacroFuelType> {
    vec![
        MacroFuelType::new("diesel", "Diesel", EmissionScope::Thermal, MeasurementUnit::Litre)
            .with_display_order(1),
        MacroFuelType::new("petrol", "Petrol", EmissionScope::Thermal, MeasurementUnit::Litre)
            .with_display_order(2),
        MacroFuelType::new("lpg", "LPG", EmissionScope::Thermal, MeasurementUnit::Litre)
            .with_display_order(3),
        MacroFuelType::new(
            "grid-electricity",
            "Grid Electricity",
            EmissionScope::Electric,
            MeasurementUnit::KilowattHour,
        )
        .with_display_order(4),
    ]
}

pub fn default_fuel_type_mappings() -> Vec<FuelTypeMacroMapping> {
    vec![
        FuelTypeMacroMapping::new("diesel", "diesel", EmissionScope::Thermal),
        FuelTypeMacroMapping::new("petrol", "petrol", EmissionScope::Thermal),
        FuelTypeMacroMapping::new("lpg", "lpg", EmissionScope::Thermal),
        FuelTypeMacroMapping::new("electric", "grid-electricity", EmissionScope::Electric),
        FuelTypeMacroMapping::new("petrol-hybrid", "petrol", EmissionScope::Thermal),
        FuelTypeMacroMapping::new("petrol-hybrid", "grid-electricity", EmissionScope::Electric),
        FuelTypeMacroMapping::new("diesel-hybrid", "diesel", EmissionScope::Thermal),
        FuelTypeMacroMapping::new("diesel-hybrid", "grid-electricity", EmissionScope::Electric),
    ]
}

pub fn default_emission_factors() -> Vec<EmissionFactor> {
    vec![
        // Diesel, two vintages
        EmissionFactor::new(
            "diesel",
            GasFactorSet {
                co2: 2.68779,
                ch4: 0.00012,
                n2o: 0.00013,
                ..GasFactorSet::default()
            },
            "DEFRA GHG Conversion Factors 2019",
            date(2019, 1, 1),
        ),
        EmissionFactor::new(
            "diesel",
            GasFactorSet {
                co2: 2.66155,
                ch4: 0.00011,
                n2o: 0.00013,
                ..GasFactorSet::default()
            },
            "DEFRA GHG Conversion Factors 2024",
            date(2024, 1, 1),
        ),
        EmissionFactor::new(
            "petrol",
            GasFactorSet {
                co2: 2.31467,
                ch4: 0.00025,
                n2o: 0.00007,
                ..GasFactorSet::default()
            },
            "DEFRA GHG Conversion Factors 2024",
            date(2024, 1, 1),
        ),
        EmissionFactor::new(
            "lpg",
            GasFactorSet {
                co2: 1.55713,
                ch4: 0.00006,
                n2o: 0.00000,
                ..GasFactorSet::default()
            },
            "DEFRA GHG Conversion Factors 2024",
            date(2024, 1, 1),
        ),
        EmissionFactor::new(
            "grid-electricity",
            GasFactorSet {
                co2: 0.20705,
                ch4: 0.00011,
                n2o: 0.00002,
                ..GasFactorSet::default()
            },
            "DEFRA GHG Conversion Factors 2024",
            date(2024, 1, 1),
        ),
    ]
}

pub fn default_gwp_values() -> Vec<GwpConfig> {
    vec![
        GwpConfig::new(Gas::Co2, 1.0, "IPCC AR5"),
        GwpConfig::new(Gas::Ch4, 28.0, "IPCC AR5"),
        GwpConfig::new(Gas::N2o, 265.0, "IPCC AR5"),
        GwpConfig::new(Gas::Hfc, 1430.0, "IPCC AR5 (HFC-134a)"),
        GwpConfig::new(Gas::Pfc, 6630.0, "IPCC AR5 (CF4)"),
        GwpConfig::new(Gas::Sf6, 23500.0, "IPCC AR5"),
        GwpConfig::new(Gas::Nf3, 16100.0, "IPCC AR5"),
    ]
}

/// Populate an empty catalog store with the default catalog
pub fn seed_catalog(store: &mut CatalogStore) -> Result<()> {
    for macro_fuel_type in default_macro_fuel_types() {
        store.add_macro_fuel_type(macro_fuel_type)?;
    }
    for mapping in default_fuel_type_mappings() {
        store.add_mapping(mapping)?;
    }
    for factor in default_emission_factors() {
        store.add_factor(factor)?;
    }
    for gwp in default_gwp_values() {
        store.set_gwp(gwp)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use co2e_domain::service::ContextResolver;
    use tempfile::tempdir;

    #[test]
    fn test_default_catalog_resolves_every_mapping() {
        let dir = tempdir().unwrap();
        let mut store = CatalogStore::open(dir.path().to_path_buf()).unwrap();
        seed_catalog(&mut store).unwrap();

        let resolver = ContextResolver::new(&store);
        let reference = date(2024, 6, 1);
        for mapping in default_fuel_type_mappings() {
            let contexts = resolver.resolve(&mapping.fuel_type, reference).unwrap();
            assert!(!contexts.is_empty(), "no context for {}", mapping.fuel_type);
            for context in &contexts {
                assert!(context.co2e_per_unit() > 0.0);
            }
        }
    }

    #[test]
    fn test_hybrid_mappings_have_both_scopes() {
        let mappings = default_fuel_type_mappings();
        for composite in ["petrol-hybrid", "diesel-hybrid"] {
            let scopes: Vec<_> = mappings
                .iter()
                .filter(|m| m.fuel_type == composite)
                .map(|m| m.scope)
                .collect();
            assert_eq!(scopes.len(), 2);
            assert!(scopes.contains(&EmissionScope::Thermal));
            assert!(scopes.contains(&EmissionScope::Electric));
        }
    }

    #[test]
    fn test_gwp_defaults_cover_all_gases() {
        let values = default_gwp_values();
        assert_eq!(values.len(), Gas::ALL.len());
        assert!(values.iter().all(|v| v.is_active));
    }
}
