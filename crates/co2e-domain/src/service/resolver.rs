//! Emission context resolution
//!
//! Combines fuel-type mappings, effective-dated factor rows and the
//! active GWP snapshot into ready-to-calculate [`EmissionContext`]s.
//! Both the single-fuel-type path and the bulk path resolve through the
//! same [`FactorIndex`] built from the same catalog queries, so the two
//! paths produce structurally equal contexts by construction.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::{EmissionContext, FuelTypeMacroMapping, GasFactorSet, GwpSet, MacroFuelType};
use crate::repository::EmissionCatalogRepository;
use crate::service::factor_lookup::FactorIndex;
use co2e_types::{Error, Result};

/// Read-only resolver over an injected catalog
///
/// Side-effect-free and safe to call concurrently: every call fetches
/// its own catalog snapshot and builds private lookup state.
pub struct ContextResolver<'a, R: EmissionCatalogRepository> {
    catalog: &'a R,
}

impl<'a, R: EmissionCatalogRepository> ContextResolver<'a, R> {
    pub fn new(catalog: &'a R) -> Self {
        Self { catalog }
    }

    /// Mappings applicable to one vehicle fuel type, ordered by scope
    /// ascending: one entry for pure fuels, two for hybrids
    ///
    /// An empty result means "emissions unknown for this fuel type",
    /// not an error.
    pub fn resolve_mappings(&self, fuel_type: &str) -> Result<Vec<FuelTypeMacroMapping>> {
        let mut mappings: Vec<FuelTypeMacroMapping> = self
            .catalog
            .fuel_type_mappings()?
            .into_iter()
            .filter(|m| m.fuel_type == fuel_type)
            .collect();
        mappings.sort_by_key(|m| m.scope);
        Ok(mappings)
    }

    /// Resolve the emission contexts for one fuel type at a reference
    /// date
    ///
    /// Unmapped fuel types resolve to an empty list (soft). A mapping
    /// whose category has no factor row in effect is a hard
    /// [`Error::FactorNotFound`]: this path serves interactively
    /// triggered calculations, where a silent zero would misreport the
    /// vehicle as emission-free instead of surfacing the catalog gap.
    pub fn resolve(&self, fuel_type: &str, reference_date: NaiveDate) -> Result<Vec<EmissionContext>> {
        let mappings = self.resolve_mappings(fuel_type)?;
        if mappings.is_empty() {
            return Ok(Vec::new());
        }

        let macro_types = self.macro_types_by_id()?;
        let factors = self.catalog.emission_factors(reference_date)?;
        let index = FactorIndex::build(&factors, reference_date);
        let gwp = GwpSet::from_configs(&self.catalog.active_gwp_values()?);

        let mut contexts = Vec::with_capacity(mappings.len());
        for mapping in &mappings {
            let macro_fuel_type = Self::macro_type(&macro_types, &mapping.macro_fuel_type_id)?;
            let factor = index.lookup(&mapping.macro_fuel_type_id, fuel_type).ok_or_else(|| {
                Error::FactorNotFound {
                    fuel_type: fuel_type.to_string(),
                    macro_fuel_type_id: mapping.macro_fuel_type_id.clone(),
                    reference_date,
                }
            })?;
            contexts.push(EmissionContext {
                macro_fuel_type,
                factors: factor.gases,
                gwp,
            });
        }
        Ok(contexts)
    }

    /// Resolve contexts for every known fuel type in two catalog
    /// queries
    ///
    /// Same results as calling [`ContextResolver::resolve`] once per
    /// fuel type, but O(distinct fuel types) round trips instead of
    /// O(vehicles). Missing factors substitute an all-zero set rather
    /// than failing, so a batch report completes for every resolvable
    /// vehicle; the caller observes zero real emissions for the gap.
    pub fn resolve_bulk(
        &self,
        reference_date: NaiveDate,
    ) -> Result<HashMap<String, Vec<EmissionContext>>> {
        let mut mappings = self.catalog.fuel_type_mappings()?;
        mappings.sort_by(|a, b| a.fuel_type.cmp(&b.fuel_type).then(a.scope.cmp(&b.scope)));

        let macro_types = self.macro_types_by_id()?;
        let factors = self.catalog.emission_factors(reference_date)?;
        let index = FactorIndex::build(&factors, reference_date);
        let gwp = GwpSet::from_configs(&self.catalog.active_gwp_values()?);

        let mut resolved: HashMap<String, Vec<EmissionContext>> = HashMap::new();
        for mapping in &mappings {
            let macro_fuel_type = Self::macro_type(&macro_types, &mapping.macro_fuel_type_id)?;
            let gases = index
                .lookup(&mapping.macro_fuel_type_id, &mapping.fuel_type)
                .map(|f| f.gases)
                .unwrap_or_else(GasFactorSet::zero);
            resolved
                .entry(mapping.fuel_type.clone())
                .or_default()
                .push(EmissionContext {
                    macro_fuel_type,
                    factors: gases,
                    gwp,
                });
        }
        Ok(resolved)
    }

    fn macro_types_by_id(&self) -> Result<HashMap<String, MacroFuelType>> {
        Ok(self
            .catalog
            .macro_fuel_types()?
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect())
    }

    fn macro_type(
        macro_types: &HashMap<String, MacroFuelType>,
        id: &str,
    ) -> Result<MacroFuelType> {
        macro_types
            .get(id)
            .cloned()
            .ok_or_else(|| Error::Catalog(format!("mapping references unknown macro fuel type '{}'", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmissionFactor, GwpConfig};
    use co2e_types::{EmissionScope, Gas, MeasurementUnit};

    /// Fixed in-memory catalog for deterministic resolution tests
    struct InMemoryCatalog {
        macro_types: Vec<MacroFuelType>,
        mappings: Vec<FuelTypeMacroMapping>,
        factors: Vec<EmissionFactor>,
        gwp: Vec<GwpConfig>,
    }

    impl EmissionCatalogRepository for InMemoryCatalog {
        fn macro_fuel_types(&self) -> Result<Vec<MacroFuelType>> {
            Ok(self.macro_types.clone())
        }

        fn fuel_type_mappings(&self) -> Result<Vec<FuelTypeMacroMapping>> {
            Ok(self.mappings.clone())
        }

        fn emission_factors(&self, effective_before: NaiveDate) -> Result<Vec<EmissionFactor>> {
            Ok(self
                .factors
                .iter()
                .filter(|f| f.effective_date <= effective_before)
                .cloned()
                .collect())
        }

        fn active_gwp_values(&self) -> Result<Vec<GwpConfig>> {
            Ok(self.gwp.iter().filter(|g| g.is_active).cloned().collect())
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog {
            macro_types: vec![
                MacroFuelType::new("diesel", "Diesel", EmissionScope::Thermal, MeasurementUnit::Litre),
                MacroFuelType::new("petrol", "Petrol", EmissionScope::Thermal, MeasurementUnit::Litre),
                MacroFuelType::new(
                    "grid-electricity",
                    "Grid Electricity",
                    EmissionScope::Electric,
                    MeasurementUnit::KilowattHour,
                ),
            ],
            mappings: vec![
                FuelTypeMacroMapping::new("diesel", "diesel", EmissionScope::Thermal),
                FuelTypeMacroMapping::new("petrol", "petrol", EmissionScope::Thermal),
                FuelTypeMacroMapping::new("electric", "grid-electricity", EmissionScope::Electric),
                FuelTypeMacroMapping::new("petrol-hybrid", "grid-electricity", EmissionScope::Electric),
                FuelTypeMacroMapping::new("petrol-hybrid", "petrol", EmissionScope::Thermal),
            ],
            factors: vec![
                EmissionFactor::new("diesel", GasFactorSet::co2_only(2.68), "DEFRA 2019", date(2019, 1, 1)),
                EmissionFactor::new("diesel", GasFactorSet::co2_only(2.66), "DEFRA 2024", date(2024, 1, 1)),
                EmissionFactor::new("petrol", GasFactorSet::co2_only(2.31), "DEFRA 2024", date(2024, 1, 1)),
                EmissionFactor::new(
                    "grid-electricity",
                    GasFactorSet::co2_only(0.207),
                    "DEFRA 2024",
                    date(2024, 1, 1),
                ),
            ],
            gwp: vec![
                GwpConfig::new(Gas::Co2, 1.0, "IPCC AR5"),
                GwpConfig::new(Gas::Ch4, 28.0, "IPCC AR5"),
                GwpConfig::new(Gas::N2o, 265.0, "IPCC AR5"),
            ],
        }
    }

    #[test]
    fn test_pure_fuel_single_context() {
        let catalog = catalog();
        let resolver = ContextResolver::new(&catalog);
        let contexts = resolver.resolve("diesel", date(2024, 6, 1)).unwrap();
        assert_eq!(contexts.len(), 1);
        assert_eq!(contexts[0].macro_fuel_type.id, "diesel");
        assert!((contexts[0].factors.co2 - 2.66).abs() < 1e-9);
        assert_eq!(contexts[0].gwp.ch4, 28.0);
    }

    #[test]
    fn test_hybrid_two_contexts_scope_order() {
        let catalog = catalog();
        let resolver = ContextResolver::new(&catalog);
        let contexts = resolver.resolve("petrol-hybrid", date(2024, 6, 1)).unwrap();
        assert_eq!(contexts.len(), 2);
        assert_eq!(contexts[0].scope(), EmissionScope::Thermal);
        assert_eq!(contexts[0].macro_fuel_type.id, "petrol");
        assert_eq!(contexts[1].scope(), EmissionScope::Electric);
        assert_eq!(contexts[1].macro_fuel_type.id, "grid-electricity");
    }

    #[test]
    fn test_unmapped_fuel_type_is_empty() {
        let catalog = catalog();
        let resolver = ContextResolver::new(&catalog);
        let contexts = resolver.resolve("unmapped-fuel", date(2024, 6, 1)).unwrap();
        assert!(contexts.is_empty());
    }

    #[test]
    fn test_single_path_factor_not_found() {
        let mut catalog = catalog();
        catalog.mappings.push(FuelTypeMacroMapping::new(
            "lng",
            "lng",
            EmissionScope::Thermal,
        ));
        catalog.macro_types.push(MacroFuelType::new(
            "lng",
            "LNG",
            EmissionScope::Thermal,
            MeasurementUnit::Kilogram,
        ));
        let resolver = ContextResolver::new(&catalog);
        let result = resolver.resolve("lng", date(2024, 6, 1));
        assert!(matches!(result, Err(Error::FactorNotFound { .. })));
    }

    #[test]
    fn test_bulk_substitutes_zero_for_missing_factor() {
        let mut catalog = catalog();
        catalog.mappings.push(FuelTypeMacroMapping::new(
            "lng",
            "lng",
            EmissionScope::Thermal,
        ));
        catalog.macro_types.push(MacroFuelType::new(
            "lng",
            "LNG",
            EmissionScope::Thermal,
            MeasurementUnit::Kilogram,
        ));
        let resolver = ContextResolver::new(&catalog);
        let bulk = resolver.resolve_bulk(date(2024, 6, 1)).unwrap();
        let lng = &bulk["lng"];
        assert_eq!(lng.len(), 1);
        assert!(lng[0].factors.is_zero());
        assert_eq!(lng[0].co2e_per_unit(), 0.0);
    }

    #[test]
    fn test_single_bulk_equivalence() {
        let catalog = catalog();
        let resolver = ContextResolver::new(&catalog);
        for reference in [date(2024, 6, 1), date(2020, 6, 1)] {
            let bulk = resolver.resolve_bulk(reference).unwrap();
            for fuel_type in ["diesel", "petrol", "electric", "petrol-hybrid"] {
                let single = resolver.resolve(fuel_type, reference);
                match single {
                    Ok(contexts) => {
                        assert_eq!(
                            Some(&contexts),
                            bulk.get(fuel_type),
                            "single/bulk mismatch for {} at {}",
                            fuel_type,
                            reference
                        );
                    }
                    // Before 2024 petrol and electricity have no factor
                    // rows: the single path refuses, the bulk path
                    // substitutes zero
                    Err(Error::FactorNotFound { .. }) => {
                        assert!(bulk[fuel_type].iter().any(|c| c.factors.is_zero()));
                    }
                    Err(e) => panic!("unexpected error: {}", e),
                }
            }
        }
    }

    #[test]
    fn test_reference_date_selects_vintage() {
        let catalog = catalog();
        let resolver = ContextResolver::new(&catalog);
        let old = resolver.resolve("diesel", date(2020, 6, 1)).unwrap();
        assert!((old[0].factors.co2 - 2.68).abs() < 1e-9);
        let new = resolver.resolve("diesel", date(2024, 6, 1)).unwrap();
        assert!((new[0].factors.co2 - 2.66).abs() < 1e-9);
    }

    #[test]
    fn test_bulk_covers_all_mapped_fuel_types() {
        let catalog = catalog();
        let resolver = ContextResolver::new(&catalog);
        let bulk = resolver.resolve_bulk(date(2024, 6, 1)).unwrap();
        assert_eq!(bulk.len(), 4);
        assert_eq!(bulk["petrol-hybrid"].len(), 2);
        // Scope ascending within each fuel type
        assert_eq!(bulk["petrol-hybrid"][0].scope(), EmissionScope::Thermal);
    }

    #[test]
    fn test_gwp_snapshot_applied() {
        let mut catalog = catalog();
        catalog.gwp.clear();
        let resolver = ContextResolver::new(&catalog);
        let contexts = resolver.resolve("diesel", date(2024, 6, 1)).unwrap();
        // No active GWP rows: every multiplier is 0, so real emissions
        // degrade to zero contribution
        assert_eq!(contexts[0].co2e_per_unit(), 0.0);
    }
}
