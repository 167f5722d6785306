//! Emission catalog store
//!
//! Macro fuel types, fuel-type mappings, factor rows and GWP rows in a
//! single JSON file. Factor rows are append-only: superseding a value
//! means adding a row with a later effective date, never editing or
//! deleting, so historical resolutions stay reproducible.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use co2e_domain::model::{EmissionFactor, FuelTypeMacroMapping, GwpConfig, MacroFuelType};
use co2e_domain::repository::EmissionCatalogRepository;
use co2e_types::{Error, Gas, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogData {
    #[serde(default)]
    macro_fuel_types: Vec<MacroFuelType>,
    #[serde(default)]
    mappings: Vec<FuelTypeMacroMapping>,
    #[serde(default)]
    factors: Vec<EmissionFactor>,
    #[serde(default)]
    gwp: Vec<GwpConfig>,
}

/// Persistent store for the emission catalog
pub struct CatalogStore {
    store_path: PathBuf,
    data: CatalogData,
}

impl CatalogStore {
    /// Create or load a catalog store
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("catalog.json");

        let data = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).unwrap_or_default()
        } else {
            CatalogData::default()
        };

        Ok(Self { store_path, data })
    }

    /// Save store to disk
    fn save(&self) -> Result<()> {
        let file = File::create(&self.store_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &self.data)?;
        Ok(())
    }

    /// Add a macro fuel type; rejects duplicate ids
    pub fn add_macro_fuel_type(&mut self, macro_fuel_type: MacroFuelType) -> Result<()> {
        if self.data.macro_fuel_types.iter().any(|m| m.id == macro_fuel_type.id) {
            return Err(Error::Catalog(format!(
                "macro fuel type '{}' already exists",
                macro_fuel_type.id
            )));
        }
        self.data.macro_fuel_types.push(macro_fuel_type);
        self.save()?;
        Ok(())
    }

    /// Add a fuel-type mapping; rejects a duplicate (fuel type, scope)
    /// pair and mappings to unknown categories
    pub fn add_mapping(&mut self, mapping: FuelTypeMacroMapping) -> Result<()> {
        if !self
            .data
            .macro_fuel_types
            .iter()
            .any(|m| m.id == mapping.macro_fuel_type_id)
        {
            return Err(Error::Catalog(format!(
                "mapping references unknown macro fuel type '{}'",
                mapping.macro_fuel_type_id
            )));
        }
        if self
            .data
            .mappings
            .iter()
            .any(|m| m.fuel_type == mapping.fuel_type && m.scope == mapping.scope)
        {
            return Err(Error::Catalog(format!(
                "fuel type '{}' already mapped for {}",
                mapping.fuel_type, mapping.scope
            )));
        }
        self.data.mappings.push(mapping);
        self.save()?;
        Ok(())
    }

    /// Append a factor row
    ///
    /// Rows are never replaced; a row with a later effective date
    /// supersedes at lookup time.
    pub fn add_factor(&mut self, factor: EmissionFactor) -> Result<()> {
        if !self
            .data
            .macro_fuel_types
            .iter()
            .any(|m| m.id == factor.macro_fuel_type_id)
        {
            return Err(Error::Catalog(format!(
                "factor references unknown macro fuel type '{}'",
                factor.macro_fuel_type_id
            )));
        }
        self.data.factors.push(factor);
        self.save()?;
        Ok(())
    }

    /// Set the active GWP value for a gas, deactivating any previous
    /// active row so at most one row per gas is active
    pub fn set_gwp(&mut self, config: GwpConfig) -> Result<()> {
        let gas = config.gas;
        for row in self.data.gwp.iter_mut().filter(|r| r.gas == gas) {
            row.is_active = false;
        }
        self.data.gwp.push(config);
        self.save()?;
        Ok(())
    }

    /// Number of active GWP rows for a gas (invariant: 0 or 1)
    pub fn active_gwp_count(&self, gas: Gas) -> usize {
        self.data
            .gwp
            .iter()
            .filter(|r| r.gas == gas && r.is_active)
            .count()
    }

    /// All factor rows, unfiltered (audit view)
    pub fn all_factors(&self) -> &[EmissionFactor] {
        &self.data.factors
    }

    /// True when no catalog data has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.data.macro_fuel_types.is_empty()
            && self.data.mappings.is_empty()
            && self.data.factors.is_empty()
            && self.data.gwp.is_empty()
    }

    /// Macro fuel types sorted for display
    pub fn macro_fuel_types_sorted(&self) -> Vec<&MacroFuelType> {
        let mut types: Vec<_> = self.data.macro_fuel_types.iter().collect();
        types.sort_by(|a, b| a.display_order.cmp(&b.display_order).then(a.id.cmp(&b.id)));
        types
    }

    /// All mappings
    pub fn mappings(&self) -> &[FuelTypeMacroMapping] {
        &self.data.mappings
    }

    /// All GWP rows, active and superseded
    pub fn gwp_rows(&self) -> &[GwpConfig] {
        &self.data.gwp
    }
}

impl EmissionCatalogRepository for CatalogStore {
    fn macro_fuel_types(&self) -> std::result::Result<Vec<MacroFuelType>, Error> {
        Ok(self.data.macro_fuel_types.clone())
    }

    fn fuel_type_mappings(&self) -> std::result::Result<Vec<FuelTypeMacroMapping>, Error> {
        Ok(self.data.mappings.clone())
    }

    fn emission_factors(
        &self,
        effective_before: NaiveDate,
    ) -> std::result::Result<Vec<EmissionFactor>, Error> {
        let mut factors: Vec<_> = self
            .data
            .factors
            .iter()
            .filter(|f| f.effective_date <= effective_before)
            .cloned()
            .collect();
        factors.sort_by(|a, b| b.effective_date.cmp(&a.effective_date));
        Ok(factors)
    }

    fn active_gwp_values(&self) -> std::result::Result<Vec<GwpConfig>, Error> {
        Ok(self.data.gwp.iter().filter(|r| r.is_active).cloned().collect())
    }
}
