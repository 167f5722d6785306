//! CSV-directory-backed implementation of EmissionCatalogRepository
//!
//! Serves a directory of catalog CSV files (the format documented in
//! [`crate::catalog_csv`]) through the read-only catalog contract, so a
//! published factor set can drive resolution without going through a
//! JSON store first.

use std::path::PathBuf;

use chrono::NaiveDate;

use co2e_domain::model::{EmissionFactor, FuelTypeMacroMapping, GwpConfig, MacroFuelType};
use co2e_domain::repository::EmissionCatalogRepository;
use co2e_types::Error;

use crate::catalog_csv;

/// CSV-file-backed emission catalog
pub struct FileCatalogRepository {
    catalog_dir: PathBuf,
    macro_fuel_types: Vec<MacroFuelType>,
    mappings: Vec<FuelTypeMacroMapping>,
    factors: Vec<EmissionFactor>,
    gwp: Vec<GwpConfig>,
}

impl FileCatalogRepository {
    /// Load a catalog from a directory containing
    /// `macro_fuel_types.csv`, `mappings.csv`, `factors.csv`, `gwp.csv`
    pub fn new(catalog_dir: PathBuf) -> Result<Self, Error> {
        let macro_fuel_types = catalog_csv::load_macro_fuel_types(catalog_dir.join("macro_fuel_types.csv"))
            .map_err(|e| Error::CsvLoader(e.to_string()))?;
        let mappings = catalog_csv::load_mappings(catalog_dir.join("mappings.csv"))
            .map_err(|e| Error::CsvLoader(e.to_string()))?;
        let factors = catalog_csv::load_factors(catalog_dir.join("factors.csv"))
            .map_err(|e| Error::CsvLoader(e.to_string()))?;
        let gwp = catalog_csv::load_gwp(catalog_dir.join("gwp.csv"))
            .map_err(|e| Error::CsvLoader(e.to_string()))?;

        Ok(Self {
            catalog_dir,
            macro_fuel_types,
            mappings,
            factors,
            gwp,
        })
    }

    /// The directory this catalog was loaded from
    pub fn catalog_dir(&self) -> &PathBuf {
        &self.catalog_dir
    }

    /// Reload all four files from disk
    pub fn reload(&mut self) -> Result<(), Error> {
        *self = Self::new(self.catalog_dir.clone())?;
        Ok(())
    }
}

impl EmissionCatalogRepository for FileCatalogRepository {
    fn macro_fuel_types(&self) -> Result<Vec<MacroFuelType>, Error> {
        Ok(self.macro_fuel_types.clone())
    }

    fn fuel_type_mappings(&self) -> Result<Vec<FuelTypeMacroMapping>, Error> {
        Ok(self.mappings.clone())
    }

    fn emission_factors(&self, effective_before: NaiveDate) -> Result<Vec<EmissionFactor>, Error> {
        let mut factors: Vec<_> = self
            .factors
            .iter()
            .filter(|f| f.effective_date <= effective_before)
            .cloned()
            .collect();
        factors.sort_by(|a, b| b.effective_date.cmp(&a.effective_date));
        Ok(factors)
    }

    fn active_gwp_values(&self) -> Result<Vec<GwpConfig>, Error> {
        Ok(self.gwp.iter().filter(|g| g.is_active).cloned().collect())
    }
}
