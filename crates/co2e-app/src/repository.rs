//! Repository adapters for the persistence layer

use std::path::PathBuf;

use chrono::NaiveDate;

use co2e_domain::model::{EmissionFactor, FuelTypeMacroMapping, GwpConfig, MacroFuelType};
use co2e_domain::repository::EmissionCatalogRepository;
use co2e_infra::persistence::FileCatalogRepository;
use co2e_store::{CatalogStore, FleetStore};
use co2e_types::{Error, Result};

use crate::config::Config;

/// The catalog backing a resolution call: the JSON store by default, a
/// CSV directory when one is configured
pub enum CatalogSource {
    Store(CatalogStore),
    Csv(FileCatalogRepository),
}

/// Open whichever catalog backend the config selects
pub fn open_catalog(config: &Config) -> Result<CatalogSource> {
    match &config.catalog_csv_dir {
        Some(dir) => Ok(CatalogSource::Csv(FileCatalogRepository::new(dir.clone())?)),
        None => Ok(CatalogSource::Store(open_catalog_store(config)?)),
    }
}

impl EmissionCatalogRepository for CatalogSource {
    fn macro_fuel_types(&self) -> std::result::Result<Vec<MacroFuelType>, Error> {
        match self {
            CatalogSource::Store(store) => store.macro_fuel_types(),
            CatalogSource::Csv(repo) => repo.macro_fuel_types(),
        }
    }

    fn fuel_type_mappings(&self) -> std::result::Result<Vec<FuelTypeMacroMapping>, Error> {
        match self {
            CatalogSource::Store(store) => store.fuel_type_mappings(),
            CatalogSource::Csv(repo) => repo.fuel_type_mappings(),
        }
    }

    fn emission_factors(
        &self,
        effective_before: NaiveDate,
    ) -> std::result::Result<Vec<EmissionFactor>, Error> {
        match self {
            CatalogSource::Store(store) => store.emission_factors(effective_before),
            CatalogSource::Csv(repo) => repo.emission_factors(effective_before),
        }
    }

    fn active_gwp_values(&self) -> std::result::Result<Vec<GwpConfig>, Error> {
        match self {
            CatalogSource::Store(store) => store.active_gwp_values(),
            CatalogSource::Csv(repo) => repo.active_gwp_values(),
        }
    }
}

/// Open the JSON catalog store
pub fn open_catalog_store(config: &Config) -> Result<CatalogStore> {
    let store_dir = config.store_dir()?;
    CatalogStore::open(store_dir)
}

/// Open the JSON fleet store
pub fn open_fleet_store(config: &Config) -> Result<FleetStore> {
    let store_dir = config.store_dir()?;
    FleetStore::open(store_dir)
}

/// Open the catalog store at a custom directory
pub fn open_catalog_store_at(store_dir: PathBuf) -> Result<CatalogStore> {
    CatalogStore::open(store_dir)
}

/// Open the fleet store at a custom directory
pub fn open_fleet_store_at(store_dir: PathBuf) -> Result<FleetStore> {
    FleetStore::open(store_dir)
}

/// Open a CSV catalog directory as a read-only repository
pub fn open_csv_catalog(catalog_dir: PathBuf) -> Result<FileCatalogRepository> {
    FileCatalogRepository::new(catalog_dir)
}
