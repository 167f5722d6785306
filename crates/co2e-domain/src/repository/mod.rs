//! Repository trait definitions for the persistence collaborators

use chrono::NaiveDate;

use crate::model::{
    EmissionFactor, Engine, FuelRecord, FuelTypeMacroMapping, GwpConfig, KmReading, MacroFuelType,
    Vehicle,
};
use co2e_types::Error;

/// Read-only catalog accessors for emission resolution
#[allow(dead_code)]
pub trait EmissionCatalogRepository {
    /// All macro fuel types
    fn macro_fuel_types(&self) -> Result<Vec<MacroFuelType>, Error>;

    /// All fuel-type-to-macro mappings
    fn fuel_type_mappings(&self) -> Result<Vec<FuelTypeMacroMapping>, Error>;

    /// All factor rows with `effective_date <= effective_before`
    fn emission_factors(&self, effective_before: NaiveDate) -> Result<Vec<EmissionFactor>, Error>;

    /// Currently active GWP rows (at most one per gas)
    fn active_gwp_values(&self) -> Result<Vec<GwpConfig>, Error>;
}

/// Read-only fleet data accessors
#[allow(dead_code)]
pub trait FleetRepository {
    /// All registered vehicles
    fn find_all_vehicles(&self) -> Result<Vec<Vehicle>, Error>;

    /// Find a vehicle by id
    fn find_vehicle(&self, vehicle_id: &str) -> Result<Option<Vehicle>, Error>;

    /// Engine records of a vehicle
    fn engines(&self, vehicle_id: &str) -> Result<Vec<Engine>, Error>;

    /// Fuel records of a vehicle within a date range (inclusive),
    /// ordered by date
    fn fuel_records(
        &self,
        vehicle_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FuelRecord>, Error>;

    /// Odometer readings of a vehicle within a date range (inclusive):
    /// dedicated readings and fuel-record odometers, merged and ordered
    /// by date
    fn odometer_readings(
        &self,
        vehicle_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<KmReading>, Error>;
}
