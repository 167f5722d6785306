//! Domain services

pub mod calculator;
pub mod factor_lookup;
pub mod hybrid;
pub mod resolver;

pub use calculator::{
    calculate_scoped_emissions, calculate_vehicle_emissions, emission_delta, real_emissions_kg,
    round2, theoretical_emissions_kg, EmissionDelta, GasContribution, ScopeConsumption,
    ScopedEmissions, VehicleEmissions,
};
pub use factor_lookup::FactorIndex;
pub use hybrid::{classify_vehicle, FuelClass, VehicleClassification, UNKNOWN_FUEL_TYPE};
pub use resolver::ContextResolver;
