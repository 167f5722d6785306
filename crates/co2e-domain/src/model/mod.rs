//! Domain model types

pub mod context;
pub mod emission_factor;
pub mod fleet;
pub mod gwp;
pub mod macro_fuel_type;
pub mod mapping;

pub use context::EmissionContext;
pub use emission_factor::{EmissionFactor, GasFactorSet};
pub use fleet::{Engine, FuelRecord, KmReading, Vehicle};
pub use gwp::{GwpConfig, GwpSet};
pub use macro_fuel_type::MacroFuelType;
pub use mapping::FuelTypeMacroMapping;
