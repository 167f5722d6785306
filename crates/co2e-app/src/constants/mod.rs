//! Built-in reference data

mod default_catalog;

pub use default_catalog::{
    default_emission_factors, default_fuel_type_mappings, default_gwp_values,
    default_macro_fuel_types, seed_catalog,
};
