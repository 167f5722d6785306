//! Error types for co2e-checker

use chrono::NaiveDate;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[allow(dead_code)]
    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("CSV loader error: {0}")]
    CsvLoader(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    /// No emission factor is in effect for the fuel type as of the
    /// reference date. Hard stop on the single-lookup path: a silent
    /// zero would report the vehicle as emission-free.
    #[error("no emission factor for '{fuel_type}' (category '{macro_fuel_type_id}') as of {reference_date}")]
    FactorNotFound {
        fuel_type: String,
        macro_fuel_type_id: String,
        reference_date: NaiveDate,
    },

    /// No fuel-type-to-macro mapping exists. Softer than
    /// `FactorNotFound`: resolvers return an empty context list instead
    /// of surfacing this variant.
    #[allow(dead_code)]
    #[error("no macro fuel type mapping for '{0}'")]
    MappingNotFound(String),

    /// Not enough data to include the vehicle in a period's results.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
