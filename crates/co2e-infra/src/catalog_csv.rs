//! CSV loaders for the emission catalog
//!
//! Four UTF-8 CSV files make up an importable catalog:
//!
//! - `macro_fuel_types.csv`: id,name,scope,unit,display_order
//! - `mappings.csv`: fuel_type,macro_fuel_type_id,scope
//! - `factors.csv`: macro_fuel_type_id,fuel_type,co2,ch4,n2o,hfc,pfc,sf6,nf3,source,effective_date
//! - `gwp.csv`: gas,value,source
//!
//! An empty `fuel_type` column in `factors.csv` means the row is the
//! category default; scope columns take 1 or 2; dates are `YYYY-MM-DD`.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use co2e_domain::model::{EmissionFactor, FuelTypeMacroMapping, GasFactorSet, GwpConfig, MacroFuelType};
use co2e_types::{EmissionScope, Gas, MeasurementUnit};

#[derive(Error, Debug)]
pub enum CatalogCsvError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid scope in row {row}: {value} (expected 1 or 2)")]
    InvalidScope { row: usize, value: String },

    #[error("Invalid unit in row {row}: {value}")]
    InvalidUnit { row: usize, value: String },

    #[error("Invalid gas in row {row}: {value}")]
    InvalidGas { row: usize, value: String },

    #[error("Invalid date in row {row}: {value} (expected YYYY-MM-DD)")]
    InvalidDate { row: usize, value: String },

    #[error("Negative factor in row {row}: {column} = {value}")]
    NegativeFactor {
        row: usize,
        column: &'static str,
        value: f64,
    },
}

fn reader<P: AsRef<Path>>(path: P) -> Result<csv::Reader<std::fs::File>, CatalogCsvError> {
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?)
}

fn parse_scope(value: &str, row: usize) -> Result<EmissionScope, CatalogCsvError> {
    value
        .parse::<u8>()
        .ok()
        .and_then(EmissionScope::from_number)
        .ok_or_else(|| CatalogCsvError::InvalidScope {
            row,
            value: value.to_string(),
        })
}

#[derive(Debug, Deserialize)]
struct MacroFuelTypeRow {
    id: String,
    name: String,
    scope: String,
    unit: String,
    #[serde(default)]
    display_order: u32,
}

/// Load macro fuel types from CSV
pub fn load_macro_fuel_types<P: AsRef<Path>>(path: P) -> Result<Vec<MacroFuelType>, CatalogCsvError> {
    let mut types = Vec::new();
    for (idx, result) in reader(path)?.deserialize().enumerate() {
        let row: MacroFuelTypeRow = result?;
        let row_num = idx + 2;
        let scope = parse_scope(&row.scope, row_num)?;
        let unit = match row.unit.as_str() {
            "L" | "litre" => MeasurementUnit::Litre,
            "kg" | "kilogram" => MeasurementUnit::Kilogram,
            "kWh" | "kilowatt_hour" => MeasurementUnit::KilowattHour,
            "m3" | "cubic_metre" => MeasurementUnit::CubicMetre,
            other => {
                return Err(CatalogCsvError::InvalidUnit {
                    row: row_num,
                    value: other.to_string(),
                })
            }
        };
        types.push(
            MacroFuelType::new(&row.id, &row.name, scope, unit).with_display_order(row.display_order),
        );
    }
    Ok(types)
}

#[derive(Debug, Deserialize)]
struct MappingRow {
    fuel_type: String,
    macro_fuel_type_id: String,
    scope: String,
}

/// Load fuel-type mappings from CSV
pub fn load_mappings<P: AsRef<Path>>(path: P) -> Result<Vec<FuelTypeMacroMapping>, CatalogCsvError> {
    let mut mappings = Vec::new();
    for (idx, result) in reader(path)?.deserialize().enumerate() {
        let row: MappingRow = result?;
        let scope = parse_scope(&row.scope, idx + 2)?;
        mappings.push(FuelTypeMacroMapping::new(
            &row.fuel_type,
            &row.macro_fuel_type_id,
            scope,
        ));
    }
    Ok(mappings)
}

#[derive(Debug, Deserialize)]
struct FactorRow {
    macro_fuel_type_id: String,
    #[serde(default)]
    fuel_type: String,
    #[serde(default)]
    co2: f64,
    #[serde(default)]
    ch4: f64,
    #[serde(default)]
    n2o: f64,
    #[serde(default)]
    hfc: f64,
    #[serde(default)]
    pfc: f64,
    #[serde(default)]
    sf6: f64,
    #[serde(default)]
    nf3: f64,
    source: String,
    effective_date: String,
}

/// Load emission factor rows from CSV
pub fn load_factors<P: AsRef<Path>>(path: P) -> Result<Vec<EmissionFactor>, CatalogCsvError> {
    let mut factors = Vec::new();
    for (idx, result) in reader(path)?.deserialize().enumerate() {
        let row: FactorRow = result?;
        let row_num = idx + 2;

        let gases = GasFactorSet {
            co2: row.co2,
            ch4: row.ch4,
            n2o: row.n2o,
            hfc: row.hfc,
            pfc: row.pfc,
            sf6: row.sf6,
            nf3: row.nf3,
        };
        for (column, value) in [
            ("co2", gases.co2),
            ("ch4", gases.ch4),
            ("n2o", gases.n2o),
            ("hfc", gases.hfc),
            ("pfc", gases.pfc),
            ("sf6", gases.sf6),
            ("nf3", gases.nf3),
        ] {
            if value < 0.0 {
                return Err(CatalogCsvError::NegativeFactor {
                    row: row_num,
                    column,
                    value,
                });
            }
        }

        let effective_date = NaiveDate::parse_from_str(&row.effective_date, "%Y-%m-%d").map_err(
            |_| CatalogCsvError::InvalidDate {
                row: row_num,
                value: row.effective_date.clone(),
            },
        )?;

        let mut factor =
            EmissionFactor::new(&row.macro_fuel_type_id, gases, &row.source, effective_date);
        if !row.fuel_type.is_empty() {
            factor = factor.for_fuel_type(&row.fuel_type);
        }
        factors.push(factor);
    }
    Ok(factors)
}

#[derive(Debug, Deserialize)]
struct GwpRow {
    gas: String,
    value: f64,
    source: String,
}

/// Load active GWP rows from CSV
pub fn load_gwp<P: AsRef<Path>>(path: P) -> Result<Vec<GwpConfig>, CatalogCsvError> {
    let mut configs = Vec::new();
    for (idx, result) in reader(path)?.deserialize().enumerate() {
        let row: GwpRow = result?;
        let gas = match row.gas.to_lowercase().as_str() {
            "co2" => Gas::Co2,
            "ch4" => Gas::Ch4,
            "n2o" => Gas::N2o,
            "hfc" => Gas::Hfc,
            "pfc" => Gas::Pfc,
            "sf6" => Gas::Sf6,
            "nf3" => Gas::Nf3,
            other => {
                return Err(CatalogCsvError::InvalidGas {
                    row: idx + 2,
                    value: other.to_string(),
                })
            }
        };
        configs.push(GwpConfig::new(gas, row.value, &row.source));
    }
    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_factors() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "factors.csv",
            "macro_fuel_type_id,fuel_type,co2,ch4,n2o,hfc,pfc,sf6,nf3,source,effective_date\n\
             diesel,,2.66,0.0001,0.00013,0,0,0,0,DEFRA 2024,2024-01-01\n\
             diesel,biodiesel-blend,2.40,0.0001,0.00013,0,0,0,0,DEFRA 2024 B7,2024-01-01\n",
        );
        let factors = load_factors(&path).unwrap();
        assert_eq!(factors.len(), 2);
        assert_eq!(factors[0].fuel_type, None);
        assert!((factors[0].gases.co2 - 2.66).abs() < 1e-9);
        assert_eq!(factors[1].fuel_type.as_deref(), Some("biodiesel-blend"));
        assert_eq!(
            factors[0].effective_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_load_factors_rejects_negative() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "factors.csv",
            "macro_fuel_type_id,fuel_type,co2,ch4,n2o,hfc,pfc,sf6,nf3,source,effective_date\n\
             diesel,,-1.0,0,0,0,0,0,0,bad,2024-01-01\n",
        );
        assert!(matches!(
            load_factors(&path),
            Err(CatalogCsvError::NegativeFactor { .. })
        ));
    }

    #[test]
    fn test_load_factors_rejects_bad_date() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "factors.csv",
            "macro_fuel_type_id,fuel_type,co2,ch4,n2o,hfc,pfc,sf6,nf3,source,effective_date\n\
             diesel,,2.66,0,0,0,0,0,0,DEFRA,01/01/2024\n",
        );
        assert!(matches!(
            load_factors(&path),
            Err(CatalogCsvError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_load_macro_fuel_types() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "macro_fuel_types.csv",
            "id,name,scope,unit,display_order\n\
             diesel,Diesel,1,L,1\n\
             grid-electricity,Grid Electricity,2,kWh,4\n",
        );
        let types = load_macro_fuel_types(&path).unwrap();
        assert_eq!(types.len(), 2);
        assert_eq!(types[0].scope, EmissionScope::Thermal);
        assert_eq!(types[1].unit, MeasurementUnit::KilowattHour);
    }

    #[test]
    fn test_load_mappings_rejects_bad_scope() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "mappings.csv",
            "fuel_type,macro_fuel_type_id,scope\ndiesel,diesel,3\n",
        );
        assert!(matches!(
            load_mappings(&path),
            Err(CatalogCsvError::InvalidScope { .. })
        ));
    }

    #[test]
    fn test_load_gwp() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "gwp.csv",
            "gas,value,source\nco2,1,IPCC AR5\nch4,28,IPCC AR5\nn2o,265,IPCC AR5\n",
        );
        let configs = load_gwp(&path).unwrap();
        assert_eq!(configs.len(), 3);
        assert_eq!(configs[1].gas, Gas::Ch4);
        assert!((configs[1].value - 28.0).abs() < f64::EPSILON);
    }
}
