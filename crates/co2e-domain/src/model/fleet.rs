//! Fleet entities consumed by the engine
//!
//! Vehicles, engines, fuel records and odometer readings are owned by
//! the persistence collaborators; the engine only reads them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One engine record of a vehicle's technical specification
///
/// Hybrid vehicles carry two engine records; the electric engine's own
/// CO2/km figure is zero by definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    /// Raw fuel type string (e.g. "petrol", "electric")
    pub fuel_type: String,
    /// Manufacturer-declared CO2 g/km (combined cycle)
    #[serde(default)]
    pub co2_g_km: Option<f64>,
    /// Displacement in cc (thermal engines)
    #[serde(default)]
    pub displacement_cc: Option<u32>,
    /// Rated power in kW
    #[serde(default)]
    pub power_kw: Option<f64>,
}

impl Engine {
    pub fn new(fuel_type: &str) -> Self {
        Self {
            fuel_type: fuel_type.to_string(),
            co2_g_km: None,
            displacement_cc: None,
            power_kw: None,
        }
    }

    pub fn with_co2_g_km(mut self, co2_g_km: f64) -> Self {
        self.co2_g_km = Some(co2_g_km);
        self
    }

    pub fn with_power_kw(mut self, power_kw: f64) -> Self {
        self.power_kw = Some(power_kw);
        self
    }
}

/// A registered fleet vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier
    pub id: String,
    /// Vehicle name or model
    pub name: String,
    /// License plate (optional)
    #[serde(default)]
    pub license_plate: Option<String>,
    /// Declared dual-engine hybrid
    #[serde(default)]
    pub is_hybrid: bool,
    /// Technical specification, one record per engine
    #[serde(default)]
    pub engines: Vec<Engine>,
    /// When registered
    pub registered_at: chrono::DateTime<chrono::Utc>,
}

impl Vehicle {
    pub fn new(name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            license_plate: None,
            is_hybrid: false,
            engines: Vec::new(),
            registered_at: chrono::Utc::now(),
        }
    }

    pub fn with_license_plate(mut self, plate: String) -> Self {
        self.license_plate = Some(plate);
        self
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engines.push(engine);
        self
    }

    pub fn hybrid(mut self, is_hybrid: bool) -> Self {
        self.is_hybrid = is_hybrid;
        self
    }
}

/// A refuelling or charging event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelRecord {
    pub vehicle_id: String,
    pub date: NaiveDate,
    /// Fuel type as recorded at the pump/charger
    pub fuel_type: String,
    /// Litres refuelled (0 for a pure charging event)
    #[serde(default)]
    pub litres: f64,
    /// kWh charged (0 for a pure refuelling event)
    #[serde(default)]
    pub kwh: f64,
    /// Odometer reading taken at the event, if any
    #[serde(default)]
    pub odometer_km: Option<f64>,
}

/// A dedicated odometer reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KmReading {
    pub vehicle_id: String,
    pub date: NaiveDate,
    pub odometer_km: f64,
}
