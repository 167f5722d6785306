//! Fleet data store
//!
//! Vehicles (with embedded engine records), fuel records and dedicated
//! odometer readings in a single JSON file.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use co2e_domain::model::{Engine, FuelRecord, KmReading, Vehicle};
use co2e_domain::repository::FleetRepository;
use co2e_types::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FleetData {
    #[serde(default)]
    vehicles: HashMap<String, Vehicle>,
    #[serde(default)]
    fuel_records: Vec<FuelRecord>,
    #[serde(default)]
    readings: Vec<KmReading>,
}

/// Persistent store for fleet vehicles and their consumption records
pub struct FleetStore {
    store_path: PathBuf,
    data: FleetData,
}

impl FleetStore {
    /// Create or load a fleet store
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("fleet.json");

        let data = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).unwrap_or_default()
        } else {
            FleetData::default()
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

    /// Add a new vehicle, returning its id
    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<String> {
        let id = vehicle.id.clone();
        self.data.vehicles.insert(id.clone(), vehicle);
        self.save()?;
        Ok(id)
    }

    /// Record a refuelling/charging event; the vehicle must exist
    pub fn add_fuel_record(&mut self, record: FuelRecord) -> Result<()> {
        self.require_vehicle(&record.vehicle_id)?;
        self.data.fuel_records.push(record);
        self.save()?;
        Ok(())
    }

    /// Record a dedicated odometer reading; the vehicle must exist
    pub fn add_reading(&mut self, reading: KmReading) -> Result<()> {
        self.require_vehicle(&reading.vehicle_id)?;
        self.data.readings.push(reading);
        self.save()?;
        Ok(())
    }

    /// Get a vehicle by id
    pub fn get_vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.data.vehicles.get(id)
    }

    /// All vehicles sorted by name
    pub fn all_vehicles(&self) -> Vec<&Vehicle> {
        let mut vehicles: Vec<_> = self.data.vehicles.values().collect();
        vehicles.sort_by(|a, b| a.name.cmp(&b.name));
        vehicles
    }

    /// Total vehicle count
    pub fn count(&self) -> usize {
        self.data.vehicles.len()
    }

    fn require_vehicle(&self, vehicle_id: &str) -> Result<()> {
        if self.data.vehicles.contains_key(vehicle_id) {
            Ok(())
        } else {
            Err(Error::VehicleNotFound(vehicle_id.to_string()))
        }
    }
}

impl FleetRepository for FleetStore {
    fn find_all_vehicles(&self) -> std::result::Result<Vec<Vehicle>, Error> {
        Ok(self.all_vehicles().into_iter().cloned().collect())
    }

    fn find_vehicle(&self, vehicle_id: &str) -> std::result::Result<Option<Vehicle>, Error> {
        Ok(self.data.vehicles.get(vehicle_id).cloned())
    }

    fn engines(&self, vehicle_id: &str) -> std::result::Result<Vec<Engine>, Error> {
        Ok(self
            .data
            .vehicles
            .get(vehicle_id)
            .map(|v| v.engines.clone())
            .unwrap_or_default())
    }

    fn fuel_records(
        &self,
        vehicle_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> std::result::Result<Vec<FuelRecord>, Error> {
        let mut records: Vec<_> = self
            .data
            .fuel_records
            .iter()
            .filter(|r| r.vehicle_id == vehicle_id && r.date >= from && r.date <= to)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    fn odometer_readings(
        &self,
        vehicle_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> std::result::Result<Vec<KmReading>, Error> {
        let mut readings: Vec<KmReading> = self
            .data
            .readings
            .iter()
            .filter(|r| r.vehicle_id == vehicle_id && r.date >= from && r.date <= to)
            .cloned()
            .collect();

        // Fuel-record odometers count as readings too
        for record in self.data.fuel_records.iter().filter(|r| {
            r.vehicle_id == vehicle_id && r.date >= from && r.date <= to
        }) {
            if let Some(odometer_km) = record.odometer_km {
                readings.push(KmReading {
                    vehicle_id: record.vehicle_id.clone(),
                    date: record.date,
                    odometer_km,
                });
            }
        }

        readings.sort_by_key(|r| r.date);
        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_vehicle_roundtrip() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let id;
        {
            let mut store = FleetStore::open(temp_dir.path().to_path_buf()).unwrap();
            let vehicle = Vehicle::new("Transit Custom".to_string())
                .with_license_plate("AB-123-CD".to_string())
                .with_engine(Engine::new("diesel").with_co2_g_km(168.0));
            id = store.add_vehicle(vehicle).unwrap();
            assert_eq!(store.count(), 1);
        }

        let store = FleetStore::open(temp_dir.path().to_path_buf()).unwrap();
        let vehicle = store.get_vehicle(&id).expect("Vehicle not found");
        assert_eq!(vehicle.name, "Transit Custom");
        assert_eq!(store.engines(&id).unwrap().len(), 1);
    }

    #[test]
    fn test_fuel_record_requires_vehicle() {
        let temp_dir = tempdir().unwrap();
        let mut store = FleetStore::open(temp_dir.path().to_path_buf()).unwrap();
        let result = store.add_fuel_record(FuelRecord {
            vehicle_id: "missing".to_string(),
            date: date(2024, 3, 1),
            fuel_type: "diesel".to_string(),
            litres: 40.0,
            kwh: 0.0,
            odometer_km: None,
        });
        assert!(matches!(result, Err(Error::VehicleNotFound(_))));
    }

    #[test]
    fn test_odometer_merge_and_order() {
        let temp_dir = tempdir().unwrap();
        let mut store = FleetStore::open(temp_dir.path().to_path_buf()).unwrap();
        let id = store.add_vehicle(Vehicle::new("Kangoo".to_string())).unwrap();

        store
            .add_reading(KmReading {
                vehicle_id: id.clone(),
                date: date(2024, 3, 20),
                odometer_km: 50900.0,
            })
            .unwrap();
        store
            .add_fuel_record(FuelRecord {
                vehicle_id: id.clone(),
                date: date(2024, 3, 5),
                fuel_type: "diesel".to_string(),
                litres: 42.0,
                kwh: 0.0,
                odometer_km: Some(50100.0),
            })
            .unwrap();
        store
            .add_reading(KmReading {
                vehicle_id: id.clone(),
                date: date(2024, 3, 1),
                odometer_km: 50000.0,
            })
            .unwrap();

        let readings = store
            .odometer_readings(&id, date(2024, 3, 1), date(2024, 3, 31))
            .unwrap();
        assert_eq!(readings.len(), 3);
        assert_eq!(readings[0].odometer_km, 50000.0);
        assert_eq!(readings[1].odometer_km, 50100.0);
        assert_eq!(readings[2].odometer_km, 50900.0);
    }

    #[test]
    fn test_date_range_filter() {
        let temp_dir = tempdir().unwrap();
        let mut store = FleetStore::open(temp_dir.path().to_path_buf()).unwrap();
        let id = store.add_vehicle(Vehicle::new("Sprinter".to_string())).unwrap();

        for (month, litres) in [(1, 30.0), (2, 35.0), (3, 40.0)] {
            store
                .add_fuel_record(FuelRecord {
                    vehicle_id: id.clone(),
                    date: date(2024, month, 10),
                    fuel_type: "diesel".to_string(),
                    litres,
                    kwh: 0.0,
                    odometer_km: None,
                })
                .unwrap();
        }

        let records = store.fuel_records(&id, date(2024, 2, 1), date(2024, 2, 29)).unwrap();
        assert_eq!(records.len(), 1);
        assert!((records[0].litres - 35.0).abs() < f64::EPSILON);
    }
}
