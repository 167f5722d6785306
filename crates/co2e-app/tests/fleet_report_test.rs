//! End-to-end report tests over seeded stores

use chrono::NaiveDate;
use tempfile::tempdir;

use co2e_app::constants::seed_catalog;
use co2e_app::report::{fleet_report, single_vehicle_report, ReportPeriod};
use co2e_domain::model::{Engine, FuelRecord, KmReading, Vehicle};
use co2e_store::{CatalogStore, FleetStore};
use co2e_types::Error;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn period() -> ReportPeriod {
    ReportPeriod::new(date(2024, 3, 1), date(2024, 3, 31))
}

fn seeded_catalog(dir: &std::path::Path) -> CatalogStore {
    let mut store = CatalogStore::open(dir.to_path_buf()).expect("Failed to open catalog store");
    seed_catalog(&mut store).expect("Failed to seed catalog");
    store
}

fn add_diesel_van(fleet: &mut FleetStore) -> String {
    let vehicle = Vehicle::new("Transit Custom".to_string())
        .with_engine(Engine::new("diesel").with_co2_g_km(168.0));
    let id = fleet.add_vehicle(vehicle).unwrap();
    fleet
        .add_fuel_record(FuelRecord {
            vehicle_id: id.clone(),
            date: date(2024, 3, 10),
            fuel_type: "diesel".to_string(),
            litres: 55.0,
            kwh: 0.0,
            odometer_km: Some(50600.0),
        })
        .unwrap();
    fleet
        .add_reading(KmReading {
            vehicle_id: id.clone(),
            date: date(2024, 3, 1),
            odometer_km: 50000.0,
        })
        .unwrap();
    fleet
        .add_reading(KmReading {
            vehicle_id: id.clone(),
            date: date(2024, 3, 31),
            odometer_km: 51000.0,
        })
        .unwrap();
    id
}

#[test]
fn test_single_vehicle_report_diesel() {
    let catalog_dir = tempdir().unwrap();
    let fleet_dir = tempdir().unwrap();
    let catalog = seeded_catalog(catalog_dir.path());
    let mut fleet = FleetStore::open(fleet_dir.path().to_path_buf()).unwrap();
    let id = add_diesel_van(&mut fleet);

    let report = single_vehicle_report(&catalog, &fleet, &id, period()).unwrap();

    assert_eq!(report.effective_fuel_type, "diesel");
    assert!((report.km_travelled - 1000.0).abs() < f64::EPSILON);
    assert!((report.litres - 55.0).abs() < f64::EPSILON);
    // 168 g/km * 1000 km / 1000 = 168 kg
    assert!((report.theoretical_kg - 168.0).abs() < f64::EPSILON);
    // 55 L * (2.66155 + 0.00011*28 + 0.00013*265) = 148.4494 -> 148.45 kg
    assert!((report.real_kg - 148.45).abs() < f64::EPSILON);
    assert!((report.delta.absolute_kg - -19.55).abs() < f64::EPSILON);
}

#[test]
fn test_hybrid_vehicle_uses_both_scopes() {
    let catalog_dir = tempdir().unwrap();
    let fleet_dir = tempdir().unwrap();
    let catalog = seeded_catalog(catalog_dir.path());
    let mut fleet = FleetStore::open(fleet_dir.path().to_path_buf()).unwrap();

    let vehicle = Vehicle::new("Yaris Hybrid".to_string())
        .hybrid(true)
        .with_engine(Engine::new("petrol").with_co2_g_km(92.0))
        .with_engine(Engine::new("electric").with_co2_g_km(0.0));
    let id = fleet.add_vehicle(vehicle).unwrap();
    fleet
        .add_fuel_record(FuelRecord {
            vehicle_id: id.clone(),
            date: date(2024, 3, 5),
            fuel_type: "petrol".to_string(),
            litres: 20.0,
            kwh: 0.0,
            odometer_km: Some(20100.0),
        })
        .unwrap();
    fleet
        .add_fuel_record(FuelRecord {
            vehicle_id: id.clone(),
            date: date(2024, 3, 20),
            fuel_type: "electric".to_string(),
            litres: 0.0,
            kwh: 60.0,
            odometer_km: Some(20700.0),
        })
        .unwrap();

    let report = single_vehicle_report(&catalog, &fleet, &id, period()).unwrap();

    assert_eq!(report.effective_fuel_type, "petrol-hybrid");
    assert!((report.co2_g_km - 92.0).abs() < f64::EPSILON);
    // Odometer readings come from the two fuel records: 600 km
    assert!((report.km_travelled - 600.0).abs() < f64::EPSILON);
    // Petrol: 20 L * (2.31467 + 0.00025*28 + 0.00007*265) = 46.8044 raw
    // Electricity: 60 kWh * (0.20705 + 0.00011*28 + 0.00002*265) = 12.9258 raw
    // Total rounded once: 59.7302 -> 59.73
    assert!((report.real_kg - 59.73).abs() < f64::EPSILON);
    assert!(report.real_kg > 0.0);
    assert!(report.kwh > 0.0 && report.litres > 0.0);
}

#[test]
fn test_fleet_report_skips_insufficient_data() {
    let catalog_dir = tempdir().unwrap();
    let fleet_dir = tempdir().unwrap();
    let catalog = seeded_catalog(catalog_dir.path());
    let mut fleet = FleetStore::open(fleet_dir.path().to_path_buf()).unwrap();
    add_diesel_van(&mut fleet);

    // One odometer reading only: excluded, not reported as zero
    let sparse = Vehicle::new("Sparse".to_string())
        .with_engine(Engine::new("petrol").with_co2_g_km(130.0));
    let sparse_id = fleet.add_vehicle(sparse).unwrap();
    fleet
        .add_reading(KmReading {
            vehicle_id: sparse_id.clone(),
            date: date(2024, 3, 1),
            odometer_km: 10000.0,
        })
        .unwrap();

    let report = fleet_report(&catalog, &fleet, period()).unwrap();

    assert_eq!(report.entries.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].vehicle_id, sparse_id);
    assert!((report.total_theoretical_kg - 168.0).abs() < f64::EPSILON);
    assert!((report.total_real_kg - 148.45).abs() < f64::EPSILON);
}

#[test]
fn test_single_and_fleet_paths_agree() {
    let catalog_dir = tempdir().unwrap();
    let fleet_dir = tempdir().unwrap();
    let catalog = seeded_catalog(catalog_dir.path());
    let mut fleet = FleetStore::open(fleet_dir.path().to_path_buf()).unwrap();
    let id = add_diesel_van(&mut fleet);

    let single = single_vehicle_report(&catalog, &fleet, &id, period()).unwrap();
    let fleet_wide = fleet_report(&catalog, &fleet, period()).unwrap();

    assert_eq!(fleet_wide.entries.len(), 1);
    assert_eq!(fleet_wide.entries[0], single);
}

#[test]
fn test_missing_vehicle_errors() {
    let catalog_dir = tempdir().unwrap();
    let fleet_dir = tempdir().unwrap();
    let catalog = seeded_catalog(catalog_dir.path());
    let fleet = FleetStore::open(fleet_dir.path().to_path_buf()).unwrap();

    let result = single_vehicle_report(&catalog, &fleet, "no-such-id", period());
    assert!(matches!(result, Err(Error::VehicleNotFound(_))));
}
