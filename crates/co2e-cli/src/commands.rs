//! Command handlers

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use indicatif::{ProgressBar, ProgressStyle};

use co2e_app::config::Config;
use co2e_app::constants::seed_catalog;
use co2e_app::report::{
    fleet_report, single_vehicle_report, vehicle_report, FleetEmissionReport, ReportPeriod,
    SkippedVehicle, VehicleEmissionReport,
};
use co2e_app::repository::{open_catalog, open_catalog_store, open_fleet_store, CatalogSource};
use co2e_domain::model::{EmissionContext, Engine, FuelRecord, KmReading, Vehicle};
use co2e_domain::repository::FleetRepository;
use co2e_domain::service::{classify_vehicle, emission_delta, round2, ContextResolver};
use co2e_infra::catalog_csv;
use co2e_store::FleetStore;
use co2e_types::{Error, Result};

use crate::cli::{Cli, Commands};
use crate::output;

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let format = cli.format.unwrap_or(config.output_format);

    match cli.command {
        Commands::Resolve { fuel_type, date } => {
            let reference_date = date.unwrap_or_else(|| chrono::Utc::now().date_naive());
            let catalog = open_catalog(&config)?;
            let resolver = ContextResolver::new(&catalog);
            let contexts = resolver.resolve(&fuel_type, reference_date)?;
            if contexts.is_empty() {
                eprintln!(
                    "No mapping for fuel type '{}'; real emissions are unknown for it",
                    fuel_type
                );
            }
            output::output_contexts(format, &fuel_type, reference_date, &contexts)
        }

        Commands::Classify { vehicle, from, to } => {
            let fleet = open_fleet_store(&config)?;
            let found = fleet
                .find_vehicle(&vehicle)?
                .ok_or_else(|| Error::VehicleNotFound(vehicle.clone()))?;
            let from = from.unwrap_or(chrono::NaiveDate::MIN);
            let to = to.unwrap_or(chrono::NaiveDate::MAX);
            let engines = fleet.engines(&vehicle)?;
            let fuel_records = fleet.fuel_records(&vehicle, from, to)?;
            let classification = classify_vehicle(found.is_hybrid, &engines, &fuel_records);
            output::output_classification(format, &found, &classification)
        }

        Commands::Report {
            from,
            to,
            vehicle,
            jobs,
        } => {
            let period = ReportPeriod::new(from, to);
            let catalog = open_catalog(&config)?;
            let fleet = open_fleet_store(&config)?;

            if let Some(vehicle_id) = vehicle {
                let report = single_vehicle_report(&catalog, &fleet, &vehicle_id, period)?;
                return output::output_vehicle_report(format, &report);
            }

            let jobs = match jobs {
                Some(0) => num_cpus::get(),
                Some(n) => n,
                None => 1,
            };
            let report = if jobs <= 1 {
                fleet_report(&catalog, &fleet, period)?
            } else {
                parallel_fleet_report(&catalog, fleet, period, jobs, cli.verbose)?
            };
            output::output_fleet_report(format, &report)
        }

        Commands::Catalog { init, import, show } => {
            let mut store = open_catalog_store(&config)?;

            if init {
                if !store.is_empty() {
                    return Err(Error::Catalog(
                        "catalog already contains data; init works on an empty store only".to_string(),
                    ));
                }
                seed_catalog(&mut store)?;
                println!("Seeded default catalog into {:?}", config.store_dir()?);
            }

            if let Some(dir) = &import {
                import_catalog_csvs(&mut store, dir)?;
                println!("Imported catalog CSVs from {:?}", dir);
            }

            if show || (!init && import.is_none()) {
                output::output_catalog(format, &store)?;
            }
            Ok(())
        }

        Commands::AddVehicle {
            name,
            plate,
            hybrid,
            engine,
        } => {
            let mut fleet = open_fleet_store(&config)?;
            let mut vehicle = Vehicle::new(name).hybrid(hybrid);
            if let Some(plate) = plate {
                vehicle = vehicle.with_license_plate(plate);
            }
            for spec in &engine {
                vehicle = vehicle.with_engine(parse_engine_spec(spec)?);
            }
            let id = fleet.add_vehicle(vehicle)?;
            println!("Registered vehicle {}", id);
            Ok(())
        }

        Commands::AddFuel {
            vehicle,
            date,
            fuel_type,
            litres,
            kwh,
            odometer,
        } => {
            let mut fleet = open_fleet_store(&config)?;
            fleet.add_fuel_record(FuelRecord {
                vehicle_id: vehicle.clone(),
                date,
                fuel_type,
                litres,
                kwh,
                odometer_km: odometer,
            })?;
            println!("Recorded fuel event for {} on {}", vehicle, date);
            Ok(())
        }

        Commands::AddReading {
            vehicle,
            date,
            odometer,
        } => {
            let mut fleet = open_fleet_store(&config)?;
            fleet.add_reading(KmReading {
                vehicle_id: vehicle.clone(),
                date,
                odometer_km: odometer,
            })?;
            println!("Recorded odometer reading for {} on {}", vehicle, date);
            Ok(())
        }

        Commands::Vehicles => {
            let fleet = open_fleet_store(&config)?;
            output::output_vehicles(format, &fleet.find_all_vehicles()?)
        }

        Commands::Config {
            show,
            set_store_dir,
            set_output,
            set_catalog_csv_dir,
            reset,
        } => {
            let mut config = config;
            let mut changed = false;

            if reset {
                config = Config::default();
                changed = true;
            }
            if let Some(dir) = set_store_dir {
                config.store_dir = Some(dir);
                changed = true;
            }
            if let Some(format) = set_output {
                config.output_format = format;
                changed = true;
            }
            if let Some(dir) = set_catalog_csv_dir {
                config.catalog_csv_dir = Some(dir);
                changed = true;
            }

            if changed {
                config.save()?;
                println!("Configuration saved");
            }
            if show || !changed {
                print!("{}", config);
            }
            Ok(())
        }
    }
}

/// Parse "fuel_type[:co2_g_km]" into an engine record
fn parse_engine_spec(spec: &str) -> Result<Engine> {
    match spec.split_once(':') {
        Some((fuel_type, co2)) => {
            let co2_g_km: f64 = co2.trim().parse().map_err(|_| {
                Error::Catalog(format!("invalid engine spec '{}': bad CO2 g/km value", spec))
            })?;
            Ok(Engine::new(fuel_type.trim()).with_co2_g_km(co2_g_km))
        }
        None => Ok(Engine::new(spec.trim())),
    }
}

fn import_catalog_csvs(store: &mut co2e_store::CatalogStore, dir: &std::path::Path) -> Result<()> {
    let macro_fuel_types = catalog_csv::load_macro_fuel_types(dir.join("macro_fuel_types.csv"))
        .map_err(|e| Error::CsvLoader(e.to_string()))?;
    let mappings = catalog_csv::load_mappings(dir.join("mappings.csv"))
        .map_err(|e| Error::CsvLoader(e.to_string()))?;
    let factors = catalog_csv::load_factors(dir.join("factors.csv"))
        .map_err(|e| Error::CsvLoader(e.to_string()))?;
    let gwp = catalog_csv::load_gwp(dir.join("gwp.csv"))
        .map_err(|e| Error::CsvLoader(e.to_string()))?;

    for macro_fuel_type in macro_fuel_types {
        store.add_macro_fuel_type(macro_fuel_type)?;
    }
    for mapping in mappings {
        store.add_mapping(mapping)?;
    }
    for factor in factors {
        store.add_factor(factor)?;
    }
    for config in gwp {
        store.set_gwp(config)?;
    }
    Ok(())
}

/// Per-vehicle outcome collected by the worker pool
enum VehicleOutcome {
    Entry(Box<VehicleEmissionReport>),
    Skipped(SkippedVehicle),
    Failed(Error),
}

/// Fleet report with a worker pool
///
/// Contexts are resolved once up front (bulk path); vehicles are then
/// processed concurrently. Resolution and arithmetic share no mutable
/// state, so workers need no coordination beyond the work queue.
fn parallel_fleet_report(
    catalog: &CatalogSource,
    fleet: FleetStore,
    period: ReportPeriod,
    jobs: usize,
    verbose: bool,
) -> Result<FleetEmissionReport> {
    let resolver = ContextResolver::new(catalog);
    let contexts_by_fuel_type: Arc<HashMap<String, Vec<EmissionContext>>> =
        Arc::new(resolver.resolve_bulk(period.reference_date())?);

    let vehicles = Arc::new(fleet.find_all_vehicles()?);
    let fleet = Arc::new(fleet);
    let total = vehicles.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let outcomes: Arc<Mutex<Vec<VehicleOutcome>>> = Arc::new(Mutex::new(Vec::with_capacity(total)));
    let next_index = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for worker_id in 0..jobs {
        let vehicles = Arc::clone(&vehicles);
        let fleet = Arc::clone(&fleet);
        let contexts_by_fuel_type = Arc::clone(&contexts_by_fuel_type);
        let outcomes = Arc::clone(&outcomes);
        let next_index = Arc::clone(&next_index);
        let pb = pb.clone();

        let handle = thread::spawn(move || {
            loop {
                let idx = next_index.fetch_add(1, Ordering::SeqCst);
                if idx >= vehicles.len() {
                    break;
                }
                let vehicle = &vehicles[idx];

                if verbose {
                    pb.set_message(format!("[W{}] {}", worker_id, vehicle.name));
                }

                let outcome = process_vehicle(&*fleet, vehicle, period, &contexts_by_fuel_type);
                {
                    let mut guard = outcomes.lock().unwrap();
                    guard.push(outcome);
                }
                pb.inc(1);
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        let _ = handle.join();
    }
    pb.finish_and_clear();

    let outcomes = Arc::try_unwrap(outcomes)
        .map_err(|_| Error::Catalog("worker pool did not release results".to_string()))?
        .into_inner()
        .unwrap();

    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            VehicleOutcome::Entry(entry) => entries.push(*entry),
            VehicleOutcome::Skipped(s) => skipped.push(s),
            VehicleOutcome::Failed(e) => return Err(e),
        }
    }

    // Workers finish out of order; keep the report deterministic
    entries.sort_by(|a, b| a.vehicle_name.cmp(&b.vehicle_name));
    skipped.sort_by(|a, b| a.vehicle_name.cmp(&b.vehicle_name));

    let total_theoretical_kg = round2(entries.iter().map(|e| e.theoretical_kg).sum::<f64>());
    let total_real_kg = round2(entries.iter().map(|e| e.real_kg).sum::<f64>());

    Ok(FleetEmissionReport {
        period,
        entries,
        skipped,
        total_theoretical_kg,
        total_real_kg,
        total_delta: emission_delta(total_theoretical_kg, total_real_kg),
    })
}

fn process_vehicle(
    fleet: &FleetStore,
    vehicle: &Vehicle,
    period: ReportPeriod,
    contexts_by_fuel_type: &HashMap<String, Vec<EmissionContext>>,
) -> VehicleOutcome {
    let fuel_records = match fleet.fuel_records(&vehicle.id, period.from, period.to) {
        Ok(records) => records,
        Err(e) => return VehicleOutcome::Failed(e),
    };
    let readings = match fleet.odometer_readings(&vehicle.id, period.from, period.to) {
        Ok(readings) => readings,
        Err(e) => return VehicleOutcome::Failed(e),
    };

    let classification = classify_vehicle(vehicle.is_hybrid, &vehicle.engines, &fuel_records);
    let contexts = contexts_by_fuel_type
        .get(classification.effective_fuel_type())
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    match vehicle_report(vehicle, &fuel_records, &readings, contexts) {
        Ok(entry) => VehicleOutcome::Entry(Box::new(entry)),
        Err(Error::InsufficientData(reason)) => VehicleOutcome::Skipped(SkippedVehicle {
            vehicle_id: vehicle.id.clone(),
            vehicle_name: vehicle.name.clone(),
            reason,
        }),
        Err(e) => VehicleOutcome::Failed(e),
    }
}
