//! Period emission reports
//!
//! Orchestrates classification, context resolution and the emission
//! arithmetic for one vehicle or a whole fleet over a reporting period.
//! The period's end date is the reference date for factor resolution.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use co2e_domain::model::{EmissionContext, FuelRecord, KmReading, Vehicle};
use co2e_domain::repository::{EmissionCatalogRepository, FleetRepository};
use co2e_domain::service::{
    calculate_scoped_emissions, classify_vehicle, emission_delta, round2,
    theoretical_emissions_kg, ContextResolver, EmissionDelta, GasContribution, ScopeConsumption,
    UNKNOWN_FUEL_TYPE,
};
use co2e_types::{EmissionScope, Error, Result};

/// Reporting window, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportPeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Factor resolution happens "as of" the period end
    pub fn reference_date(&self) -> NaiveDate {
        self.to
    }
}

/// Emission figures for one vehicle over one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleEmissionReport {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub effective_fuel_type: String,
    pub co2_g_km: f64,
    pub km_travelled: f64,
    pub litres: f64,
    pub kwh: f64,
    pub theoretical_kg: f64,
    pub real_kg: f64,
    pub delta: EmissionDelta,
    pub per_gas: Vec<GasContribution>,
}

/// A vehicle excluded from a fleet report, with the reason
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedVehicle {
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub reason: String,
}

/// Fleet-wide emission report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetEmissionReport {
    pub period: ReportPeriod,
    pub entries: Vec<VehicleEmissionReport>,
    pub skipped: Vec<SkippedVehicle>,
    pub total_theoretical_kg: f64,
    pub total_real_kg: f64,
    pub total_delta: EmissionDelta,
}

/// Distance travelled in the period: last minus first odometer reading
///
/// Requires at least two readings; an odometer regression (last below
/// first) clamps to 0 rather than reporting negative distance.
pub fn distance_travelled_km(readings: &[KmReading]) -> Result<f64> {
    if readings.len() < 2 {
        return Err(Error::InsufficientData(format!(
            "need at least 2 odometer readings in the period, got {}",
            readings.len()
        )));
    }
    let first = readings[0].odometer_km;
    let last = readings[readings.len() - 1].odometer_km;
    Ok((last - first).max(0.0))
}

/// Compute one vehicle's report from pre-fetched records and resolved
/// contexts
///
/// An empty context list (unmapped fuel type) yields zero real
/// emissions, not an error. A vehicle that cannot be classified or has
/// fewer than two odometer readings is `InsufficientData`: the caller
/// excludes it instead of reporting a wrong zero.
pub fn vehicle_report(
    vehicle: &Vehicle,
    fuel_records: &[FuelRecord],
    readings: &[KmReading],
    contexts: &[EmissionContext],
) -> Result<VehicleEmissionReport> {
    let classification = classify_vehicle(vehicle.is_hybrid, &vehicle.engines, fuel_records);
    if classification.effective_fuel_type() == UNKNOWN_FUEL_TYPE {
        return Err(Error::InsufficientData(format!(
            "vehicle '{}' has no engines and no fuel records to classify",
            vehicle.name
        )));
    }

    let km_travelled = distance_travelled_km(readings)?;
    let litres: f64 = fuel_records.iter().map(|r| r.litres).sum();
    let kwh: f64 = fuel_records.iter().map(|r| r.kwh).sum();

    let scopes: Vec<ScopeConsumption> = contexts
        .iter()
        .map(|context| {
            let quantity = match context.scope() {
                EmissionScope::Thermal => litres,
                EmissionScope::Electric => kwh,
            };
            ScopeConsumption::from_context(context, quantity)
        })
        .collect();

    let theoretical_kg = theoretical_emissions_kg(classification.co2_g_km, km_travelled);
    let scoped = calculate_scoped_emissions(&scopes);
    let real_kg = scoped.total_co2e_kg;

    Ok(VehicleEmissionReport {
        vehicle_id: vehicle.id.clone(),
        vehicle_name: vehicle.name.clone(),
        effective_fuel_type: classification.effective_fuel_type().to_string(),
        co2_g_km: classification.co2_g_km,
        km_travelled,
        litres,
        kwh,
        theoretical_kg,
        real_kg,
        delta: emission_delta(theoretical_kg, real_kg),
        per_gas: scoped.per_gas,
    })
}

/// Report one vehicle through the single-lookup resolution path
///
/// Interactive use: a missing factor surfaces as `FactorNotFound` so
/// the operator can add the missing catalog row.
pub fn single_vehicle_report<C, F>(
    catalog: &C,
    fleet: &F,
    vehicle_id: &str,
    period: ReportPeriod,
) -> Result<VehicleEmissionReport>
where
    C: EmissionCatalogRepository,
    F: FleetRepository,
{
    let vehicle = fleet
        .find_vehicle(vehicle_id)?
        .ok_or_else(|| Error::VehicleNotFound(vehicle_id.to_string()))?;
    let fuel_records = fleet.fuel_records(vehicle_id, period.from, period.to)?;
    let readings = fleet.odometer_readings(vehicle_id, period.from, period.to)?;

    let classification = classify_vehicle(vehicle.is_hybrid, &vehicle.engines, &fuel_records);
    let resolver = ContextResolver::new(catalog);
    let contexts = resolver.resolve(
        classification.effective_fuel_type(),
        period.reference_date(),
    )?;

    vehicle_report(&vehicle, &fuel_records, &readings, &contexts)
}

/// Report the whole fleet through the bulk resolution path
///
/// Contexts for every fuel type are resolved up front in two catalog
/// queries; vehicles with insufficient data are collected in `skipped`
/// so the batch completes for everything resolvable.
pub fn fleet_report<C, F>(catalog: &C, fleet: &F, period: ReportPeriod) -> Result<FleetEmissionReport>
where
    C: EmissionCatalogRepository,
    F: FleetRepository,
{
    let resolver = ContextResolver::new(catalog);
    let contexts_by_fuel_type = resolver.resolve_bulk(period.reference_date())?;

    let mut entries = Vec::new();
    let mut skipped = Vec::new();

    for vehicle in fleet.find_all_vehicles()? {
        let fuel_records = fleet.fuel_records(&vehicle.id, period.from, period.to)?;
        let readings = fleet.odometer_readings(&vehicle.id, period.from, period.to)?;

        let classification = classify_vehicle(vehicle.is_hybrid, &vehicle.engines, &fuel_records);
        let contexts = contexts_by_fuel_type
            .get(classification.effective_fuel_type())
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        match vehicle_report(&vehicle, &fuel_records, &readings, contexts) {
            Ok(entry) => entries.push(entry),
            Err(Error::InsufficientData(reason)) => skipped.push(SkippedVehicle {
                vehicle_id: vehicle.id.clone(),
                vehicle_name: vehicle.name.clone(),
                reason,
            }),
            Err(e) => return Err(e),
        }
    }

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

#[cfg(test)]
mod tests {
    use super::*;
    use co2e_domain::model::Engine;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn reading(day: u32, odometer_km: f64) -> KmReading {
        KmReading {
            vehicle_id: "v1".to_string(),
            date: date(2024, 3, day),
            odometer_km,
        }
    }

    #[test]
    fn test_distance_travelled() {
        let readings = vec![reading(1, 50000.0), reading(15, 50600.0), reading(31, 51200.0)];
        assert!((distance_travelled_km(&readings).unwrap() - 1200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_needs_two_readings() {
        assert!(matches!(
            distance_travelled_km(&[reading(1, 50000.0)]),
            Err(Error::InsufficientData(_))
        ));
        assert!(matches!(
            distance_travelled_km(&[]),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn test_odometer_regression_clamps_to_zero() {
        let readings = vec![reading(1, 51200.0), reading(31, 50000.0)];
        assert_eq!(distance_travelled_km(&readings).unwrap(), 0.0);
    }

    #[test]
    fn test_unclassifiable_vehicle_is_insufficient_data() {
        let vehicle = Vehicle::new("Mystery".to_string());
        let readings = vec![reading(1, 0.0), reading(31, 100.0)];
        let result = vehicle_report(&vehicle, &[], &readings, &[]);
        assert!(matches!(result, Err(Error::InsufficientData(_))));
    }

    #[test]
    fn test_unmapped_fuel_type_reports_zero_real() {
        let vehicle =
            Vehicle::new("Oddball".to_string()).with_engine(Engine::new("hydrogen").with_co2_g_km(0.0));
        let readings = vec![reading(1, 1000.0), reading(31, 2000.0)];
        // No contexts: fuel type had no mapping
        let report = vehicle_report(&vehicle, &[], &readings, &[]).unwrap();
        assert_eq!(report.real_kg, 0.0);
        assert_eq!(report.theoretical_kg, 0.0);
    }
}
