//! Output formatting module

use chrono::NaiveDate;

use co2e_app::report::{FleetEmissionReport, VehicleEmissionReport};
use co2e_domain::model::{EmissionContext, Vehicle};
use co2e_domain::service::VehicleClassification;
use co2e_store::CatalogStore;
use co2e_types::{OutputFormat, Result};

pub fn output_contexts(
    output_format: OutputFormat,
    fuel_type: &str,
    reference_date: NaiveDate,
    contexts: &[EmissionContext],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(contexts)?);
        return Ok(());
    }

    println!("\nEmission Contexts");
    println!("=================");
    println!("Fuel type:      {}", fuel_type);
    println!("Reference date: {}", reference_date);

    for context in contexts {
        println!();
        println!(
            "[{}] {} ({})",
            context.scope(),
            context.macro_fuel_type.name,
            context.macro_fuel_type.unit
        );
        println!("  CO2:  {:.5} kg/{}", context.factors.co2, context.macro_fuel_type.unit);
        println!("  CH4:  {:.5} kg/{}", context.factors.ch4, context.macro_fuel_type.unit);
        println!("  N2O:  {:.5} kg/{}", context.factors.n2o, context.macro_fuel_type.unit);
        println!(
            "  GWP-weighted: {:.5} kgCO2e/{}",
            context.co2e_per_unit(),
            context.macro_fuel_type.unit
        );
    }
    Ok(())
}

pub fn output_classification(
    output_format: OutputFormat,
    vehicle: &Vehicle,
    classification: &VehicleClassification,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(classification)?);
        return Ok(());
    }

    println!("\nVehicle Classification");
    println!("======================");
    println!("Vehicle:             {} ({})", vehicle.name, vehicle.id);
    println!("Declared hybrid:     {}", if vehicle.is_hybrid { "Yes" } else { "No" });
    println!("Engines:             {}", vehicle.engines.len());
    println!("Effective fuel type: {}", classification.effective_fuel_type());
    println!("CO2 g/km:            {:.1}", classification.co2_g_km);
    Ok(())
}

pub fn output_vehicle_report(
    output_format: OutputFormat,
    report: &VehicleEmissionReport,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\nEmission Report");
    println!("===============");
    println!("Vehicle:        {} ({})", report.vehicle_name, report.vehicle_id);
    println!("Fuel type:      {}", report.effective_fuel_type);
    println!("Distance:       {:.0} km", report.km_travelled);
    println!("Consumption:    {:.1} L, {:.1} kWh", report.litres, report.kwh);
    println!();
    println!("Theoretical:    {:>10.2} kg CO2e  ({:.1} g/km declared)", report.theoretical_kg, report.co2_g_km);
    println!("Real:           {:>10.2} kg CO2e", report.real_kg);
    println!(
        "Delta:          {:>+10.2} kg ({:+.2}%)",
        report.delta.absolute_kg, report.delta.percentage
    );

    let contributing: Vec<_> = report.per_gas.iter().filter(|c| c.co2e_kg != 0.0).collect();
    if !contributing.is_empty() {
        println!();
        println!("Per gas (kg CO2e):");
        for contribution in contributing {
            println!("  {:<4} {:>10.2}", contribution.gas.label(), contribution.co2e_kg);
        }
    }
    Ok(())
}

pub fn output_fleet_report(output_format: OutputFormat, report: &FleetEmissionReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("\nFleet Emission Report");
    println!("=====================");
    println!("Period: {} .. {}", report.period.from, report.period.to);
    println!();
    println!(
        "{:<24} {:<14} {:>9} {:>12} {:>12} {:>9}",
        "Vehicle", "Fuel type", "km", "Theoretical", "Real", "Delta%"
    );
    println!("{}", "-".repeat(84));
    for entry in &report.entries {
        println!(
            "{:<24} {:<14} {:>9.0} {:>12.2} {:>12.2} {:>+8.2}%",
            truncate_str(&entry.vehicle_name, 23),
            truncate_str(&entry.effective_fuel_type, 13),
            entry.km_travelled,
            entry.theoretical_kg,
            entry.real_kg,
            entry.delta.percentage
        );
    }
    println!("{}", "-".repeat(84));
    println!(
        "{:<24} {:<14} {:>9} {:>12.2} {:>12.2} {:>+8.2}%",
        "Total",
        "",
        "",
        report.total_theoretical_kg,
        report.total_real_kg,
        report.total_delta.percentage
    );

    if !report.skipped.is_empty() {
        println!();
        println!("Skipped ({}):", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {} - {}", skipped.vehicle_name, skipped.reason);
        }
    }
    Ok(())
}

pub fn output_vehicles(output_format: OutputFormat, vehicles: &[Vehicle]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(vehicles)?);
        return Ok(());
    }

    println!("\nRegistered Vehicles ({})", vehicles.len());
    println!("{}", "-".repeat(70));
    for vehicle in vehicles {
        let engines: Vec<String> = vehicle
            .engines
            .iter()
            .map(|e| match e.co2_g_km {
                Some(co2) => format!("{} ({:.0} g/km)", e.fuel_type, co2),
                None => e.fuel_type.clone(),
            })
            .collect();
        println!(
            "{:<38} {:<8} {}",
            vehicle.id,
            if vehicle.is_hybrid { "hybrid" } else { "" },
            vehicle.name
        );
        println!("  plate: {:<16} engines: {}",
            vehicle.license_plate.as_deref().unwrap_or("-"),
            if engines.is_empty() { "-".to_string() } else { engines.join(", ") }
        );
    }
    Ok(())
}

pub fn output_catalog(output_format: OutputFormat, store: &CatalogStore) -> Result<()> {
    if output_format == OutputFormat::Json {
        let view = serde_json::json!({
            "macro_fuel_types": store.macro_fuel_types_sorted(),
            "mappings": store.mappings(),
            "factors": store.all_factors(),
            "gwp": store.gwp_rows(),
        });
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("\nEmission Catalog");
    println!("================");

    println!("\nMacro fuel types:");
    for macro_fuel_type in store.macro_fuel_types_sorted() {
        println!(
            "  {:<18} {:<18} {}  per {}",
            macro_fuel_type.id, macro_fuel_type.name, macro_fuel_type.scope, macro_fuel_type.unit
        );
    }

    println!("\nMappings:");
    for mapping in store.mappings() {
        println!(
            "  {:<18} -> {:<18} ({})",
            mapping.fuel_type, mapping.macro_fuel_type_id, mapping.scope
        );
    }

    println!("\nFactors:");
    for factor in store.all_factors() {
        println!(
            "  {:<18} {:<18} CO2 {:.5}  from {}  [{}]",
            factor.macro_fuel_type_id,
            factor.fuel_type.as_deref().unwrap_or("(default)"),
            factor.gases.co2,
            factor.effective_date,
            factor.source
        );
    }

    println!("\nGWP (active):");
    for row in store.gwp_rows().iter().filter(|r| r.is_active) {
        println!("  {:<4} {:>9.1}  [{}]", row.gas.label(), row.value, row.source);
    }
    Ok(())
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
