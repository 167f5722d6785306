//! Hybrid vehicle classification
//!
//! Decides, once per vehicle, which fuel type label and which CO2/km
//! figure drive the downstream lookups and the theoretical calculation.
//! The result is a closed [`FuelClass`] variant so no later stage has
//! to re-ask "is this hybrid?".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Engine, FuelRecord};

/// Effective fuel type when no engine and no fuel record gives one;
/// callers treat it as insufficient data
pub const UNKNOWN_FUEL_TYPE: &str = "unknown";

const ELECTRIC: &str = "electric";

/// Known thermal partners of an electric engine and the composite label
/// each pairing resolves to
const HYBRID_PAIRINGS: [(&str, &str); 2] = [("petrol", "petrol-hybrid"), ("diesel", "diesel-hybrid")];

/// Classification of a vehicle's drivetrain for emission accounting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FuelClass {
    /// Single-drivetrain vehicle with one raw fuel type
    Pure(String),
    /// Dual-engine hybrid: a thermal engine plus an electric one
    Hybrid {
        thermal: String,
        /// Composite label used for mapping lookups (e.g. "petrol-hybrid")
        composite: String,
    },
}

impl FuelClass {
    /// The label used for all downstream mapping and factor lookups
    pub fn effective_fuel_type(&self) -> &str {
        match self {
            FuelClass::Pure(fuel_type) => fuel_type,
            FuelClass::Hybrid { composite, .. } => composite,
        }
    }
}

/// Result of classifying one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleClassification {
    pub fuel_class: FuelClass,
    /// CO2 g/km used for the theoretical calculation
    pub co2_g_km: f64,
}

impl VehicleClassification {
    pub fn effective_fuel_type(&self) -> &str {
        self.fuel_class.effective_fuel_type()
    }
}

/// Classify a vehicle from its hybrid flag, engine records and the
/// period's fuel records
///
/// A declared hybrid with at least two engines whose fuel types pair
/// "electric" with a known thermal type resolves to the composite
/// label, taking CO2/km from the non-electric engine: the
/// manufacturer's combined-cycle figure already accounts for the hybrid
/// drivetrain, and the electric engine's own figure is zero by
/// definition and must not be summed. Anything else falls back to the
/// most frequent fuel type among the period's fuel records (tie-break:
/// first record), else the first engine's type, else
/// [`UNKNOWN_FUEL_TYPE`].
pub fn classify_vehicle(
    is_hybrid: bool,
    engines: &[Engine],
    fuel_records: &[FuelRecord],
) -> VehicleClassification {
    if is_hybrid && engines.len() >= 2 {
        if let Some(classification) = classify_hybrid_pairing(engines) {
            return classification;
        }
    }

    let fuel_type = fallback_fuel_type(engines, fuel_records);
    let co2_g_km = engines
        .first()
        .and_then(|e| e.co2_g_km)
        .unwrap_or(0.0);

    VehicleClassification {
        fuel_class: FuelClass::Pure(fuel_type),
        co2_g_km,
    }
}

fn classify_hybrid_pairing(engines: &[Engine]) -> Option<VehicleClassification> {
    let has_electric = engines
        .iter()
        .any(|e| e.fuel_type.eq_ignore_ascii_case(ELECTRIC));
    if !has_electric {
        return None;
    }

    for (thermal, composite) in HYBRID_PAIRINGS {
        if engines.iter().any(|e| e.fuel_type.eq_ignore_ascii_case(thermal)) {
            let co2_g_km = engines
                .iter()
                .find(|e| !e.fuel_type.eq_ignore_ascii_case(ELECTRIC))
                .and_then(|e| e.co2_g_km)
                .unwrap_or(0.0);
            return Some(VehicleClassification {
                fuel_class: FuelClass::Hybrid {
                    thermal: thermal.to_string(),
                    composite: composite.to_string(),
                },
                co2_g_km,
            });
        }
    }
    None
}

/// Most frequent fuel type among the period's fuel records (ties go to
/// the type seen first), else the first engine's type, else unknown
fn fallback_fuel_type(engines: &[Engine], fuel_records: &[FuelRecord]) -> String {
    if !fuel_records.is_empty() {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in fuel_records {
            *counts.entry(record.fuel_type.as_str()).or_insert(0) += 1;
        }
        // Walk in record order so a tie resolves to the type seen first
        let mut best: Option<(&str, usize)> = None;
        for record in fuel_records {
            let fuel_type = record.fuel_type.as_str();
            let count = counts[fuel_type];
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((fuel_type, count)),
            }
        }
        if let Some((fuel_type, _)) = best {
            return fuel_type.to_string();
        }
    }

    engines
        .first()
        .map(|e| e.fuel_type.clone())
        .unwrap_or_else(|| UNKNOWN_FUEL_TYPE.to_string())
}
