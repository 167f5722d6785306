//! Primitive enums shared across the workspace

use serde::{Deserialize, Serialize};

/// Emission accounting scope
///
/// Scope 1 covers combusted fuel (thermal engines), scope 2 covers grid
/// energy (charging). A hybrid fuel type maps into both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmissionScope {
    Thermal,
    Electric,
}

impl EmissionScope {
    /// Scope number used in reporting (1 = thermal, 2 = electric)
    pub fn number(&self) -> u8 {
        match self {
            EmissionScope::Thermal => 1,
            EmissionScope::Electric => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(EmissionScope::Thermal),
            2 => Some(EmissionScope::Electric),
            _ => None,
        }
    }
}

impl std::fmt::Display for EmissionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scope {}", self.number())
    }
}

/// The seven tracked greenhouse gases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gas {
    Co2,
    Ch4,
    N2o,
    Hfc,
    Pfc,
    Sf6,
    Nf3,
}

impl Gas {
    /// All tracked gases, in reporting order
    pub const ALL: [Gas; 7] = [
        Gas::Co2,
        Gas::Ch4,
        Gas::N2o,
        Gas::Hfc,
        Gas::Pfc,
        Gas::Sf6,
        Gas::Nf3,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Gas::Co2 => "CO2",
            Gas::Ch4 => "CH4",
            Gas::N2o => "N2O",
            Gas::Hfc => "HFC",
            Gas::Pfc => "PFC",
            Gas::Sf6 => "SF6",
            Gas::Nf3 => "NF3",
        }
    }
}

impl std::fmt::Display for Gas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Measurement unit of a macro fuel type's consumption quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementUnit {
    Litre,
    Kilogram,
    KilowattHour,
    CubicMetre,
}

impl MeasurementUnit {
    pub fn label(&self) -> &'static str {
        match self {
            MeasurementUnit::Litre => "L",
            MeasurementUnit::Kilogram => "kg",
            MeasurementUnit::KilowattHour => "kWh",
            MeasurementUnit::CubicMetre => "m³",
        }
    }
}

impl std::fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_numbers() {
        assert_eq!(EmissionScope::Thermal.number(), 1);
        assert_eq!(EmissionScope::Electric.number(), 2);
        assert_eq!(EmissionScope::from_number(1), Some(EmissionScope::Thermal));
        assert_eq!(EmissionScope::from_number(2), Some(EmissionScope::Electric));
        assert_eq!(EmissionScope::from_number(3), None);
    }

    #[test]
    fn test_scope_ordering() {
        // Mappings are returned ordered by scope ascending
        assert!(EmissionScope::Thermal < EmissionScope::Electric);
    }

    #[test]
    fn test_all_gases_distinct() {
        for (i, a) in Gas::ALL.iter().enumerate() {
            for b in &Gas::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
