//! Global-warming-potential configuration

use co2e_types::Gas;
use serde::{Deserialize, Serialize};

/// GWP multiplier for one gas
///
/// At most one row per gas is active at a time. A gas with no active
/// row contributes with multiplier 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GwpConfig {
    pub gas: Gas,
    /// kg CO2e per kg of this gas
    pub value: f64,
    /// Source citation (e.g. "IPCC AR5")
    pub source: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl GwpConfig {
    pub fn new(gas: Gas, value: f64, source: &str) -> Self {
        Self {
            gas,
            value,
            source: source.to_string(),
            is_active: true,
        }
    }
}

/// Resolved GWP snapshot for all seven gases
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GwpSet {
    #[serde(default)]
    pub co2: f64,
    #[serde(default)]
    pub ch4: f64,
    #[serde(default)]
    pub n2o: f64,
    #[serde(default)]
    pub hfc: f64,
    #[serde(default)]
    pub pfc: f64,
    #[serde(default)]
    pub sf6: f64,
    #[serde(default)]
    pub nf3: f64,
}

impl GwpSet {
    /// Snapshot with every multiplier 0 (no contribution)
    pub fn zero() -> Self {
        Self::default()
    }

    /// IPCC AR5 100-year values
    pub fn ar5() -> Self {
        Self {
            co2: 1.0,
            ch4: 28.0,
            n2o: 265.0,
            hfc: 1430.0,
            pfc: 6630.0,
            sf6: 23500.0,
            nf3: 16100.0,
        }
    }

    /// Build a snapshot from configuration rows
    ///
    /// Inactive rows are ignored; a gas with no active row stays at 0.
    pub fn from_configs(configs: &[GwpConfig]) -> Self {
        let mut set = Self::zero();
        for config in configs.iter().filter(|c| c.is_active) {
            set.set(config.gas, config.value);
        }
        set
    }

    pub fn get(&self, gas: Gas) -> f64 {
        match gas {
            Gas::Co2 => self.co2,
            Gas::Ch4 => self.ch4,
            Gas::N2o => self.n2o,
            Gas::Hfc => self.hfc,
            Gas::Pfc => self.pfc,
            Gas::Sf6 => self.sf6,
            Gas::Nf3 => self.nf3,
        }
    }

    fn set(&mut self, gas: Gas, value: f64) {
        match gas {
            Gas::Co2 => self.co2 = value,
            Gas::Ch4 => self.ch4 = value,
            Gas::N2o => self.n2o = value,
            Gas::Hfc => self.hfc = value,
            Gas::Pfc => self.pfc = value,
            Gas::Sf6 => self.sf6 = value,
            Gas::Nf3 => self.nf3 = value,
        }
    }
}
