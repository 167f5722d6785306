//! CLI definition using clap

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use co2e_types::OutputFormat;

#[derive(Parser)]
#[command(name = "co2e-checker")]
#[command(version)]
#[command(about = "Fleet greenhouse-gas emission accounting")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve emission contexts for a fuel type at a reference date
    Resolve {
        /// Vehicle fuel type (e.g. "diesel", "petrol-hybrid")
        fuel_type: String,

        /// Reference date (YYYY-MM-DD). Defaults to today.
        #[arg(long, short = 'd')]
        date: Option<NaiveDate>,
    },

    /// Classify a vehicle's effective fuel type and CO2 g/km
    Classify {
        /// Vehicle id
        vehicle: String,

        /// Period start for the fuel-record fallback (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Period end for the fuel-record fallback (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Compute period emissions for one vehicle or the whole fleet
    Report {
        /// Period start (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// Period end (YYYY-MM-DD); also the factor reference date
        #[arg(long)]
        to: NaiveDate,

        /// Report a single vehicle by id (uses the strict single-lookup
        /// path: missing factors are an error, not a zero)
        #[arg(long)]
        vehicle: Option<String>,

        /// Number of parallel workers for the fleet report.
        /// 0 = auto (CPU count). Defaults to 1.
        #[arg(long, short = 'j')]
        jobs: Option<usize>,
    },

    /// Manage the emission catalog
    Catalog {
        /// Seed an empty catalog with the built-in defaults
        #[arg(long)]
        init: bool,

        /// Import catalog CSVs from a directory into the store
        #[arg(long)]
        import: Option<PathBuf>,

        /// Show the catalog contents
        #[arg(long)]
        show: bool,
    },

    /// Register a vehicle
    AddVehicle {
        /// Vehicle name or model
        name: String,

        /// License plate
        #[arg(long, short = 'p')]
        plate: Option<String>,

        /// Declared dual-engine hybrid
        #[arg(long)]
        hybrid: bool,

        /// Engine spec as "fuel_type[:co2_g_km]", repeatable
        /// (e.g. --engine diesel:168 --engine electric:0)
        #[arg(long, short = 'e')]
        engine: Vec<String>,
    },

    /// Record a refuelling or charging event
    AddFuel {
        /// Vehicle id
        vehicle: String,

        /// Event date (YYYY-MM-DD)
        #[arg(long, short = 'd')]
        date: NaiveDate,

        /// Fuel type at the pump/charger
        #[arg(long)]
        fuel_type: String,

        /// Litres refuelled
        #[arg(long, default_value = "0")]
        litres: f64,

        /// kWh charged
        #[arg(long, default_value = "0")]
        kwh: f64,

        /// Odometer reading at the event
        #[arg(long)]
        odometer: Option<f64>,
    },

    /// Record a dedicated odometer reading
    AddReading {
        /// Vehicle id
        vehicle: String,

        /// Reading date (YYYY-MM-DD)
        #[arg(long, short = 'd')]
        date: NaiveDate,

        /// Odometer km
        #[arg(long)]
        odometer: f64,
    },

    /// List registered vehicles
    Vehicles,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Prefer a directory of catalog CSVs over the JSON store
        #[arg(long)]
        set_catalog_csv_dir: Option<PathBuf>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
