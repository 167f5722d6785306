//! co2e-checker - Fleet greenhouse-gas emission accounting
//!
//! A CLI tool that resolves time-versioned emission factors and
//! computes theoretical vs. real CO2e emissions for fleet vehicles.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
