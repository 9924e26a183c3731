// ABOUTME: rx-cli - command-line front end for the exercise prescription engines
// ABOUTME: Reads profile, measurement, and adherence JSON files and prints JSON results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors
//!
//! Usage:
//! ```bash
//! # Pre-exercise safety verdict
//! rx-cli gate --profile profile.json --measurements vitals.json
//!
//! # Full prescription with the gate verdict that shaped it
//! rx-cli prescribe --profile profile.json --measurements vitals.json
//!
//! # Same, with an explicit fusion configuration
//! rx-cli prescribe --profile profile.json --config fusion.json
//!
//! # Weekly adjustment, optionally applied to a current fit
//! rx-cli adjust --history logs.json --current fit.json
//!
//! # Canonicalize condition names
//! rx-cli normalize 高血压 "type 2 diabetes" --history "CAD, knee pain"
//!
//! # Inspect the rule catalog
//! rx-cli rules --id HTN-001
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use exercise_rx::logging::LoggingConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "rx-cli",
    about = "Exercise prescription decision-support CLI",
    long_about = "Runs the safety gate, prescription, adjustment, and condition normalization engines over JSON inputs."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Run the pre-exercise safety gate
    Gate {
        /// Profile draft JSON file
        #[arg(long)]
        profile: PathBuf,

        /// Measurements JSON array file
        #[arg(long)]
        measurements: Option<PathBuf>,
    },

    /// Generate a prescription
    Prescribe {
        /// Profile draft JSON file
        #[arg(long)]
        profile: PathBuf,

        /// Measurements JSON array file
        #[arg(long)]
        measurements: Option<PathBuf>,

        /// Fusion configuration JSON file (defaults to `RX_FUSION_*` environment)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Propose a weekly adjustment from adherence logs
    Adjust {
        /// Adherence log JSON array file
        #[arg(long)]
        history: PathBuf,

        /// Current FITT JSON file to apply the proposal to
        #[arg(long)]
        current: Option<PathBuf>,
    },

    /// Map condition names to canonical tags
    Normalize {
        /// Condition names, localized or free text
        conditions: Vec<String>,

        /// Medical history text to scan as well
        #[arg(long)]
        history: Option<String>,
    },

    /// Print the rule catalog
    Rules {
        /// Print only this rule
        #[arg(long)]
        id: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level("debug");
    }
    logging.init()?;

    match cli.command {
        Command::Gate {
            profile,
            measurements,
        } => commands::assess::gate(&profile, measurements.as_deref()),
        Command::Prescribe {
            profile,
            measurements,
            config,
        } => commands::assess::prescribe(&profile, measurements.as_deref(), config.as_deref()),
        Command::Adjust { history, current } => {
            commands::adjust::adjust(&history, current.as_deref())
        }
        Command::Normalize {
            conditions,
            history,
        } => commands::normalize::normalize(&conditions, history.as_deref()),
        Command::Rules { id } => commands::rules::rules(id.as_deref()),
    }
}
