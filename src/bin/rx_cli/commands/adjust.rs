// ABOUTME: Weekly adjustment command for rx-cli
// ABOUTME: Prints the proposal and, when given a current fit, the adjusted fit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use anyhow::Result;
use exercise_rx::intelligence::{AdjustmentEngine, AdjustmentProposal};
use exercise_rx::models::{AdherenceLog, Fit};
use serde::Serialize;
use std::path::Path;

use crate::helpers::display::print_json;
use crate::helpers::input::read_json;

#[derive(Serialize)]
struct AdjustmentReport {
    proposal: AdjustmentProposal,
    #[serde(skip_serializing_if = "Option::is_none")]
    adjusted: Option<Fit>,
}

/// Print the weekly adjustment proposal
pub fn adjust(history: &Path, current: Option<&Path>) -> Result<()> {
    let logs: Vec<AdherenceLog> = read_json(history)?;
    let proposal = AdjustmentEngine::adjust_weekly(&logs);

    let adjusted = match current {
        Some(path) => {
            let fit: Fit = read_json(path)?;
            Some(proposal.apply_to(&fit))
        }
        None => None,
    };

    print_json(&AdjustmentReport { proposal, adjusted })
}
