// ABOUTME: Weekly prescription adjustment from the last seven days of adherence and RPE
// ABOUTME: Proposes multipliers for frequency and time; intensity may be capped but never raised
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

//! Adjustment Engine
//!
//! | Branch    | Condition                              | Multiplier    |
//! |-----------|----------------------------------------|---------------|
//! | `ADJ-000` | no history                             | 1.00          |
//! | `ADJ-101` | completion < 60% or mean RPE >= 7      | 0.85, cap low |
//! | `ADJ-102` | completion >= 90% and mean RPE <= 5    | 1.10          |
//! | `ADJ-103` | anything else                          | 1.05 / 0.95   |

use rx_core::constants::adherence;
use rx_core::models::{AdherenceLog, Fit, Intensity};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::info;

const NO_HISTORY_TAG: &str = "#ADJ-000: no history, no adjustment";
const REDUCE_TAG: &str = "#ADJ-101: low completion or high RPE, frequency/time reduced 15%";
const INCREASE_TAG: &str = "#ADJ-102: high completion and low RPE, frequency/time increased 10%";
const FINE_TUNE_TAG: &str = "#ADJ-103: mid range, frequency/time fine-tuned by 5%";

const REDUCE_MULTIPLIER: f64 = 0.85;
const INCREASE_MULTIPLIER: f64 = 1.10;
const NUDGE_UP_MULTIPLIER: f64 = 1.05;
const NUDGE_DOWN_MULTIPLIER: f64 = 0.95;

const MIN_FREQ: f64 = 1.0;
const MIN_TIME: f64 = 10.0;

/// Multiplicative deltas to apply to the current prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentFit {
    /// Multiplier for sessions per week
    pub freq: f64,
    /// Multiplier for minutes per session
    pub time: f64,
    /// Intensity ceiling; absent leaves intensity unchanged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
}

/// Weekly adjustment proposal.
///
/// `fit` holds multipliers, not absolute values: callers combine it with the
/// current prescription through [`AdjustmentProposal::apply_to`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentProposal {
    /// Multipliers and intensity ceiling
    pub fit: AdjustmentFit,
    /// Tag of the branch that fired
    pub rules: Vec<String>,
    /// Completed over planned minutes in the window
    pub completion_rate: f64,
    /// Mean of the valid RPE values in the window, 0 when none
    pub average_rpe: f64,
}

impl AdjustmentProposal {
    fn new(multiplier: f64, intensity: Option<Intensity>, tag: &str) -> Self {
        let multiplier = (multiplier * 100.0).round() / 100.0;
        Self {
            fit: AdjustmentFit {
                freq: multiplier,
                time: multiplier,
                intensity,
            },
            rules: vec![tag.to_owned()],
            completion_rate: 0.0,
            average_rpe: 0.0,
        }
    }

    /// Frequency multiplier
    #[must_use]
    pub const fn freq_multiplier(&self) -> f64 {
        self.fit.freq
    }

    /// Time multiplier
    #[must_use]
    pub const fn time_multiplier(&self) -> f64 {
        self.fit.time
    }

    /// Apply to a prescription fit; intensity is only ever lowered
    #[must_use]
    pub fn apply_to(&self, current: &Fit) -> Fit {
        let scale = |value: u32, multiplier: f64, floor: f64| {
            (f64::from(value) * multiplier).round().max(floor) as u32
        };
        let intensity = self
            .fit
            .intensity
            .map_or(current.intensity, |cap| current.intensity.min(cap));
        Fit {
            freq: scale(current.freq, self.fit.freq, MIN_FREQ),
            intensity,
            time: scale(current.time, self.fit.time, MIN_TIME),
            exercise_type: current.exercise_type.clone(),
        }
    }
}

/// Adherence-driven weekly adjustment
#[derive(Debug, Clone, Copy, Default)]
pub struct AdjustmentEngine;

impl AdjustmentEngine {
    /// Propose multipliers from the most recent seven entries of `history`
    #[must_use]
    pub fn adjust_weekly(history: &[AdherenceLog]) -> AdjustmentProposal {
        let mut recent: Vec<&AdherenceLog> = history.iter().collect();
        recent.sort_by_key(|log| Reverse(log.date));
        recent.truncate(adherence::WINDOW_DAYS);

        if recent.is_empty() {
            info!("No adherence history, prescription left unchanged");
            return AdjustmentProposal::new(1.0, None, NO_HISTORY_TAG);
        }

        let planned: u64 = recent.iter().map(|log| u64::from(log.planned_minutes)).sum();
        let completed: u64 = recent
            .iter()
            .map(|log| u64::from(log.completed_minutes))
            .sum();
        let completion_rate = if planned > 0 {
            completed as f64 / planned as f64
        } else {
            0.0
        };

        let rpes: Vec<f64> = recent
            .iter()
            .filter_map(|log| log.valid_rpe())
            .map(f64::from)
            .collect();
        let average_rpe = if rpes.is_empty() {
            0.0
        } else {
            rpes.iter().sum::<f64>() / rpes.len() as f64
        };

        let proposal = Self::choose(completion_rate, average_rpe);
        info!(
            days = recent.len(),
            completion_rate,
            average_rpe,
            multiplier = proposal.fit.freq,
            branch = proposal.rules.first().map_or("", String::as_str),
            "Weekly adjustment proposed"
        );
        AdjustmentProposal {
            completion_rate,
            average_rpe,
            ..proposal
        }
    }

    fn choose(completion_rate: f64, average_rpe: f64) -> AdjustmentProposal {
        if completion_rate < adherence::LOW_COMPLETION || average_rpe >= adherence::HIGH_RPE {
            AdjustmentProposal::new(REDUCE_MULTIPLIER, Some(Intensity::Low), REDUCE_TAG)
        } else if completion_rate >= adherence::HIGH_COMPLETION
            && average_rpe <= adherence::LOW_RPE
        {
            AdjustmentProposal::new(INCREASE_MULTIPLIER, None, INCREASE_TAG)
        } else if completion_rate >= adherence::MID_COMPLETION {
            AdjustmentProposal::new(NUDGE_UP_MULTIPLIER, None, FINE_TUNE_TAG)
        } else {
            AdjustmentProposal::new(NUDGE_DOWN_MULTIPLIER, None, FINE_TUNE_TAG)
        }
    }
}
