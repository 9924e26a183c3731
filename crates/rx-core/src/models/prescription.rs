// ABOUTME: FITT prescription types: intensity tiers, partial and complete fits, rule outputs
// ABOUTME: Includes the fused prescription record with display rule ids and fusion explanation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exercise intensity tier, ordered from lightest to hardest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Recovery-level activity only
    VeryLow,
    /// Low
    Low,
    /// Low to moderate
    LowMid,
    /// Moderate
    Moderate,
    /// High
    High,
}

impl Intensity {
    /// The lightest tier
    pub const LOWEST: Self = Self::VeryLow;

    /// Ordinal scalar used for fusion arithmetic
    #[must_use]
    pub const fn ordinal(self) -> f64 {
        match self {
            Self::VeryLow => 0.5,
            Self::Low => 1.0,
            Self::LowMid => 1.5,
            Self::Moderate => 2.0,
            Self::High => 3.0,
        }
    }

    /// Nearest fusion tier for an ordinal scalar
    #[must_use]
    pub fn from_ordinal(value: f64) -> Self {
        if value <= 1.25 {
            Self::Low
        } else if value <= 1.75 {
            Self::LowMid
        } else if value <= 2.5 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::LowMid => "low_mid",
            Self::Moderate => "moderate",
            Self::High => "high",
        })
    }
}

/// Complete FITT vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fit {
    /// Sessions per week
    pub freq: u32,
    /// Intensity tier
    pub intensity: Intensity,
    /// Minutes per session
    pub time: u32,
    /// Exercise modality
    pub exercise_type: String,
}

/// FITT fields a single rule chooses to set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartialFit {
    /// Sessions per week
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freq: Option<u32>,
    /// Intensity tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    /// Minutes per session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<u32>,
    /// Exercise modality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_type: Option<String>,
}

impl Fit {
    /// Overwrite the fields the partial fit sets
    pub fn merge(&mut self, partial: &PartialFit) {
        if let Some(freq) = partial.freq {
            self.freq = freq;
        }
        if let Some(intensity) = partial.intensity {
            self.intensity = intensity;
        }
        if let Some(time) = partial.time {
            self.time = time;
        }
        if let Some(exercise_type) = &partial.exercise_type {
            exercise_type.clone_into(&mut self.exercise_type);
        }
    }
}

/// Contribution of one triggered rule, as consumed by fusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutput {
    /// Rule id
    pub id: String,
    /// Rule priority (1-10)
    pub priority: u8,
    /// Confidence in the inputs that triggered the rule (0-1)
    pub confidence: f64,
    /// Proposed FITT fields
    pub fit: PartialFit,
}

/// Per-rule score used for audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleContribution {
    /// Rule id
    pub id: String,
    /// Pre-normalization fused attribute sum
    pub score: f64,
}

/// Why fusion produced what it produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionExplain {
    /// Highest scoring rules, at most three
    pub top: Vec<RuleContribution>,
    /// Global weight scale in effect
    pub alpha: f64,
    /// Cross-rule smoothing weight in effect
    pub beta: f64,
}

/// Final exercise prescription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    /// Prescription id
    pub id: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// FITT vector
    pub fit: Fit,
    /// Every rule that triggered, highest priority first
    pub rule_ids: Vec<String>,
    /// Exactly four ids for the UI; may include display-only rules that did not trigger
    pub rule_ids_for_display: Vec<String>,
    /// Fusion audit data, absent when fusion did not run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain: Option<FusionExplain>,
}
