// ABOUTME: Priority-weighted, kernel-smoothed fusion of triggered rule outputs into one FITT vector
// ABOUTME: Order independent: inputs are put in canonical id order before any arithmetic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

//! Fusion Engine
//!
//! For `n` triggered rules with weights `w_i = alpha * factor(priority_i) * confidence_i`
//! and a kernel `K` (diagonal 1, off-diagonal `kernel_init`), each attribute
//! vector `v` (frequency, time, intensity ordinal) is fused as
//!
//! ```text
//! fused_i = w_i * v_i + beta * sum_j K[i][j] * v_j
//! value   = sum_i fused_i / (sum_i w_i + beta * n)
//! ```
//!
//! A single rule still receives the `beta` self-term.

use rx_core::errors::{ConfigError, EngineError, EngineResult};
use rx_core::models::{Fit, FusionExplain, Intensity, RuleContribution, RuleOutput};
use std::sync::Arc;
use tracing::debug;

use crate::config::{FusionConfig, FusionSettings};

/// Exercise type used when no triggered rule names one
pub const DEFAULT_EXERCISE_TYPE: &str = "brisk walking";

/// Rules reported in `explain.top`
const TOP_CONTRIBUTIONS: usize = 3;
/// Guard against a zero denominator when every weight is zero
const MIN_WEIGHT_SUM: f64 = 1e-6;
const MIN_FREQ: f64 = 1.0;
const MIN_TIME: f64 = 10.0;

/// Result of fusing a set of rule outputs
#[derive(Debug, Clone, PartialEq)]
pub struct FusionOutcome {
    /// Fused prescription fields
    pub fused_fit: Fit,
    /// Audit summary
    pub explain: FusionExplain,
    /// Every rule's pre-normalization score, in ascending id order
    pub raw_contributions: Vec<RuleContribution>,
}

/// Per-attribute fused vectors
struct Fused {
    freq: Vec<f64>,
    time: Vec<f64>,
    intensity: Vec<f64>,
}

impl Fused {
    fn score(&self, i: usize) -> f64 {
        self.freq[i] + self.time[i] + self.intensity[i]
    }
}

/// Weighted rule fusion
#[derive(Debug, Clone)]
pub struct FusionEngine {
    config: Arc<FusionConfig>,
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FusionEngine {
    /// Create an engine using the process-wide settings in effect now
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: FusionSettings::current(),
        }
    }

    /// Create an engine with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns the validation error when the configuration is rejected
    pub fn with_config(config: Arc<FusionConfig>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Wrap a snapshot that has already passed validation
    pub(crate) const fn from_validated(config: Arc<FusionConfig>) -> Self {
        Self { config }
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &FusionConfig {
        &self.config
    }

    /// Fuse triggered rule outputs into a single fit
    ///
    /// # Errors
    ///
    /// Returns `EngineError::EmptyRuleSet` when `rule_outputs` is empty
    pub fn fuse(&self, rule_outputs: &[RuleOutput]) -> EngineResult<FusionOutcome> {
        if rule_outputs.is_empty() {
            return Err(EngineError::EmptyRuleSet);
        }

        let mut rules: Vec<&RuleOutput> = rule_outputs.iter().collect();
        rules.sort_by(|a, b| a.id.cmp(&b.id).then(a.priority.cmp(&b.priority)));

        let config = &*self.config;
        let weights: Vec<f64> = rules
            .iter()
            .map(|r| config.alpha * config.priority_factor(r.priority) * r.confidence)
            .collect();

        let freq: Vec<f64> = rules
            .iter()
            .map(|r| r.fit.freq.map_or(0.0, f64::from))
            .collect();
        let time: Vec<f64> = rules
            .iter()
            .map(|r| r.fit.time.map_or(0.0, f64::from))
            .collect();
        let intensity: Vec<f64> = rules
            .iter()
            .map(|r| r.fit.intensity.map_or(0.0, Intensity::ordinal))
            .collect();

        let kernel = Kernel::uniform(rules.len(), config.kernel_init);
        let fused = Fused {
            freq: self.fuse_attribute(&kernel, &weights, &freq),
            time: self.fuse_attribute(&kernel, &weights, &time),
            intensity: self.fuse_attribute(&kernel, &weights, &intensity),
        };

        let n = rules.len() as f64;
        let weight_sum = (weights.iter().sum::<f64>() + config.beta * n).max(MIN_WEIGHT_SUM);
        let normalized = |values: &[f64]| values.iter().sum::<f64>() / weight_sum;

        let raw_contributions: Vec<RuleContribution> = rules
            .iter()
            .enumerate()
            .map(|(i, r)| RuleContribution {
                id: r.id.clone(),
                score: fused.score(i),
            })
            .collect();

        let mut ranked: Vec<usize> = (0..rules.len()).collect();
        ranked.sort_by(|&a, &b| {
            raw_contributions[b]
                .score
                .total_cmp(&raw_contributions[a].score)
                .then_with(|| raw_contributions[a].id.cmp(&raw_contributions[b].id))
        });

        let exercise_type = ranked
            .iter()
            .find_map(|&i| rules[i].fit.exercise_type.as_deref())
            .unwrap_or(DEFAULT_EXERCISE_TYPE)
            .to_owned();

        let fused_fit = Fit {
            freq: normalized(&fused.freq).round().max(MIN_FREQ) as u32,
            intensity: Intensity::from_ordinal(normalized(&fused.intensity)),
            time: normalized(&fused.time).round().max(MIN_TIME) as u32,
            exercise_type,
        };

        let top: Vec<RuleContribution> = ranked
            .iter()
            .take(TOP_CONTRIBUTIONS)
            .map(|&i| raw_contributions[i].clone())
            .collect();

        debug!(
            rules = rules.len(),
            freq = fused_fit.freq,
            time = fused_fit.time,
            intensity = %fused_fit.intensity,
            top_rule = top.first().map_or("", |c| c.id.as_str()),
            "Fused rule outputs"
        );

        Ok(FusionOutcome {
            fused_fit,
            explain: FusionExplain {
                top,
                alpha: config.alpha,
                beta: config.beta,
            },
            raw_contributions,
        })
    }

    /// `w_i * v_i + beta * sum_j K[i][j] * v_j` for every rule `i`
    fn fuse_attribute(&self, kernel: &Kernel, weights: &[f64], values: &[f64]) -> Vec<f64> {
        let beta = self.config.beta;
        kernel
            .rows
            .iter()
            .zip(weights.iter().zip(values))
            .map(|(row, (w, v))| {
                let smoothed: f64 = row.iter().zip(values).map(|(k, v_j)| k * v_j).sum();
                w * v + beta * smoothed
            })
            .collect()
    }
}

/// Symmetric `n x n` coupling matrix with unit diagonal
struct Kernel {
    rows: Vec<Vec<f64>>,
}

impl Kernel {
    fn uniform(n: usize, off_diagonal: f64) -> Self {
        let rows = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| if i == j { 1.0 } else { off_diagonal })
                    .collect()
            })
            .collect();
        Self { rows }
    }
}
