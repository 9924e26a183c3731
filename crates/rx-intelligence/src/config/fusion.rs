// ABOUTME: Fusion engine configuration with validation, environment overrides, and atomic swapping
// ABOUTME: The shared settings slot is replaced whole so readers never see a half-updated config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

//! Fusion Configuration
//!
//! `FusionConfig` holds the weights used to combine triggered rules and the
//! switch for the legacy "last rule wins" mode. A process-wide copy lives in
//! [`FusionSettings`]; engines take an `Arc` snapshot per call, and writers
//! swap in a validated replacement.

use rx_core::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::mem;
use std::str::FromStr;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{info, warn};

/// Floor applied to the default priority-derived weight
const MIN_PRIORITY_FACTOR: f64 = 0.1;

/// Global settings slot
static FUSION_SETTINGS: OnceLock<RwLock<Arc<FusionConfig>>> = OnceLock::new();

/// Fusion engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Weighted fusion when true, legacy "last triggered rule wins" when false
    pub use_fusion: bool,
    /// Global weight scale; zero keeps the baseline prescription
    pub alpha: f64,
    /// Cross-rule smoothing weight
    pub beta: f64,
    /// Explicit priority to weight overrides
    pub priority_factors: BTreeMap<u8, f64>,
    /// Off-diagonal kernel seed shared by every pair of rules
    pub kernel_init: f64,
    /// Scale measurement-driven rules by the confidence of their measurements
    pub confidence_weighting: bool,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            use_fusion: true,
            alpha: 1.0,
            beta: 0.1,
            priority_factors: BTreeMap::new(),
            kernel_init: 0.0,
            confidence_weighting: false,
        }
    }
}

impl FusionConfig {
    /// Weight factor for a rule priority
    #[must_use]
    pub fn priority_factor(&self, priority: u8) -> f64 {
        self.priority_factors
            .get(&priority)
            .copied()
            .unwrap_or_else(|| (f64::from(priority) / 10.0).max(MIN_PRIORITY_FACTOR))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error for negative or non-finite weights, a kernel seed
    /// outside `[0, 1]`, or a priority factor entry outside `1..=10`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(ConfigError::InvalidRange(
                "alpha must be a finite number >= 0",
            ));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(ConfigError::InvalidRange("beta must be a finite number >= 0"));
        }
        if !self.kernel_init.is_finite() || !(0.0..=1.0).contains(&self.kernel_init) {
            return Err(ConfigError::ValueOutOfRange(
                "kernel_init must be between 0 and 1",
            ));
        }
        for (priority, factor) in &self.priority_factors {
            if !(1..=10).contains(priority) {
                return Err(ConfigError::InvalidWeights(format!(
                    "priority {priority} is outside 1-10"
                )));
            }
            if !factor.is_finite() || *factor < 0.0 {
                return Err(ConfigError::InvalidWeights(format!(
                    "factor for priority {priority} must be a finite number >= 0"
                )));
            }
        }
        Ok(())
    }

    /// Load defaults overridden by `RX_FUSION_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the result fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        Self::apply_env_var("RX_FUSION_ENABLED", &mut config.use_fusion)?;
        Self::apply_env_var("RX_FUSION_ALPHA", &mut config.alpha)?;
        Self::apply_env_var("RX_FUSION_BETA", &mut config.beta)?;
        Self::apply_env_var("RX_FUSION_KERNEL_INIT", &mut config.kernel_init)?;
        Self::apply_env_var(
            "RX_FUSION_CONFIDENCE_WEIGHTING",
            &mut config.confidence_weighting,
        )?;
        if let Ok(raw) = env::var("RX_FUSION_PRIORITY_FACTORS") {
            config.priority_factors = Self::parse_priority_factors(&raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse `"8:0.8,7:0.7"` into a priority factor map
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for entries that are not `priority:factor`
    pub fn parse_priority_factors(raw: &str) -> Result<BTreeMap<u8, f64>, ConfigError> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (priority, factor) = entry
                    .split_once(':')
                    .ok_or_else(|| ConfigError::Parse(format!("Invalid priority factor {entry}")))?;
                let priority = priority
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| ConfigError::Parse(format!("Invalid priority in {entry}")))?;
                let factor = factor
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::Parse(format!("Invalid factor in {entry}")))?;
                Ok((priority, factor))
            })
            .collect()
    }

    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }
}

/// Process-wide fusion settings.
///
/// Single writer, many readers: `install` swaps a whole validated
/// `FusionConfig`; `current` hands out the snapshot in effect.
pub struct FusionSettings;

impl FusionSettings {
    fn slot() -> &'static RwLock<Arc<FusionConfig>> {
        FUSION_SETTINGS.get_or_init(|| {
            let config = FusionConfig::from_env().unwrap_or_else(|e| {
                warn!(error = %e, "Failed to load fusion config, using defaults");
                FusionConfig::default()
            });
            RwLock::new(Arc::new(config))
        })
    }

    /// Snapshot of the configuration in effect
    #[must_use]
    pub fn current() -> Arc<FusionConfig> {
        // The slot only ever holds a complete Arc, so a poisoned lock still reads consistently
        let guard = Self::slot()
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Validate and install a new configuration, returning the previous one
    ///
    /// # Errors
    ///
    /// Returns the validation error and leaves the settings untouched, or
    /// `ConfigError::Poisoned` if a writer panicked while holding the lock
    pub fn install(config: FusionConfig) -> Result<Arc<FusionConfig>, ConfigError> {
        if let Err(e) = config.validate() {
            warn!(error = %e, "Rejected fusion config");
            return Err(e);
        }
        let replacement = Arc::new(config);
        let previous = {
            let mut guard = Self::slot().write().map_err(|_| ConfigError::Poisoned)?;
            mem::replace(&mut *guard, Arc::clone(&replacement))
        };
        info!(
            use_fusion = replacement.use_fusion,
            alpha = replacement.alpha,
            beta = replacement.beta,
            kernel_init = replacement.kernel_init,
            priority_overrides = replacement.priority_factors.len(),
            "Installed fusion config"
        );
        Ok(previous)
    }

    /// Restore the default configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Poisoned` if the lock is poisoned
    pub fn reset() -> Result<Arc<FusionConfig>, ConfigError> {
        Self::install(FusionConfig::default())
    }
}
