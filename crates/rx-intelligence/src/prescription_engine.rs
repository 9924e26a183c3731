// ABOUTME: Prescription orchestrator: baseline, rule evaluation, fusion, then safety gate override
// ABOUTME: A red gate verdict always wins over fused output; legacy last-rule-wins mode is kept
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

//! Prescription Engine
//!
//! `generate` runs, in order:
//!
//! 1. A baseline fit seeded from age, BMI and cardiovascular risk.
//! 2. Rule evaluation against the catalog.
//! 3. Weighted fusion of the triggered rules, or the legacy merge where the
//!    last triggered rule wins, or the baseline when nothing triggered or
//!    `alpha` is zero.
//! 4. The safety gate. A red verdict lowers frequency, time and intensity.

use chrono::{DateTime, Utc};
use rx_core::constants::{age, anthropometrics, blood_pressure};
use rx_core::errors::ConfigError;
use rx_core::models::{
    ConditionTag, Fit, FusionExplain, GateResult, Intensity, Measurement, Prescription,
    RuleOutput, UserProfile,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{FusionConfig, FusionSettings};
use crate::fusion_engine::{FusionEngine, DEFAULT_EXERCISE_TYPE};
use crate::predicate::RuleContext;
use crate::rule_catalog::{RuleCatalog, DISPLAY_SET_SIZE};
use crate::safety_gate::SafetyGate;

const BASELINE_FREQ: u32 = 3;
const BASELINE_TIME: u32 = 30;

/// Red-gate override floors
const OVERRIDE_MIN_FREQ: u32 = 1;
const OVERRIDE_MIN_TIME: u32 = 20;
const OVERRIDE_TIME_STEP: u32 = 10;

/// Gate verdict together with the prescription it shaped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Safety verdict
    pub gate: GateResult,
    /// Final prescription, already overridden when the gate is red
    pub prescription: Prescription,
}

/// Prescription orchestrator
#[derive(Debug, Clone)]
pub struct PrescriptionEngine {
    catalog: RuleCatalog,
    fusion: FusionEngine,
}

impl Default for PrescriptionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PrescriptionEngine {
    /// Create an engine using a snapshot of the process-wide fusion settings
    #[must_use]
    pub fn new() -> Self {
        Self::from_snapshot(FusionSettings::current())
    }

    /// Create an engine with an explicit fusion configuration
    ///
    /// # Errors
    ///
    /// Returns the validation error when the configuration is rejected
    pub fn with_config(config: FusionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_snapshot(Arc::new(config)))
    }

    fn from_snapshot(config: Arc<FusionConfig>) -> Self {
        Self {
            catalog: RuleCatalog::new(),
            fusion: FusionEngine::from_validated(config),
        }
    }

    /// Fusion configuration in use
    #[must_use]
    pub fn config(&self) -> &FusionConfig {
        self.fusion.config()
    }

    /// Rule catalog in use
    #[must_use]
    pub const fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Generate a prescription now
    #[must_use]
    pub fn generate(&self, profile: &UserProfile, measurements: &[Measurement]) -> Prescription {
        self.assess_at(profile, measurements, Utc::now()).prescription
    }

    /// Generate a prescription together with the gate verdict that shaped it
    #[must_use]
    pub fn assess(&self, profile: &UserProfile, measurements: &[Measurement]) -> Assessment {
        self.assess_at(profile, measurements, Utc::now())
    }

    /// Same as [`Self::assess`] with an explicit clock, used for confidence
    /// weighting and `created_at`
    #[must_use]
    pub fn assess_at(
        &self,
        profile: &UserProfile,
        measurements: &[Measurement],
        now: DateTime<Utc>,
    ) -> Assessment {
        let baseline = Self::baseline_fit(&RuleContext::new(profile, measurements));
        let outputs = if self.config().confidence_weighting {
            self.catalog.evaluate_weighted(profile, measurements, now)
        } else {
            self.catalog.evaluate(profile, measurements)
        };
        let rule_ids: Vec<String> = outputs.iter().map(|o| o.id.clone()).collect();

        let (mut fit, explain) = self.combine(baseline, &outputs);

        let gate = SafetyGate::check(profile, measurements);
        if gate.is_red() {
            let before = fit.clone();
            fit = Self::red_override(fit);
            warn!(
                freq_before = before.freq,
                freq = fit.freq,
                time_before = before.time,
                time = fit.time,
                "Safety gate is red, prescription lowered"
            );
        }

        let rule_ids_for_display = self.catalog.ensure_minimum_display_set(
            &rule_ids,
            profile,
            measurements,
            DISPLAY_SET_SIZE,
        );

        Assessment {
            gate,
            prescription: Prescription {
                id: format!("rx_{}", Uuid::new_v4().simple()),
                created_at: now,
                fit,
                rule_ids,
                rule_ids_for_display,
                explain,
            },
        }
    }

    /// Seed fit before any rule applies
    #[must_use]
    pub fn baseline_fit(ctx: &RuleContext<'_>) -> Fit {
        let bmi = ctx.bmi().unwrap_or_default();
        let cardiovascular_risk = [
            ConditionTag::HeartDisease,
            ConditionTag::CoronaryHeartDisease,
            ConditionTag::Hypertension,
        ]
        .into_iter()
        .any(|tag| ctx.profile.has_condition(tag))
            || ctx.vitals.blood_pressure().is_some_and(|bp| {
                bp.reaches(
                    blood_pressure::ELEVATED_SYSTOLIC,
                    blood_pressure::ELEVATED_DIASTOLIC,
                )
            });

        let intensity = if ctx.profile.age >= age::OLDER_ADULT
            || cardiovascular_risk
            || bmi >= anthropometrics::BASELINE_LOW_BMI
        {
            Intensity::Low
        } else if ctx.profile.age >= age::BASELINE_LOW_MID
            || bmi >= anthropometrics::BASELINE_LOW_MID_BMI
        {
            Intensity::LowMid
        } else {
            Intensity::Moderate
        };

        Fit {
            freq: BASELINE_FREQ,
            intensity,
            time: BASELINE_TIME,
            exercise_type: DEFAULT_EXERCISE_TYPE.to_owned(),
        }
    }

    /// Lower the load after a red verdict; the type is kept
    #[must_use]
    pub fn red_override(fit: Fit) -> Fit {
        Fit {
            freq: fit.freq.saturating_sub(1).max(OVERRIDE_MIN_FREQ),
            intensity: Intensity::LOWEST,
            time: fit
                .time
                .saturating_sub(OVERRIDE_TIME_STEP)
                .max(OVERRIDE_MIN_TIME),
            exercise_type: fit.exercise_type,
        }
    }

    fn combine(&self, baseline: Fit, outputs: &[RuleOutput]) -> (Fit, Option<FusionExplain>) {
        let config = self.config();
        if outputs.is_empty() {
            debug!("No rules triggered, keeping baseline");
            return (baseline, None);
        }
        if !config.use_fusion {
            debug!(rules = outputs.len(), "Legacy mode, last triggered rule wins");
            let mut fit = baseline;
            for output in outputs {
                fit.merge(&output.fit);
            }
            return (fit, None);
        }
        if config.alpha <= 0.0 {
            debug!("Fusion alpha is zero, keeping baseline");
            return (baseline, None);
        }

        match self.fusion.fuse(outputs) {
            Ok(outcome) => (outcome.fused_fit, Some(outcome.explain)),
            Err(e) => {
                warn!(error = %e, "Fusion failed, keeping baseline");
                (baseline, None)
            }
        }
    }
}
