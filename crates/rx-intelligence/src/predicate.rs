// ABOUTME: Declarative rule trigger predicates and the evaluator that runs them
// ABOUTME: Predicates are plain data so rules serialize and can be tested in isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

//! Rule predicates.
//!
//! A predicate reads the profile and the latest vitals through a
//! [`RuleContext`]. Malformed measurements read as absent, so a predicate
//! over a malformed value is simply false.

use rx_core::models::{
    ConditionTag, Measurement, MeasurementKind, UserProfile, VitalsSnapshot,
};
use serde::Serialize;

/// Trigger condition of a prescription rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// `age >= years`
    AgeAtLeast(u32),
    /// `age < years`
    AgeBelow(u32),
    /// `min <= age < max`
    AgeBetween {
        /// Inclusive lower bound
        min: u32,
        /// Exclusive upper bound
        max: u32,
    },
    /// `bmi >= value`; false when BMI is unknown
    BmiAtLeast(f64),
    /// `min <= bmi < max`; false when BMI is unknown
    BmiBetween {
        /// Inclusive lower bound
        min: f64,
        /// Exclusive upper bound
        max: f64,
    },
    /// Profile carries the canonical tag
    HasCondition(ConditionTag),
    /// Latest blood pressure reaches either threshold
    BloodPressureAtLeast {
        /// Systolic threshold (mmHg)
        systolic: f64,
        /// Diastolic threshold (mmHg)
        diastolic: f64,
    },
    /// Latest glucose reaches the threshold for its sample type
    GlucoseAtLeast {
        /// Threshold for fasting samples (mmol/L)
        fasting: f64,
        /// Threshold for random samples (mmol/L)
        random: f64,
    },
    /// Latest heart rate strictly outside `[min, max]`
    HeartRateOutside {
        /// Lower bound (bpm)
        min: f64,
        /// Upper bound (bpm)
        max: f64,
    },
    /// Waist at or above the sex-specific cut-off
    CentralObesity,
    /// Every sub-predicate holds
    All(&'static [Predicate]),
    /// At least one sub-predicate holds
    Any(&'static [Predicate]),
}

/// Inputs a predicate can read
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Canonical profile
    pub profile: &'a UserProfile,
    /// Latest measurement of each kind
    pub vitals: VitalsSnapshot<'a>,
    bmi: Option<f64>,
}

impl<'a> RuleContext<'a> {
    /// Build a context, selecting the latest measurement of each kind
    #[must_use]
    pub fn new(profile: &'a UserProfile, measurements: &'a [Measurement]) -> Self {
        Self {
            profile,
            vitals: VitalsSnapshot::latest(measurements),
            bmi: profile.bmi(),
        }
    }

    /// Profile BMI, computed once per context
    #[must_use]
    pub const fn bmi(&self) -> Option<f64> {
        self.bmi
    }
}

impl Predicate {
    /// Evaluate against a context
    #[must_use]
    pub fn evaluate(&self, ctx: &RuleContext<'_>) -> bool {
        match *self {
            Self::AgeAtLeast(years) => ctx.profile.age >= years,
            Self::AgeBelow(years) => ctx.profile.age < years,
            Self::AgeBetween { min, max } => (min..max).contains(&ctx.profile.age),
            Self::BmiAtLeast(value) => ctx.bmi.is_some_and(|bmi| bmi >= value),
            Self::BmiBetween { min, max } => ctx.bmi.is_some_and(|bmi| bmi >= min && bmi < max),
            Self::HasCondition(tag) => ctx.profile.has_condition(tag),
            Self::BloodPressureAtLeast {
                systolic,
                diastolic,
            } => ctx
                .vitals
                .blood_pressure()
                .is_some_and(|bp| bp.reaches(systolic, diastolic)),
            Self::GlucoseAtLeast { fasting, random } => {
                ctx.vitals.glucose().is_some_and(|bg| {
                    let threshold = if bg.is_fasting { fasting } else { random };
                    bg.value >= threshold
                })
            }
            Self::HeartRateOutside { min, max } => ctx
                .vitals
                .heart_rate()
                .is_some_and(|bpm| bpm < min || bpm > max),
            Self::CentralObesity => ctx.profile.has_central_obesity(),
            Self::All(parts) => parts.iter().all(|p| p.evaluate(ctx)),
            Self::Any(parts) => parts.iter().any(|p| p.evaluate(ctx)),
        }
    }

    /// Measurement kinds this predicate reads, without duplicates
    #[must_use]
    pub fn measurement_kinds(&self) -> Vec<MeasurementKind> {
        let mut kinds = Vec::new();
        self.collect_kinds(&mut kinds);
        kinds
    }

    fn collect_kinds(&self, kinds: &mut Vec<MeasurementKind>) {
        let kind = match self {
            Self::BloodPressureAtLeast { .. } => MeasurementKind::Bp,
            Self::GlucoseAtLeast { .. } => MeasurementKind::Bg,
            Self::HeartRateOutside { .. } => MeasurementKind::Hr,
            Self::All(parts) | Self::Any(parts) => {
                for part in *parts {
                    part.collect_kinds(kinds);
                }
                return;
            }
            _ => return,
        };
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
}
