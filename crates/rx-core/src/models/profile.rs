// ABOUTME: User health profile with canonical conditions and derived anthropometrics
// ABOUTME: Includes the raw profile draft and Chinese-adult BMI and blood pressure classifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::condition::ConditionTag;
use super::measurement::BloodPressure;
use crate::constants::{anthropometrics, blood_pressure};

/// Biological sex as recorded in the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
    /// Other or not recorded
    #[default]
    Other,
}

/// Profile as collected by the profile form, before normalization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileDraft {
    /// Age in years
    pub age: u32,
    /// Sex
    #[serde(default)]
    pub sex: Sex,
    /// Height (cm)
    #[serde(default)]
    pub height_cm: Option<f64>,
    /// Weight (kg)
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Waist circumference (cm)
    #[serde(default)]
    pub waist_cm: Option<f64>,
    /// Free-text or localized condition names
    #[serde(default)]
    pub conditions: Vec<String>,
    /// Unstructured medical history
    #[serde(default)]
    pub medical_history: Option<String>,
}

/// Health profile consumed by the engines.
///
/// `conditions` only ever holds canonical tags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Age in years
    pub age: u32,
    /// Sex
    #[serde(default)]
    pub sex: Sex,
    /// Height (cm)
    #[serde(default)]
    pub height_cm: Option<f64>,
    /// Weight (kg)
    #[serde(default)]
    pub weight_kg: Option<f64>,
    /// Waist circumference (cm)
    #[serde(default)]
    pub waist_cm: Option<f64>,
    /// Canonical condition tags
    #[serde(default)]
    pub conditions: BTreeSet<ConditionTag>,
    /// Unstructured medical history, scanned for acute symptoms
    #[serde(default)]
    pub medical_history: Option<String>,
}

/// Chinese adult BMI bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    /// BMI < 18.5
    Underweight,
    /// 18.5 <= BMI < 24
    Normal,
    /// 24 <= BMI < 28
    Overweight,
    /// BMI >= 28
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value
    #[must_use]
    pub fn classify(bmi: f64) -> Self {
        if bmi >= anthropometrics::BMI_OBESE {
            Self::Obese
        } else if bmi >= anthropometrics::BMI_OVERWEIGHT {
            Self::Overweight
        } else if bmi < anthropometrics::BMI_UNDERWEIGHT {
            Self::Underweight
        } else {
            Self::Normal
        }
    }
}

/// Chinese adult blood pressure grading
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureGrade {
    /// Below 130/85
    Normal,
    /// 130-139 / 85-89
    HighNormal,
    /// At or above 140/90
    Grade1,
    /// At or above 160/100
    Grade2,
    /// At or above 180/110
    Grade3,
}

impl BloodPressureGrade {
    /// Grade a reading by its worse component
    #[must_use]
    pub fn classify(reading: &BloodPressure) -> Self {
        if reading.reaches(blood_pressure::STOP_SYSTOLIC, blood_pressure::STOP_DIASTOLIC) {
            Self::Grade3
        } else if reading.reaches(
            blood_pressure::CAUTION_SYSTOLIC,
            blood_pressure::CAUTION_DIASTOLIC,
        ) {
            Self::Grade2
        } else if reading.reaches(
            blood_pressure::ELEVATED_SYSTOLIC,
            blood_pressure::ELEVATED_DIASTOLIC,
        ) {
            Self::Grade1
        } else if reading.reaches(
            blood_pressure::HIGH_NORMAL_SYSTOLIC,
            blood_pressure::HIGH_NORMAL_DIASTOLIC,
        ) {
            Self::HighNormal
        } else {
            Self::Normal
        }
    }
}

impl UserProfile {
    /// Body mass index, if height and weight are both usable
    #[must_use]
    pub fn bmi(&self) -> Option<f64> {
        let height_m = self.height_cm.filter(|h| h.is_finite() && *h > 0.0)? / 100.0;
        let weight = self.weight_kg.filter(|w| w.is_finite() && *w > 0.0)?;
        Some(weight / (height_m * height_m))
    }

    /// BMI band, if BMI is known
    #[must_use]
    pub fn bmi_category(&self) -> Option<BmiCategory> {
        self.bmi().map(BmiCategory::classify)
    }

    /// Waist at or above the sex-specific cut-off; unknown sex never qualifies
    #[must_use]
    pub fn has_central_obesity(&self) -> bool {
        let cutoff = match self.sex {
            Sex::Male => anthropometrics::WAIST_MALE_CM,
            Sex::Female => anthropometrics::WAIST_FEMALE_CM,
            Sex::Other => return false,
        };
        self.waist_cm
            .is_some_and(|waist| waist.is_finite() && waist >= cutoff)
    }

    /// Whether the profile carries a canonical tag
    #[must_use]
    pub fn has_condition(&self, tag: ConditionTag) -> bool {
        self.conditions.contains(&tag)
    }

    /// Medical history text, empty when absent
    #[must_use]
    pub fn history_text(&self) -> &str {
        self.medical_history.as_deref().unwrap_or_default()
    }
}
