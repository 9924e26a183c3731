// ABOUTME: Clinical threshold constants for vitals screening and rule predicates
// ABOUTME: Groups blood pressure, glucose, heart rate, anthropometric, and adherence limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

//! Clinical thresholds used throughout the engines.
//!
//! References:
//! - Chinese Guidelines for the Management of Hypertension (2018 revision)
//! - Guideline for the Prevention and Treatment of Type 2 Diabetes in China (2020)
//! - ACSM's Guidelines for Exercise Testing and Prescription, 11th Edition

/// Blood pressure thresholds (mmHg)
pub mod blood_pressure {
    /// Systolic pressure at which exercise is stopped
    pub const STOP_SYSTOLIC: f64 = 180.0;
    /// Diastolic pressure at which exercise is stopped
    pub const STOP_DIASTOLIC: f64 = 110.0;
    /// Systolic pressure requiring caution (grade 2)
    pub const CAUTION_SYSTOLIC: f64 = 160.0;
    /// Diastolic pressure requiring caution (grade 2)
    pub const CAUTION_DIASTOLIC: f64 = 100.0;
    /// Grade 1 hypertension, systolic
    pub const ELEVATED_SYSTOLIC: f64 = 140.0;
    /// Grade 1 hypertension, diastolic
    pub const ELEVATED_DIASTOLIC: f64 = 90.0;
    /// High-normal lower bound, systolic
    pub const HIGH_NORMAL_SYSTOLIC: f64 = 130.0;
    /// High-normal lower bound, diastolic
    pub const HIGH_NORMAL_DIASTOLIC: f64 = 85.0;

    /// Normal screening band, systolic
    pub const SYSTOLIC_MIN: f64 = 90.0;
    /// Normal screening band, systolic
    pub const SYSTOLIC_MAX: f64 = 180.0;
    /// Normal screening band, diastolic
    pub const DIASTOLIC_MIN: f64 = 60.0;
    /// Normal screening band, diastolic
    pub const DIASTOLIC_MAX: f64 = 110.0;

    /// Outside these the band violation is treated as an emergency
    pub const SYSTOLIC_EXTREME_HIGH: f64 = 200.0;
    /// Systolic emergency floor
    pub const SYSTOLIC_EXTREME_LOW: f64 = 80.0;
    /// Diastolic emergency ceiling
    pub const DIASTOLIC_EXTREME_HIGH: f64 = 120.0;
    /// Diastolic emergency floor
    pub const DIASTOLIC_EXTREME_LOW: f64 = 50.0;
}

/// Blood glucose thresholds (mmol/L)
pub mod glucose {
    /// Lower bound of the screening band (fasting and random)
    pub const BAND_MIN: f64 = 3.9;
    /// Fasting screening band upper bound
    pub const FASTING_MAX: f64 = 11.1;
    /// Random screening band upper bound
    pub const RANDOM_MAX: f64 = 16.7;
    /// Emergency ceiling
    pub const EXTREME_HIGH: f64 = 20.0;
    /// Emergency floor
    pub const EXTREME_LOW: f64 = 3.0;

    /// Fasting glucose in the diabetic range
    pub const FASTING_HIGH_TIER: f64 = 7.0;
    /// Impaired fasting glucose
    pub const FASTING_MEDIUM_TIER: f64 = 6.1;
    /// Random glucose in the diabetic range
    pub const RANDOM_HIGH_TIER: f64 = 11.1;
    /// Impaired glucose tolerance
    pub const RANDOM_MEDIUM_TIER: f64 = 7.8;
}

/// Heart rate thresholds (bpm)
pub mod heart_rate {
    /// Screening band lower bound
    pub const BAND_MIN: f64 = 50.0;
    /// Screening band upper bound
    pub const BAND_MAX: f64 = 100.0;
    /// Emergency ceiling
    pub const EXTREME_HIGH: f64 = 120.0;
    /// Emergency floor
    pub const EXTREME_LOW: f64 = 40.0;
    /// Resting tachycardia for prescription purposes
    pub const RESTING_HIGH: f64 = 100.0;
    /// Resting bradycardia for prescription purposes
    pub const RESTING_LOW: f64 = 60.0;
}

/// Anthropometric cut-offs (Chinese adult reference)
pub mod anthropometrics {
    /// BMI below this is underweight
    pub const BMI_UNDERWEIGHT: f64 = 18.5;
    /// BMI at or above this is overweight
    pub const BMI_OVERWEIGHT: f64 = 24.0;
    /// BMI at or above this is obese
    pub const BMI_OBESE: f64 = 28.0;
    /// Central obesity waist cut-off for men (cm)
    pub const WAIST_MALE_CM: f64 = 90.0;
    /// Central obesity waist cut-off for women (cm)
    pub const WAIST_FEMALE_CM: f64 = 85.0;

    /// Baseline intensity: BMI that forces low intensity
    pub const BASELINE_LOW_BMI: f64 = 30.0;
    /// Baseline intensity: BMI that forces low-moderate intensity
    pub const BASELINE_LOW_MID_BMI: f64 = 25.0;
}

/// Age bands (years)
pub mod age {
    /// Older adult band lower bound
    pub const OLDER_ADULT: u32 = 65;
    /// Middle-aged band lower bound
    pub const MIDDLE_AGED: u32 = 40;
    /// Baseline intensity drops to low-moderate from this age
    pub const BASELINE_LOW_MID: u32 = 50;
    /// PAR-Q age scoring, highest band
    pub const PARQ_HIGH: u32 = 75;
}

/// Weekly adherence review
pub mod adherence {
    /// Number of most recent log entries considered
    pub const WINDOW_DAYS: usize = 7;
    /// Completion rate below which the plan is reduced
    pub const LOW_COMPLETION: f64 = 0.6;
    /// Completion rate at or above which the plan may grow
    pub const HIGH_COMPLETION: f64 = 0.9;
    /// Completion rate splitting the mid-range nudges
    pub const MID_COMPLETION: f64 = 0.8;
    /// Average RPE at or above which the plan is reduced
    pub const HIGH_RPE: f64 = 7.0;
    /// Average RPE at or below which the plan may grow
    pub const LOW_RPE: f64 = 5.0;
}
