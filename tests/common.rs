// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides a fixed clock, profile builders, and measurement helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `exercise_rx`

use chrono::{DateTime, Duration, TimeZone, Utc};
use exercise_rx::intelligence::conditions::build_profile;
use exercise_rx::models::{
    AdherenceLog, Measurement, MeasurementKind, MeasurementSource, MeasurementValue, ProfileDraft,
    Sex, UserProfile,
};
use std::env;
use std::sync::Once;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fixed "now" so recency and `created_at` are reproducible
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, 0).unwrap()
}

/// A time `hours` before [`now`]
pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    now() - Duration::hours(hours)
}

/// Profile of the given age with localized condition names
pub fn profile(age: u32, conditions: &[&str]) -> UserProfile {
    build_profile(ProfileDraft {
        age,
        conditions: conditions.iter().map(|c| (*c).to_owned()).collect(),
        ..ProfileDraft::default()
    })
}

/// Profile with anthropometrics
pub fn profile_with_body(
    age: u32,
    sex: Sex,
    height_cm: f64,
    weight_kg: f64,
    waist_cm: Option<f64>,
    conditions: &[&str],
) -> UserProfile {
    build_profile(ProfileDraft {
        age,
        sex,
        height_cm: Some(height_cm),
        weight_kg: Some(weight_kg),
        waist_cm,
        conditions: conditions.iter().map(|c| (*c).to_owned()).collect(),
        medical_history: None,
    })
}

/// Profile with a free-text medical history
pub fn profile_with_history(age: u32, conditions: &[&str], history: &str) -> UserProfile {
    build_profile(ProfileDraft {
        age,
        conditions: conditions.iter().map(|c| (*c).to_owned()).collect(),
        medical_history: Some(history.to_owned()),
        ..ProfileDraft::default()
    })
}

/// Clinical blood pressure reading taken at [`now`]
pub fn bp(systolic: f64, diastolic: f64) -> Measurement {
    Measurement::blood_pressure(systolic, diastolic, now(), MeasurementSource::Clinical)
}

/// Fasting glucose reading taken at [`now`]
pub fn fasting_glucose(value: f64) -> Measurement {
    Measurement::glucose(value, true, now(), MeasurementSource::Manual)
}

/// Random glucose reading taken at [`now`]
pub fn random_glucose(value: f64) -> Measurement {
    Measurement::glucose(value, false, now(), MeasurementSource::Manual)
}

/// Wearable heart rate reading taken at [`now`]
pub fn heart_rate(bpm: f64) -> Measurement {
    Measurement::heart_rate(bpm, now(), MeasurementSource::Wearable)
}

/// Measurement whose payload does not fit any shape
pub fn malformed(kind: MeasurementKind) -> Measurement {
    Measurement {
        kind,
        value: MeasurementValue::Malformed(serde_json::json!("n/a")),
        taken_at: now(),
        source: MeasurementSource::Manual,
    }
}

/// One adherence log `days_ago` days before [`now`]
pub fn log(days_ago: i64, planned: u32, completed: u32, rpe: Option<u8>) -> AdherenceLog {
    AdherenceLog {
        date: (now() - Duration::days(days_ago)).date_naive(),
        planned_minutes: planned,
        completed_minutes: completed,
        rpe,
        symptoms: Vec::new(),
    }
}

/// A full week with identical entries
pub fn week(planned: u32, completed: u32, rpe: Option<u8>) -> Vec<AdherenceLog> {
    (0..7).map(|d| log(d, planned, completed, rpe)).collect()
}

/// Approximate float equality for assertions
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
