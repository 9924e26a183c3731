// ABOUTME: Measurement confidence scoring from source, recency, and payload completeness
// ABOUTME: Scores are clamped to 0.1-1.0 and rounded to two decimals for audit stability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use chrono::{DateTime, Utc};
use rx_core::models::{Measurement, MeasurementSource};

/// Age at which recency bottoms out (one week)
const RECENCY_WINDOW_HOURS: f64 = 168.0;
/// Recency floor for stale readings
const MIN_RECENCY: f64 = 0.2;
/// Completeness of a payload that does not fit its kind
const MALFORMED_COMPLETENESS: f64 = 0.5;
/// Score bounds
const MIN_CONFIDENCE: f64 = 0.1;
const MAX_CONFIDENCE: f64 = 1.0;

/// Base trust in a measurement source
#[must_use]
pub const fn source_base(source: MeasurementSource) -> f64 {
    match source {
        MeasurementSource::Clinical => 0.9,
        MeasurementSource::Wearable => 0.85,
        MeasurementSource::Manual => 0.6,
    }
}

/// Linear decay over a week, floored at 0.2.
///
/// Readings timestamped in the future are treated by absolute distance.
#[must_use]
pub fn recency_factor(taken_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_hours = (now - taken_at).num_seconds().abs() as f64 / 3600.0;
    (1.0 - age_hours / RECENCY_WINDOW_HOURS).clamp(MIN_RECENCY, 1.0)
}

/// Confidence in a single measurement at `now`
#[must_use]
pub fn measurement_confidence(measurement: &Measurement, now: DateTime<Utc>) -> f64 {
    let completeness = if measurement.validate().is_ok() {
        1.0
    } else {
        MALFORMED_COMPLETENESS
    };
    let score = source_base(measurement.source)
        * recency_factor(measurement.taken_at, now)
        * completeness;
    round2(score.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
