// ABOUTME: Vital sign measurements (blood pressure, glucose, heart rate) and latest-value selection
// ABOUTME: Tolerates malformed payloads so the safety gate can report them instead of failing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{EngineError, EngineResult};

/// Kind of vital sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    /// Blood pressure (mmHg)
    Bp,
    /// Blood glucose (mmol/L)
    Bg,
    /// Heart rate (bpm)
    Hr,
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bp => "bp",
            Self::Bg => "bg",
            Self::Hr => "hr",
        })
    }
}

/// Where a measurement came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSource {
    /// Taken by a clinician
    Clinical,
    /// Synced from a wearable device
    Wearable,
    /// Typed in by the user
    Manual,
}

/// Raw measurement payload.
///
/// The shape is not tied to the kind at parse time: a payload that does not
/// fit its kind, or does not fit any shape, is kept and reported as invalid
/// by the consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    /// `{systolic, diastolic}`
    Pressure {
        /// Systolic pressure (mmHg)
        systolic: f64,
        /// Diastolic pressure (mmHg)
        diastolic: f64,
    },
    /// `{value, is_fasting?}`
    Glucose {
        /// Glucose (mmol/L)
        value: f64,
        /// Fasting sample; absent means random
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_fasting: Option<bool>,
    },
    /// Bare number (heart rate, or a legacy random glucose)
    Scalar(f64),
    /// Anything else
    Malformed(serde_json::Value),
}

/// A single vital sign reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Vital sign kind
    #[serde(rename = "type")]
    pub kind: MeasurementKind,
    /// Payload, shape depends on kind
    pub value: MeasurementValue,
    /// When the reading was taken
    pub taken_at: DateTime<Utc>,
    /// Origin of the reading
    pub source: MeasurementSource,
}

/// Validated blood pressure reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloodPressure {
    /// Systolic pressure (mmHg)
    pub systolic: f64,
    /// Diastolic pressure (mmHg)
    pub diastolic: f64,
}

impl BloodPressure {
    /// True when either component reaches the given thresholds
    #[must_use]
    pub fn reaches(&self, systolic: f64, diastolic: f64) -> bool {
        self.systolic >= systolic || self.diastolic >= diastolic
    }
}

/// Validated glucose reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glucose {
    /// Glucose (mmol/L)
    pub value: f64,
    /// Fasting sample
    pub is_fasting: bool,
}

impl Measurement {
    /// Blood pressure reading
    #[must_use]
    pub const fn blood_pressure(
        systolic: f64,
        diastolic: f64,
        taken_at: DateTime<Utc>,
        source: MeasurementSource,
    ) -> Self {
        Self {
            kind: MeasurementKind::Bp,
            value: MeasurementValue::Pressure {
                systolic,
                diastolic,
            },
            taken_at,
            source,
        }
    }

    /// Glucose reading
    #[must_use]
    pub const fn glucose(
        value: f64,
        is_fasting: bool,
        taken_at: DateTime<Utc>,
        source: MeasurementSource,
    ) -> Self {
        Self {
            kind: MeasurementKind::Bg,
            value: MeasurementValue::Glucose {
                value,
                is_fasting: Some(is_fasting),
            },
            taken_at,
            source,
        }
    }

    /// Heart rate reading
    #[must_use]
    pub const fn heart_rate(bpm: f64, taken_at: DateTime<Utc>, source: MeasurementSource) -> Self {
        Self {
            kind: MeasurementKind::Hr,
            value: MeasurementValue::Scalar(bpm),
            taken_at,
            source,
        }
    }

    /// Validate the payload against the kind
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidMeasurement` when the payload shape does
    /// not fit the kind or a component is not a finite number
    pub fn validate(&self) -> EngineResult<()> {
        match self.kind {
            MeasurementKind::Bp => self.as_blood_pressure().map(|_| ()),
            MeasurementKind::Bg => self.as_glucose().map(|_| ()),
            MeasurementKind::Hr => self.as_heart_rate().map(|_| ()),
        }
    }

    /// Interpret as a blood pressure reading
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidMeasurement` for any other shape or non-finite values
    pub fn as_blood_pressure(&self) -> EngineResult<BloodPressure> {
        match (self.kind, &self.value) {
            (
                MeasurementKind::Bp,
                MeasurementValue::Pressure {
                    systolic,
                    diastolic,
                },
            ) if systolic.is_finite() && diastolic.is_finite() => Ok(BloodPressure {
                systolic: *systolic,
                diastolic: *diastolic,
            }),
            _ => Err(self.invalid("expected finite {systolic, diastolic}")),
        }
    }

    /// Interpret as a glucose reading; a bare number is a random sample
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidMeasurement` for any other shape or non-finite values
    pub fn as_glucose(&self) -> EngineResult<Glucose> {
        match (self.kind, &self.value) {
            (MeasurementKind::Bg, MeasurementValue::Glucose { value, is_fasting })
                if value.is_finite() =>
            {
                Ok(Glucose {
                    value: *value,
                    is_fasting: is_fasting.unwrap_or(false),
                })
            }
            (MeasurementKind::Bg, MeasurementValue::Scalar(value)) if value.is_finite() => {
                Ok(Glucose {
                    value: *value,
                    is_fasting: false,
                })
            }
            _ => Err(self.invalid("expected finite {value, is_fasting?} or number")),
        }
    }

    /// Interpret as a heart rate in bpm
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidMeasurement` for any other shape or non-finite values
    pub fn as_heart_rate(&self) -> EngineResult<f64> {
        match (self.kind, &self.value) {
            (MeasurementKind::Hr, MeasurementValue::Scalar(bpm)) if bpm.is_finite() => Ok(*bpm),
            _ => Err(self.invalid("expected finite number")),
        }
    }

    fn invalid(&self, reason: &str) -> EngineError {
        EngineError::InvalidMeasurement {
            kind: self.kind,
            reason: reason.to_owned(),
        }
    }
}

/// Most recent measurement of each kind
#[derive(Debug, Clone, Copy, Default)]
pub struct VitalsSnapshot<'a> {
    /// Latest blood pressure measurement
    pub bp: Option<&'a Measurement>,
    /// Latest glucose measurement
    pub bg: Option<&'a Measurement>,
    /// Latest heart rate measurement
    pub hr: Option<&'a Measurement>,
}

impl<'a> VitalsSnapshot<'a> {
    /// Select the most recent measurement of each kind by `taken_at`
    #[must_use]
    pub fn latest(measurements: &'a [Measurement]) -> Self {
        let pick = |kind: MeasurementKind| {
            measurements
                .iter()
                .filter(|m| m.kind == kind)
                .max_by_key(|m| m.taken_at)
        };
        Self {
            bp: pick(MeasurementKind::Bp),
            bg: pick(MeasurementKind::Bg),
            hr: pick(MeasurementKind::Hr),
        }
    }

    /// Latest well-formed blood pressure; malformed counts as absent
    #[must_use]
    pub fn blood_pressure(&self) -> Option<BloodPressure> {
        self.bp.and_then(|m| m.as_blood_pressure().ok())
    }

    /// Latest well-formed glucose; malformed counts as absent
    #[must_use]
    pub fn glucose(&self) -> Option<Glucose> {
        self.bg.and_then(|m| m.as_glucose().ok())
    }

    /// Latest well-formed heart rate; malformed counts as absent
    #[must_use]
    pub fn heart_rate(&self) -> Option<f64> {
        self.hr.and_then(|m| m.as_heart_rate().ok())
    }

    /// Validation errors for the selected measurements
    #[must_use]
    pub fn invalid(&self) -> Vec<EngineError> {
        [self.bp, self.bg, self.hr]
            .into_iter()
            .flatten()
            .filter_map(|m| m.validate().err())
            .collect()
    }

    /// The selected measurement of a kind
    #[must_use]
    pub const fn get(&self, kind: MeasurementKind) -> Option<&'a Measurement> {
        match kind {
            MeasurementKind::Bp => self.bp,
            MeasurementKind::Bg => self.bg,
            MeasurementKind::Hr => self.hr,
        }
    }
}
