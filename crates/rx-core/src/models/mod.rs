// ABOUTME: Clinical data model module re-exports
// ABOUTME: Profile, measurement, gate, prescription, and adherence types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

//! Data model shared by the engines and their collaborators.

/// Adherence log entries
pub mod adherence;
/// Canonical condition vocabulary
pub mod condition;
/// Safety gate verdicts
pub mod gate;
/// Vital sign measurements
pub mod measurement;
/// FITT prescriptions
pub mod prescription;
/// User health profile
pub mod profile;

pub use adherence::AdherenceLog;
pub use condition::ConditionTag;
pub use gate::{GateResult, GateStatus};
pub use measurement::{
    BloodPressure, Glucose, Measurement, MeasurementKind, MeasurementSource, MeasurementValue,
    VitalsSnapshot,
};
pub use prescription::{
    Fit, FusionExplain, Intensity, PartialFit, Prescription, RuleContribution, RuleOutput,
};
pub use profile::{BloodPressureGrade, BmiCategory, ProfileDraft, Sex, UserProfile};
