// ABOUTME: Main library entry point for the exercise prescription decision-support core
// ABOUTME: Re-exports the data model and engines and owns structured logging setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

#![deny(unsafe_code)]

//! # Exercise Rx
//!
//! Clinical decision support for chronic-disease exercise self-management:
//! given a health profile and recent vitals it decides whether exercise is
//! safe now, generates a FITT prescription from a catalog of evidence-tagged
//! rules, and adjusts it weekly from adherence history.
//!
//! ## Architecture
//!
//! - **models** (`rx-core`): profile, measurements, gate verdicts, prescriptions
//! - **intelligence** (`rx-intelligence`): normalizer, rule catalog, safety
//!   gate, fusion, adjustment, and the prescription orchestrator
//! - **logging**: tracing subscriber setup and audit events
//!
//! Every engine is a synchronous, pure computation. The only shared state is
//! the fusion configuration, swapped whole through
//! [`intelligence::FusionSettings`].
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use exercise_rx::intelligence::conditions::build_profile;
//! use exercise_rx::intelligence::PrescriptionEngine;
//! use exercise_rx::models::{Measurement, MeasurementSource, ProfileDraft};
//!
//! let profile = build_profile(ProfileDraft {
//!     age: 68,
//!     conditions: vec!["糖尿病".into()],
//!     ..ProfileDraft::default()
//! });
//! let vitals = [Measurement::glucose(7.5, true, Utc::now(), MeasurementSource::Manual)];
//!
//! let assessment = PrescriptionEngine::new().assess(&profile, &vitals);
//! println!("{} -> {:?}", assessment.gate.status, assessment.prescription.fit);
//! ```

/// Structured logging configuration
pub mod logging;

/// Engines: normalization, rules, gate, fusion, adjustment, orchestration
pub use rx_intelligence as intelligence;

/// Core data model
pub use rx_core::models;

/// Error types
pub use rx_core::errors;

/// Clinical thresholds
pub use rx_core::constants;
