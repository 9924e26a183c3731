// ABOUTME: Exercise prescription engines: normalization, rules, safety gate, fusion, adjustment
// ABOUTME: Pure synchronous computations over immutable profile, measurement, and log inputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

#![deny(unsafe_code)]

//! # Rx Intelligence
//!
//! Decision-support engines built on the `rx-core` data model.
//!
//! ## Modules
//!
//! - **conditions**: free-text and localized condition names to canonical tags
//! - **predicate**: small expression evaluator used by the rule table
//! - **`rule_catalog`**: the fixed, ordered table of prescription rules
//! - **`safety_gate`**: three-stage pre-exercise screening
//! - **`fusion_engine`**: priority-weighted, kernel-smoothed combination of rule outputs
//! - **`adjustment_engine`**: weekly multipliers from adherence history
//! - **`prescription_engine`**: composes the above into a final prescription
//! - **confidence**: measurement confidence scoring
//! - **config**: fusion configuration and the process-wide settings slot

/// Condition normalization and profile building
pub mod conditions;

/// Measurement confidence scoring
pub mod confidence;

/// Fusion configuration
pub mod config;

/// Rule trigger predicates and their evaluator
pub mod predicate;

/// Static prescription rule table
pub mod rule_catalog;

/// Pre-exercise safety screening
pub mod safety_gate;

/// Weighted fusion of triggered rules
pub mod fusion_engine;

/// Weekly adherence-driven adjustment
pub mod adjustment_engine;

/// Prescription orchestration
pub mod prescription_engine;

pub use adjustment_engine::{AdjustmentEngine, AdjustmentProposal};
pub use config::{FusionConfig, FusionSettings};
pub use fusion_engine::{FusionEngine, FusionOutcome};
pub use prescription_engine::{Assessment, PrescriptionEngine};
pub use rule_catalog::{PrescriptionRule, RuleCatalog};
pub use safety_gate::SafetyGate;

pub use rx_core::{constants, errors, models};
