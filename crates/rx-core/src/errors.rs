// ABOUTME: Error taxonomy for the prescription engines and the fusion configuration boundary
// ABOUTME: Defines thiserror enums for invalid input, empty rule sets, and rejected configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

//! Error types.
//!
//! Engines are safety-biased: they return a conservative value instead of an
//! error wherever a value can be produced. Errors surface only at the
//! configuration boundary and at internal guards the orchestrator never trips.

use thiserror::Error;

use crate::models::MeasurementKind;

/// Result alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by the engines
#[derive(Debug, Error)]
pub enum EngineError {
    /// A measurement value is structurally invalid for its kind
    #[error("Invalid {kind} measurement: {reason}")]
    InvalidMeasurement {
        /// Kind of the offending measurement
        kind: MeasurementKind,
        /// What was wrong with it
        reason: String,
    },

    /// Fusion was asked to combine zero rule outputs
    #[error("Fusion requires at least one triggered rule")]
    EmptyRuleSet,

    /// A rule id that is not part of the catalog
    #[error("Unknown rule id: {0}")]
    UnknownRule(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g. negative alpha)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// Priority factor map contains an unusable entry
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Failed to parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// The shared settings lock was poisoned by a panicking writer
    #[error("Fusion settings lock poisoned")]
    Poisoned,
}
