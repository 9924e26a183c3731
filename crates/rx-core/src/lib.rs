// ABOUTME: Core types and constants for the exercise prescription engine
// ABOUTME: Foundation crate with the clinical data model, error taxonomy, and thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

#![deny(unsafe_code)]

//! # Rx Core
//!
//! Foundation crate providing shared types and constants for the exercise
//! prescription engine. It is designed to change infrequently so the engine
//! crate and the application crate can build on a stable vocabulary.
//!
//! ## Modules
//!
//! - **models**: profile, measurements, gate verdicts, prescriptions and adherence logs
//! - **errors**: engine and configuration error types
//! - **constants**: clinical thresholds organised by physiological domain

/// Engine and configuration error types
pub mod errors;

/// Clinical thresholds organised by physiological domain
pub mod constants;

/// Clinical data model shared by every engine
pub mod models;

pub use errors::{ConfigError, EngineError, EngineResult};
