// ABOUTME: Configuration module for the rx-intelligence crate
// ABOUTME: Re-exports fusion configuration and the process-wide settings accessor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

/// Fusion weights, legacy mode switch, and the shared settings slot
pub mod fusion;

pub use fusion::{FusionConfig, FusionSettings};
pub use rx_core::errors::ConfigError;
