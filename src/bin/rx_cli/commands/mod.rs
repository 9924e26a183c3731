// ABOUTME: Re-exports command modules for rx-cli
// ABOUTME: Provides the gate/prescribe, adjust, normalize, and rules commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

pub mod adjust;
pub mod assess;
pub mod normalize;
pub mod rules;
