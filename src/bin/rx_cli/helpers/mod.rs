// ABOUTME: Re-exports helper modules for rx-cli
// ABOUTME: Provides JSON input loading and output printing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

pub mod display;
pub mod input;
