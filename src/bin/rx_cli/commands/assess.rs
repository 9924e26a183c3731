// ABOUTME: Safety gate and prescription commands for rx-cli
// ABOUTME: Builds the profile, runs the engines, and prints the verdict or assessment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use anyhow::Result;
use exercise_rx::intelligence::{PrescriptionEngine, SafetyGate};
use exercise_rx::logging::AuditLogger;
use std::path::Path;

use crate::helpers::display::print_json;
use crate::helpers::input::{load_fusion_config, load_measurements, load_profile};

/// Print the safety gate verdict
pub fn gate(profile: &Path, measurements: Option<&Path>) -> Result<()> {
    let profile = load_profile(profile)?;
    let measurements = load_measurements(measurements)?;

    let verdict = SafetyGate::check(&profile, &measurements);
    AuditLogger::log_gate_verdict(&verdict);
    print_json(&verdict)
}

/// Print the prescription together with its gate verdict
pub fn prescribe(profile: &Path, measurements: Option<&Path>, config: Option<&Path>) -> Result<()> {
    let profile = load_profile(profile)?;
    let measurements = load_measurements(measurements)?;
    let engine = match config {
        Some(path) => PrescriptionEngine::with_config(load_fusion_config(path)?)?,
        None => PrescriptionEngine::new(),
    };

    let assessment = engine.assess(&profile, &measurements);
    AuditLogger::log_gate_verdict(&assessment.gate);
    AuditLogger::log_prescription(&assessment.prescription);
    print_json(&assessment)
}
