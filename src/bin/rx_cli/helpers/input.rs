// ABOUTME: JSON input loading for rx-cli
// ABOUTME: Reads profiles, measurements, adherence logs, and fusion config from files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use anyhow::{anyhow, Result};
use exercise_rx::intelligence::conditions::build_profile;
use exercise_rx::intelligence::FusionConfig;
use exercise_rx::models::{Measurement, ProfileDraft, UserProfile};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read and deserialize a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| anyhow!("Invalid JSON in {}: {e}", path.display()))
}

/// Load a profile draft and normalize its conditions
pub fn load_profile(path: &Path) -> Result<UserProfile> {
    let draft: ProfileDraft = read_json(path)?;
    let profile = build_profile(draft);
    debug!(
        conditions = profile.conditions.len(),
        "Loaded profile from {}",
        path.display()
    );
    Ok(profile)
}

/// Load measurements; none when no file is given
pub fn load_measurements(path: Option<&Path>) -> Result<Vec<Measurement>> {
    path.map_or_else(|| Ok(Vec::new()), read_json)
}

/// Load and validate a fusion configuration file
pub fn load_fusion_config(path: &Path) -> Result<FusionConfig> {
    let config: FusionConfig = read_json(path)?;
    config.validate()?;
    Ok(config)
}
