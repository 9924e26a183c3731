// ABOUTME: Condition normalization command for rx-cli
// ABOUTME: Prints canonical codes with their Chinese display labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use anyhow::Result;
use exercise_rx::intelligence::conditions::{extract_from_text, normalize as normalize_tags};
use serde::Serialize;

use crate::helpers::display::print_json;

#[derive(Serialize)]
struct NormalizedTag {
    code: &'static str,
    label_zh: &'static str,
}

/// Print the canonical tags for the given names and history text
pub fn normalize(conditions: &[String], history: Option<&str>) -> Result<()> {
    let mut tags = normalize_tags(conditions);
    if let Some(text) = history {
        tags.extend(extract_from_text(text));
    }

    let output: Vec<NormalizedTag> = tags
        .into_iter()
        .map(|tag| NormalizedTag {
            code: tag.as_str(),
            label_zh: tag.display_label_zh(),
        })
        .collect();
    print_json(&output)
}
