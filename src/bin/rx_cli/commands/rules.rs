// ABOUTME: Rule catalog inspection command for rx-cli
// ABOUTME: Prints one rule by id, or the whole catalog in declaration order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use anyhow::Result;
use exercise_rx::intelligence::RuleCatalog;

use crate::helpers::display::print_json;

/// Print a single rule, or every rule when no id is given
pub fn rules(id: Option<&str>) -> Result<()> {
    let catalog = RuleCatalog::new();
    match id {
        Some(id) => print_json(catalog.require(id)?),
        None => print_json(catalog.rules()),
    }
}
