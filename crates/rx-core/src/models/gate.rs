// ABOUTME: Pre-exercise safety gate verdict types
// ABOUTME: Tri-state status ordered by severity plus reasons and a suggested action
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gate status, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateStatus {
    /// Exercise as prescribed
    Green,
    /// Exercise at reduced load
    Yellow,
    /// Do not exercise
    Red,
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        })
    }
}

/// Immutable safety verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateResult {
    /// Verdict
    pub status: GateStatus,
    /// Reasons in the order they were found
    pub reasons: Vec<String>,
    /// Most severe suggested action, absent when green
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl GateResult {
    /// A clear verdict
    #[must_use]
    pub const fn green() -> Self {
        Self {
            status: GateStatus::Green,
            reasons: Vec::new(),
            suggested_action: None,
        }
    }

    /// True when exercise must not start
    #[must_use]
    pub fn is_red(&self) -> bool {
        self.status == GateStatus::Red
    }
}
