// ABOUTME: Daily exercise adherence log entry appended by the exercise logger
// ABOUTME: Planned versus completed minutes with optional perceived exertion and symptoms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of exercise adherence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdherenceLog {
    /// Calendar day
    pub date: NaiveDate,
    /// Minutes the plan called for
    pub planned_minutes: u32,
    /// Minutes actually done
    pub completed_minutes: u32,
    /// Rating of perceived exertion (1-10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<u8>,
    /// Symptoms noted during or after exercise
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symptoms: Vec<String>,
}

impl AdherenceLog {
    /// RPE if it lies on the 1-10 scale
    #[must_use]
    pub fn valid_rpe(&self) -> Option<u8> {
        self.rpe.filter(|rpe| (1..=10).contains(rpe))
    }
}
