// ABOUTME: Canonical chronic-condition vocabulary consumed by every rule
// ABOUTME: English snake_case codes with Chinese display labels for the UI layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical condition tag.
///
/// Free text never enters the engines; it is normalized to one of these
/// codes when a profile is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionTag {
    /// Hypertension
    Hypertension,
    /// Diabetes mellitus
    Diabetes,
    /// Unspecified heart disease
    HeartDisease,
    /// Coronary heart disease
    CoronaryHeartDisease,
    /// Obesity
    Obesity,
    /// Hyperlipidemia / dyslipidemia
    Hyperlipidemia,
    /// Fatty liver disease
    FattyLiver,
    /// Arthritis (any joint)
    Arthritis,
    /// Heart failure
    HeartFailure,
    /// Arrhythmia
    Arrhythmia,
    /// Stroke
    Stroke,
    /// Osteoporosis
    Osteoporosis,
    /// Knee osteoarthritis
    KneeOsteoarthritis,
    /// Low back pain
    LowBackPain,
    /// Angina pectoris
    Angina,
}

impl ConditionTag {
    /// Every tag, in declaration order
    pub const ALL: [Self; 15] = [
        Self::Hypertension,
        Self::Diabetes,
        Self::HeartDisease,
        Self::CoronaryHeartDisease,
        Self::Obesity,
        Self::Hyperlipidemia,
        Self::FattyLiver,
        Self::Arthritis,
        Self::HeartFailure,
        Self::Arrhythmia,
        Self::Stroke,
        Self::Osteoporosis,
        Self::KneeOsteoarthritis,
        Self::LowBackPain,
        Self::Angina,
    ];

    /// Canonical code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hypertension => "hypertension",
            Self::Diabetes => "diabetes",
            Self::HeartDisease => "heart_disease",
            Self::CoronaryHeartDisease => "coronary_heart_disease",
            Self::Obesity => "obesity",
            Self::Hyperlipidemia => "hyperlipidemia",
            Self::FattyLiver => "fatty_liver",
            Self::Arthritis => "arthritis",
            Self::HeartFailure => "heart_failure",
            Self::Arrhythmia => "arrhythmia",
            Self::Stroke => "stroke",
            Self::Osteoporosis => "osteoporosis",
            Self::KneeOsteoarthritis => "knee_osteoarthritis",
            Self::LowBackPain => "low_back_pain",
            Self::Angina => "angina",
        }
    }

    /// Parse a canonical code; anything else is `None`
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == code)
    }

    /// Chinese display label
    #[must_use]
    pub const fn display_label_zh(self) -> &'static str {
        match self {
            Self::Hypertension => "高血压",
            Self::Diabetes => "糖尿病",
            Self::HeartDisease => "心脏病",
            Self::CoronaryHeartDisease => "冠心病",
            Self::Obesity => "肥胖",
            Self::Hyperlipidemia => "高脂血症",
            Self::FattyLiver => "脂肪肝",
            Self::Arthritis => "关节炎",
            Self::HeartFailure => "心力衰竭",
            Self::Arrhythmia => "心律失常",
            Self::Stroke => "卒中",
            Self::Osteoporosis => "骨质疏松",
            Self::KneeOsteoarthritis => "膝骨关节炎",
            Self::LowBackPain => "下背痛",
            Self::Angina => "心绞痛",
        }
    }
}

impl fmt::Display for ConditionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
