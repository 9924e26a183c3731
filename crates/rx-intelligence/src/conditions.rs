// ABOUTME: Condition normalizer mapping localized or free-text disease names to canonical tags
// ABOUTME: Exact dictionary first, then keyword heuristics; unmatched text is dropped silently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

//! Condition normalization.
//!
//! Canonicalization never fails: text that matches nothing is dropped so a
//! prescription can always be generated.

use rx_core::models::{ConditionTag, ProfileDraft, UserProfile};
use std::collections::BTreeSet;
use tracing::debug;

/// Exact names (Chinese and English) mapped to canonical tags
const EXACT_NAMES: &[(&str, ConditionTag)] = &[
    ("高血压", ConditionTag::Hypertension),
    ("糖尿病", ConditionTag::Diabetes),
    ("心脏病", ConditionTag::HeartDisease),
    ("冠心病", ConditionTag::CoronaryHeartDisease),
    ("缺血性心脏病", ConditionTag::CoronaryHeartDisease),
    ("冠状动脉粥样硬化性心脏病", ConditionTag::CoronaryHeartDisease),
    ("肥胖", ConditionTag::Obesity),
    ("高脂血症", ConditionTag::Hyperlipidemia),
    ("高血脂", ConditionTag::Hyperlipidemia),
    ("血脂异常", ConditionTag::Hyperlipidemia),
    ("脂肪肝", ConditionTag::FattyLiver),
    ("骨关节炎", ConditionTag::Arthritis),
    ("关节炎", ConditionTag::Arthritis),
    ("心力衰竭", ConditionTag::HeartFailure),
    ("心衰", ConditionTag::HeartFailure),
    ("心律失常", ConditionTag::Arrhythmia),
    ("脑卒中", ConditionTag::Stroke),
    ("中风", ConditionTag::Stroke),
    ("卒中", ConditionTag::Stroke),
    ("骨质疏松", ConditionTag::Osteoporosis),
    ("膝骨关节炎", ConditionTag::KneeOsteoarthritis),
    ("膝关节骨关节炎", ConditionTag::KneeOsteoarthritis),
    ("腰痛", ConditionTag::LowBackPain),
    ("下背痛", ConditionTag::LowBackPain),
    ("心绞痛", ConditionTag::Angina),
    ("high blood pressure", ConditionTag::Hypertension),
    ("type 2 diabetes", ConditionTag::Diabetes),
    ("heart disease", ConditionTag::HeartDisease),
    ("knee osteoarthritis", ConditionTag::KneeOsteoarthritis),
    ("low back pain", ConditionTag::LowBackPain),
];

/// Substring heuristics, checked in order; first match wins.
///
/// More specific entries come before the broader ones they contain
/// (knee osteoarthritis before arthritis, coronary before heart disease).
const KEYWORDS: &[(&[&str], ConditionTag)] = &[
    (&["高血压", "hypertension"], ConditionTag::Hypertension),
    (&["糖尿病", "diabetes", "diabetic"], ConditionTag::Diabetes),
    (
        &[
            "冠心病",
            "缺血性心脏病",
            "冠状动脉",
            "coronary",
            "ischemic heart disease",
            "ischaemic heart disease",
        ],
        ConditionTag::CoronaryHeartDisease,
    ),
    (&["心力衰竭", "心衰", "heart failure"], ConditionTag::HeartFailure),
    (&["心律失常", "arrhythmia", "atrial fibrillation"], ConditionTag::Arrhythmia),
    (&["心绞痛", "angina"], ConditionTag::Angina),
    (&["心脏病", "heart disease", "cardiac"], ConditionTag::HeartDisease),
    (&["膝骨关节炎", "膝关节", "knee osteoarthritis", "knee oa"], ConditionTag::KneeOsteoarthritis),
    (&["关节", "arthritis", "joint"], ConditionTag::Arthritis),
    (&["卒中", "中风", "stroke"], ConditionTag::Stroke),
    (&["骨质疏松", "osteoporosis"], ConditionTag::Osteoporosis),
    (&["腰痛", "下背痛", "back pain", "lumbago"], ConditionTag::LowBackPain),
    (&["肥胖", "obesity", "obese"], ConditionTag::Obesity),
    (&["脂肪肝", "fatty liver"], ConditionTag::FattyLiver),
    (&["高脂", "血脂异常", "dyslipidemia", "hyperlipidemia", "cholesterol"], ConditionTag::Hyperlipidemia),
];

/// Abbreviations matched as whole words only
const ABBREVIATIONS: &[(&str, ConditionTag)] = &[
    ("cad", ConditionTag::CoronaryHeartDisease),
    ("chd", ConditionTag::CoronaryHeartDisease),
    ("ihd", ConditionTag::CoronaryHeartDisease),
    ("chf", ConditionTag::HeartFailure),
    ("afib", ConditionTag::Arrhythmia),
    ("htn", ConditionTag::Hypertension),
    ("t2dm", ConditionTag::Diabetes),
];

/// Normalize raw condition entries to canonical tags.
///
/// Canonical codes pass through unchanged, so normalizing twice is a no-op.
#[must_use]
pub fn normalize<S: AsRef<str>>(raw_tags: &[S]) -> BTreeSet<ConditionTag> {
    raw_tags
        .iter()
        .filter_map(|raw| normalize_one(raw.as_ref()))
        .collect()
}

/// Normalize a single entry; `None` when nothing matches
#[must_use]
pub fn normalize_one(raw: &str) -> Option<ConditionTag> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();

    let tag = ConditionTag::from_code(&lower)
        .or_else(|| exact_match(&lower))
        .or_else(|| keyword_match(&lower))
        .or_else(|| abbreviation_match(&lower));
    if tag.is_none() {
        debug!(entry = trimmed, "Dropping unrecognized condition");
    }
    tag
}

/// Extract every tag mentioned in unstructured history text.
///
/// Unlike [`normalize_one`], all keyword groups are checked so a narrative
/// mentioning several conditions yields several tags.
#[must_use]
pub fn extract_from_text(history: &str) -> BTreeSet<ConditionTag> {
    let lower = history.to_lowercase();
    let mut found: BTreeSet<ConditionTag> = KEYWORDS
        .iter()
        .filter(|(needles, _)| needles.iter().any(|needle| lower.contains(needle)))
        .map(|(_, tag)| *tag)
        .collect();
    found.extend(
        words(&lower).filter_map(|word| {
            ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, tag)| *tag)
        }),
    );
    found
}

/// Build an engine profile from a draft, normalizing conditions once
#[must_use]
pub fn build_profile(draft: ProfileDraft) -> UserProfile {
    let mut conditions = normalize(&draft.conditions);
    if let Some(history) = draft.medical_history.as_deref() {
        conditions.extend(extract_from_text(history));
    }
    UserProfile {
        age: draft.age,
        sex: draft.sex,
        height_cm: draft.height_cm,
        weight_kg: draft.weight_kg,
        waist_cm: draft.waist_cm,
        conditions,
        medical_history: draft.medical_history,
    }
}

fn exact_match(lower: &str) -> Option<ConditionTag> {
    EXACT_NAMES
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, tag)| *tag)
}

fn keyword_match(lower: &str) -> Option<ConditionTag> {
    KEYWORDS
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| lower.contains(needle)))
        .map(|(_, tag)| *tag)
}

fn abbreviation_match(lower: &str) -> Option<ConditionTag> {
    words(lower).find_map(|word| {
        ABBREVIATIONS
            .iter()
            .find(|(abbr, _)| *abbr == word)
            .map(|(_, tag)| *tag)
    })
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}
