// ABOUTME: Integration tests for condition normalization and profile building
// ABOUTME: Covers localized names, keyword heuristics, abbreviations, and idempotence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use exercise_rx::intelligence::conditions::{
    build_profile, extract_from_text, normalize, normalize_one,
};
use exercise_rx::models::{ConditionTag, ProfileDraft, Sex};
use std::collections::BTreeSet;

#[test]
fn test_exact_chinese_names() {
    assert_eq!(normalize_one("高血压"), Some(ConditionTag::Hypertension));
    assert_eq!(normalize_one("糖尿病"), Some(ConditionTag::Diabetes));
    assert_eq!(
        normalize_one("冠心病"),
        Some(ConditionTag::CoronaryHeartDisease)
    );
    assert_eq!(normalize_one("心衰"), Some(ConditionTag::HeartFailure));
    assert_eq!(
        normalize_one("膝骨关节炎"),
        Some(ConditionTag::KneeOsteoarthritis)
    );
}

#[test]
fn test_english_names_are_case_insensitive() {
    assert_eq!(
        normalize_one("  High Blood Pressure "),
        Some(ConditionTag::Hypertension)
    );
    assert_eq!(normalize_one("Type 2 Diabetes"), Some(ConditionTag::Diabetes));
    assert_eq!(
        normalize_one("Knee Osteoarthritis"),
        Some(ConditionTag::KneeOsteoarthritis)
    );
}

#[test]
fn test_keyword_heuristics_prefer_specific_groups() {
    assert_eq!(
        normalize_one("coronary artery disease"),
        Some(ConditionTag::CoronaryHeartDisease)
    );
    assert_eq!(
        normalize_one("left knee osteoarthritis, mild"),
        Some(ConditionTag::KneeOsteoarthritis)
    );
    assert_eq!(
        normalize_one("rheumatoid arthritis"),
        Some(ConditionTag::Arthritis)
    );
    assert_eq!(
        normalize_one("diabetic since 2010"),
        Some(ConditionTag::Diabetes)
    );
}

#[test]
fn test_abbreviations_match_whole_words_only() {
    assert_eq!(normalize_one("CAD"), Some(ConditionTag::CoronaryHeartDisease));
    assert_eq!(
        normalize_one("history of chf"),
        Some(ConditionTag::HeartFailure)
    );
    // "cadence" contains "cad" but is not the abbreviation
    assert_eq!(normalize_one("cadence"), None);
}

#[test]
fn test_unmatched_entries_are_dropped() {
    let tags = normalize(&["", "   ", "headache", "高血压"]);
    assert_eq!(tags, BTreeSet::from([ConditionTag::Hypertension]));
    assert!(normalize::<&str>(&[]).is_empty());
}

#[test]
fn test_normalize_is_idempotent() {
    let once = normalize(&["高血压", "type 2 diabetes", "CAD", "腰痛"]);
    let codes: Vec<&str> = once.iter().map(|tag| tag.as_str()).collect();
    let twice = normalize(&codes);
    assert_eq!(once, twice);
}

#[test]
fn test_every_canonical_code_round_trips() {
    for tag in ConditionTag::ALL {
        assert_eq!(normalize_one(tag.as_str()), Some(tag));
        assert!(!tag.display_label_zh().is_empty());
    }
}

#[test]
fn test_chinese_labels_normalize_back_to_their_tag() {
    for tag in ConditionTag::ALL {
        assert_eq!(
            normalize_one(tag.display_label_zh()),
            Some(tag),
            "label for {tag}"
        );
    }
}

#[test]
fn test_extract_from_text_finds_every_mention() {
    let tags = extract_from_text("Hypertension for 10 years, T2DM, occasional low back pain");
    assert!(tags.contains(&ConditionTag::Hypertension));
    assert!(tags.contains(&ConditionTag::Diabetes));
    assert!(tags.contains(&ConditionTag::LowBackPain));
    assert!(!tags.contains(&ConditionTag::Stroke));
}

#[test]
fn test_build_profile_merges_conditions_and_history() {
    let profile = build_profile(ProfileDraft {
        age: 58,
        sex: Sex::Female,
        height_cm: Some(160.0),
        weight_kg: Some(70.0),
        waist_cm: Some(88.0),
        conditions: vec!["高血压".into(), "unknown thing".into()],
        medical_history: Some("骨质疏松".into()),
    });

    assert_eq!(
        profile.conditions,
        BTreeSet::from([ConditionTag::Hypertension, ConditionTag::Osteoporosis])
    );
    assert_eq!(profile.age, 58);
    assert!(profile.has_central_obesity());
    let bmi = profile.bmi().unwrap();
    assert!((bmi - 27.34).abs() < 0.01);
}

#[test]
fn test_bmi_absent_without_height_or_weight() {
    let profile = common::profile(40, &[]);
    assert!(profile.bmi().is_none());
    assert!(profile.bmi_category().is_none());
    assert!(!profile.has_central_obesity());
}
