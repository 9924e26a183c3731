// ABOUTME: Integration tests for the prescription rule catalog
// ABOUTME: Covers triggers, action tiers, confidence weighting, lookups, and the display set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{bp, fasting_glucose, heart_rate, hours_ago, malformed, now, profile};
use exercise_rx::errors::EngineError;
use exercise_rx::intelligence::rule_catalog::DISPLAY_SET_SIZE;
use exercise_rx::intelligence::RuleCatalog;
use exercise_rx::models::{
    Intensity, Measurement, MeasurementKind, MeasurementSource, RuleOutput, Sex,
};
use proptest::collection;
use proptest::prelude::*;
use std::collections::HashSet;

fn triggered_ids(outputs: &[RuleOutput]) -> Vec<&str> {
    outputs.iter().map(|o| o.id.as_str()).collect()
}

#[test]
fn test_catalog_has_unique_ids_and_valid_priorities() {
    let catalog = RuleCatalog::new();
    assert_eq!(catalog.len(), 18);
    assert!(!catalog.is_empty());

    let ids: HashSet<&str> = catalog.rules().iter().map(|rule| rule.id).collect();
    assert_eq!(ids.len(), catalog.len());
    for rule in catalog.rules() {
        assert!((1..=10).contains(&rule.priority), "{}", rule.id);
        assert!(!rule.evidence_tags.is_empty(), "{}", rule.id);
    }

    let age_bands = catalog.rules().iter().filter(|rule| rule.age_band).count();
    assert_eq!(age_bands, 3);
}

#[test]
fn test_lookup_by_id() {
    let catalog = RuleCatalog::new();
    assert_eq!(catalog.priority_of("HTN-001"), Some(9));
    assert_eq!(catalog.get("HF-001").map(|rule| rule.name), Some("Heart failure"));
    assert!(catalog.get("NOPE-001").is_none());

    assert_eq!(catalog.require("DM-001").unwrap().priority, 8);
    match catalog.require("NOPE-001") {
        Err(EngineError::UnknownRule(id)) => assert_eq!(id, "NOPE-001"),
        other => panic!("expected UnknownRule, got {other:?}"),
    }
}

#[test]
fn test_rules_serialize_for_audit() {
    let catalog = RuleCatalog::new();
    let json = serde_json::to_value(catalog.require("HTN-001").unwrap()).unwrap();
    assert_eq!(json["id"], "HTN-001");
    assert_eq!(json["priority"], 9);
    assert!(json["evidence_tags"].as_array().is_some_and(|tags| !tags.is_empty()));
    assert!(json["condition"].is_object());
    assert!(json["action"]["by_blood_pressure"].is_object());
}

#[test]
fn test_outputs_are_ordered_by_priority() {
    let catalog = RuleCatalog::new();
    let outputs = catalog.evaluate(&profile(70, &["糖尿病", "心力衰竭"]), &[]);
    assert_eq!(triggered_ids(&outputs), vec!["HF-001", "DM-001", "AGE-001"]);
    assert!(outputs.iter().all(|o| common::approx_eq(o.confidence, 1.0)));
}

#[test]
fn test_priority_ties_keep_declaration_order() {
    let catalog = RuleCatalog::new();
    // OB-001 and DM-001 are both priority 8; OB-001 is declared first
    let obese_diabetic = common::profile_with_body(45, Sex::Male, 170.0, 90.0, None, &["糖尿病"]);
    let outputs = catalog.evaluate(&obese_diabetic, &[]);
    assert_eq!(triggered_ids(&outputs), vec!["OB-001", "DM-001", "MID-001"]);
}

#[test]
fn test_hypertension_tiers_by_blood_pressure() {
    let catalog = RuleCatalog::new();
    let patient = profile(55, &["高血压"]);

    let severe = catalog.evaluate(&patient, &[bp(165.0, 95.0)]);
    let htn = severe.iter().find(|o| o.id == "HTN-001").unwrap();
    assert_eq!(htn.fit.intensity, Some(Intensity::Low));
    assert_eq!(htn.fit.time, Some(40));

    let controlled = catalog.evaluate(&patient, &[bp(132.0, 84.0)]);
    let htn = controlled.iter().find(|o| o.id == "HTN-001").unwrap();
    assert_eq!(htn.fit.intensity, Some(Intensity::LowMid));
}

#[test]
fn test_elevated_reading_triggers_hypertension_without_tag() {
    let catalog = RuleCatalog::new();
    let outputs = catalog.evaluate(&profile(30, &[]), &[bp(145.0, 85.0)]);
    assert!(triggered_ids(&outputs).contains(&"HTN-001"));
}

#[test]
fn test_diabetes_tiers_by_glycemia() {
    let catalog = RuleCatalog::new();
    let patient = profile(45, &["糖尿病"]);
    let tier = |measurements: &[Measurement]| {
        catalog
            .evaluate(&patient, measurements)
            .into_iter()
            .find(|o| o.id == "DM-001")
            .map(|o| (o.fit.intensity, o.fit.time))
            .unwrap()
    };

    assert_eq!(tier(&[fasting_glucose(7.5)]), (Some(Intensity::Low), Some(30)));
    assert_eq!(tier(&[fasting_glucose(6.5)]), (Some(Intensity::LowMid), Some(35)));
    assert_eq!(tier(&[fasting_glucose(5.2)]), (Some(Intensity::Moderate), Some(35)));
    assert_eq!(tier(&[]), (Some(Intensity::Moderate), Some(35)));
}

#[test]
fn test_high_glucose_triggers_diabetes_without_tag() {
    let catalog = RuleCatalog::new();
    let outputs = catalog.evaluate(&profile(30, &[]), &[common::random_glucose(8.4)]);
    assert!(triggered_ids(&outputs).contains(&"DM-001"));
}

#[test]
fn test_malformed_measurement_does_not_trigger() {
    let catalog = RuleCatalog::new();
    let outputs = catalog.evaluate(&profile(30, &[]), &[malformed(MeasurementKind::Hr)]);
    assert_eq!(triggered_ids(&outputs), vec!["YNG-001"]);
}

#[test]
fn test_resting_heart_rate_rule() {
    let catalog = RuleCatalog::new();
    assert!(triggered_ids(&catalog.evaluate(&profile(30, &[]), &[heart_rate(104.0)]))
        .contains(&"HR-001"));
    assert!(!triggered_ids(&catalog.evaluate(&profile(30, &[]), &[heart_rate(72.0)]))
        .contains(&"HR-001"));
}

#[test]
fn test_weighted_evaluation_scores_measurement_rules_only() {
    let catalog = RuleCatalog::new();
    let stale = Measurement::glucose(7.4, true, hours_ago(24 * 10), MeasurementSource::Manual);
    let outputs = catalog.evaluate_weighted(&profile(70, &["糖尿病"]), &[stale], now());

    let dm = outputs.iter().find(|o| o.id == "DM-001").unwrap();
    // manual 0.6 x recency floor 0.2
    assert!(common::approx_eq(dm.confidence, 0.12));

    let age = outputs.iter().find(|o| o.id == "AGE-001").unwrap();
    assert!(common::approx_eq(age.confidence, 1.0));
}

#[test]
fn test_display_set_always_has_four_ids() {
    let catalog = RuleCatalog::new();
    let patient = profile(68, &["糖尿病"]);
    let display = catalog.ensure_minimum_display_set(
        &["DM-001", "AGE-001"],
        &patient,
        &[],
        DISPLAY_SET_SIZE,
    );
    assert_eq!(display.len(), DISPLAY_SET_SIZE);
    assert!(display.contains(&"DM-001".to_owned()));
    assert!(display.contains(&"AGE-001".to_owned()));
}

#[test]
fn test_display_set_adds_age_band_rule() {
    let catalog = RuleCatalog::new();
    let display =
        catalog.ensure_minimum_display_set::<&str>(&[], &profile(28, &[]), &[], DISPLAY_SET_SIZE);
    assert!(display.contains(&"YNG-001".to_owned()));
}

#[test]
fn test_display_set_drops_unknown_and_duplicate_ids() {
    let catalog = RuleCatalog::new();
    let display = catalog.ensure_minimum_display_set(
        &["HTN-001", "BOGUS", "HTN-001"],
        &profile(50, &["高血压"]),
        &[],
        DISPLAY_SET_SIZE,
    );
    assert!(!display.contains(&"BOGUS".to_owned()));
    let unique: HashSet<&String> = display.iter().collect();
    assert_eq!(unique.len(), display.len());
}

#[test]
fn test_display_set_truncates_to_highest_priority() {
    let catalog = RuleCatalog::new();
    let all: Vec<&str> = catalog.rules().iter().map(|rule| rule.id).collect();
    let display = catalog.ensure_minimum_display_set(&all, &profile(50, &[]), &[], 4);
    assert_eq!(display, vec!["OB-HTN-001", "HF-001", "HTN-001", "CHD-001"]);
}

proptest! {
    #[test]
    fn prop_display_set_size_order_and_uniqueness(
        picks in collection::vec(0usize..20, 0..10),
        age in 18u32..95,
        n in 1usize..8,
    ) {
        let catalog = RuleCatalog::new();
        let ids: Vec<String> = picks
            .iter()
            .map(|&i| catalog.rules().get(i).map_or_else(|| format!("X-{i}"), |r| r.id.to_owned()))
            .collect();
        let display = catalog.ensure_minimum_display_set(&ids, &profile(age, &[]), &[], n);

        prop_assert_eq!(display.len(), n.min(catalog.len()));
        let unique: HashSet<&String> = display.iter().collect();
        prop_assert_eq!(unique.len(), display.len());

        let priorities: Vec<u8> = display
            .iter()
            .map(|id| catalog.priority_of(id).unwrap())
            .collect();
        prop_assert!(priorities.windows(2).all(|pair| pair[0] >= pair[1]));
    }
}
