// ABOUTME: Integration tests for the prescription orchestrator
// ABOUTME: Covers baseline seeding, fusion and legacy modes, gate overrides, and display sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Utc;
use common::{bp, fasting_glucose, hours_ago, malformed, now, profile, profile_with_body};
use exercise_rx::intelligence::fusion_engine::DEFAULT_EXERCISE_TYPE;
use exercise_rx::intelligence::predicate::RuleContext;
use exercise_rx::intelligence::rule_catalog::DISPLAY_SET_SIZE;
use exercise_rx::intelligence::{FusionConfig, PrescriptionEngine};
use exercise_rx::models::{
    Fit, GateStatus, Intensity, Measurement, MeasurementKind, MeasurementSource, Sex, UserProfile,
};

fn engine() -> PrescriptionEngine {
    PrescriptionEngine::with_config(FusionConfig::default()).unwrap()
}

#[test]
fn test_older_diabetic_gets_a_gentle_prescription() {
    common::init_test_logging();
    let assessment = engine().assess_at(&profile(68, &["糖尿病"]), &[fasting_glucose(7.5)], now());
    let fit = &assessment.prescription.fit;

    assert_eq!(assessment.gate.status, GateStatus::Green);
    assert!(matches!(
        fit.intensity,
        Intensity::Low | Intensity::LowMid | Intensity::Moderate
    ));
    assert!(fit.time <= 45);
    assert_eq!(
        *fit,
        Fit {
            freq: 4,
            intensity: Intensity::Low,
            time: 30,
            exercise_type: "brisk walking + resistance training".to_owned(),
        }
    );
    assert_eq!(assessment.prescription.rule_ids, vec!["DM-001", "AGE-001"]);
}

#[test]
fn test_stop_blood_pressure_overrides_fused_prescription() {
    let assessment = engine().assess_at(&profile(50, &["高血压"]), &[bp(180.0, 110.0)], now());
    let prescription = &assessment.prescription;

    assert!(assessment.gate.is_red());
    assert_eq!(prescription.fit.intensity, Intensity::VeryLow);
    // fused 4 sessions x 38 min, lowered by one session and ten minutes
    assert_eq!(prescription.fit.freq, 3);
    assert_eq!(prescription.fit.time, 28);

    let explain = prescription.explain.as_ref().unwrap();
    assert!(explain.top.iter().any(|c| c.id == "HTN-001"));
}

#[test]
fn test_legacy_mode_lets_the_last_rule_win() {
    let engine = PrescriptionEngine::with_config(FusionConfig {
        use_fusion: false,
        ..FusionConfig::default()
    })
    .unwrap();
    let prescription = engine.assess_at(&profile(50, &["高血压"]), &[], now()).prescription;

    assert_eq!(prescription.rule_ids, vec!["HTN-001", "MID-001"]);
    assert_eq!(
        prescription.fit,
        Fit {
            freq: 4,
            intensity: Intensity::Moderate,
            time: 35,
            exercise_type: "brisk walking + strength training".to_owned(),
        }
    );
    assert!(prescription.explain.is_none());
}

#[test]
fn test_zero_alpha_keeps_the_baseline() {
    let engine = PrescriptionEngine::with_config(FusionConfig {
        alpha: 0.0,
        ..FusionConfig::default()
    })
    .unwrap();
    let prescription = engine.assess_at(&profile(50, &["高血压"]), &[], now()).prescription;

    assert_eq!(
        prescription.fit,
        Fit {
            freq: 3,
            intensity: Intensity::Low,
            time: 30,
            exercise_type: DEFAULT_EXERCISE_TYPE.to_owned(),
        }
    );
    assert!(prescription.explain.is_none());
    assert!(!prescription.rule_ids.is_empty());
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = PrescriptionEngine::with_config(FusionConfig {
        alpha: -1.0,
        ..FusionConfig::default()
    });
    assert!(result.is_err());
}

#[test]
fn test_baseline_intensity_by_risk() {
    let baseline = |profile: &UserProfile, measurements: &[Measurement]| {
        PrescriptionEngine::baseline_fit(&RuleContext::new(profile, measurements)).intensity
    };

    assert_eq!(baseline(&profile(30, &[]), &[]), Intensity::Moderate);
    assert_eq!(baseline(&profile(55, &[]), &[]), Intensity::LowMid);
    assert_eq!(baseline(&profile(70, &[]), &[]), Intensity::Low);
    assert_eq!(baseline(&profile(30, &["冠心病"]), &[]), Intensity::Low);
    assert_eq!(baseline(&profile(30, &[]), &[bp(145.0, 92.0)]), Intensity::Low);

    let heavy = profile_with_body(30, Sex::Male, 170.0, 90.0, None, &[]);
    assert_eq!(baseline(&heavy, &[]), Intensity::Low);
    let overweight = profile_with_body(30, Sex::Female, 160.0, 66.0, None, &[]);
    assert_eq!(baseline(&overweight, &[]), Intensity::LowMid);
}

#[test]
fn test_red_override_floors() {
    let fit = Fit {
        freq: 1,
        intensity: Intensity::Moderate,
        time: 25,
        exercise_type: "cycling".to_owned(),
    };
    let lowered = PrescriptionEngine::red_override(fit);
    assert_eq!(lowered.freq, 1);
    assert_eq!(lowered.time, 20);
    assert_eq!(lowered.intensity, Intensity::VeryLow);
    assert_eq!(lowered.exercise_type, "cycling");
}

#[test]
fn test_malformed_measurement_yields_conservative_prescription() {
    let assessment = engine().assess_at(&profile(30, &[]), &[malformed(MeasurementKind::Bp)], now());
    assert!(assessment.gate.is_red());
    assert_eq!(assessment.prescription.rule_ids, vec!["YNG-001"]);
    assert_eq!(assessment.prescription.fit.intensity, Intensity::VeryLow);
}

#[test]
fn test_confidence_weighting_demotes_stale_readings() {
    let patient = profile(70, &["糖尿病"]);
    let stale = [Measurement::glucose(
        7.4,
        true,
        hours_ago(24 * 10),
        MeasurementSource::Manual,
    )];

    let plain = engine().assess_at(&patient, &stale, now()).prescription;
    let weighted = PrescriptionEngine::with_config(FusionConfig {
        confidence_weighting: true,
        ..FusionConfig::default()
    })
    .unwrap()
    .assess_at(&patient, &stale, now())
    .prescription;

    assert_eq!(plain.explain.unwrap().top[0].id, "DM-001");
    assert_eq!(weighted.explain.unwrap().top[0].id, "AGE-001");
}

#[test]
fn test_prescription_record_fields() {
    let prescription = engine().assess_at(&profile(68, &["糖尿病"]), &[], now()).prescription;

    assert!(prescription.id.starts_with("rx_"));
    assert_eq!(prescription.created_at, now());
    assert_eq!(prescription.rule_ids_for_display.len(), DISPLAY_SET_SIZE);
    for id in &prescription.rule_ids {
        assert!(prescription.rule_ids_for_display.contains(id));
    }

    let other = engine().assess_at(&profile(68, &["糖尿病"]), &[], now()).prescription;
    assert_ne!(prescription.id, other.id);
}

#[test]
fn test_assessment_serializes_for_export() {
    let assessment = engine().assess_at(&profile(50, &["高血压"]), &[bp(180.0, 110.0)], now());
    let json = serde_json::to_value(&assessment).unwrap();

    assert_eq!(json["gate"]["status"], "red");
    assert_eq!(json["prescription"]["fit"]["intensity"], "very_low");
    assert_eq!(
        json["prescription"]["rule_ids_for_display"]
            .as_array()
            .map(Vec::len),
        Some(DISPLAY_SET_SIZE)
    );
}

#[test]
fn test_generate_uses_current_clock() {
    let before = Utc::now();
    let prescription = engine().generate(&profile(40, &[]), &[]);
    assert!(prescription.created_at >= before);
    assert_eq!(prescription.rule_ids, vec!["MID-001"]);
}
