// ABOUTME: Criterion benchmarks for the prescription engines
// ABOUTME: Measures rule fusion across rule counts and full assessment of typical profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

//! Criterion benchmarks for the prescription engines.
//!
//! Fusion is quadratic in the number of triggered rules because of the
//! kernel; the catalog caps that at 18.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use exercise_rx::intelligence::conditions::build_profile;
use exercise_rx::intelligence::{
    AdjustmentEngine, FusionConfig, FusionEngine, PrescriptionEngine, SafetyGate,
};
use exercise_rx::models::{
    AdherenceLog, Intensity, Measurement, MeasurementSource, PartialFit, ProfileDraft, RuleOutput,
    Sex, UserProfile,
};
use std::sync::Arc;

const RULE_COUNTS: [u8; 4] = [1, 4, 8, 18];

fn rule_outputs(count: u8) -> Vec<RuleOutput> {
    let tiers = [Intensity::Low, Intensity::LowMid, Intensity::Moderate];
    (0..count)
        .zip(tiers.iter().cycle())
        .map(|(i, tier)| RuleOutput {
            id: format!("R-{i:03}"),
            priority: i % 10 + 1,
            confidence: 1.0,
            fit: PartialFit {
                freq: Some(3 + u32::from(i % 3)),
                intensity: Some(*tier),
                time: Some(30 + 5 * u32::from(i % 4)),
                exercise_type: Some("brisk walking".to_owned()),
            },
        })
        .collect()
}

fn complex_profile() -> UserProfile {
    build_profile(ProfileDraft {
        age: 67,
        sex: Sex::Male,
        height_cm: Some(172.0),
        weight_kg: Some(88.0),
        waist_cm: Some(98.0),
        conditions: vec![
            "高血压".into(),
            "type 2 diabetes".into(),
            "knee osteoarthritis".into(),
        ],
        medical_history: Some("occasional low back pain".into()),
    })
}

fn vitals() -> Vec<Measurement> {
    let now = Utc::now();
    vec![
        Measurement::blood_pressure(148.0, 92.0, now, MeasurementSource::Clinical),
        Measurement::glucose(7.2, true, now - Duration::hours(3), MeasurementSource::Manual),
        Measurement::heart_rate(76.0, now, MeasurementSource::Wearable),
    ]
}

fn adherence_history(days: i64) -> Vec<AdherenceLog> {
    let today = Utc::now().date_naive();
    (0..days)
        .map(|d| AdherenceLog {
            date: today - Duration::days(d),
            planned_minutes: 40,
            completed_minutes: 32,
            rpe: Some(6),
            symptoms: Vec::new(),
        })
        .collect()
}

fn bench_fusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("fusion");
    let Ok(engine) = FusionEngine::with_config(Arc::new(FusionConfig {
        kernel_init: 0.2,
        ..FusionConfig::default()
    })) else {
        return;
    };

    for count in RULE_COUNTS {
        let outputs = rule_outputs(count);
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::new("fuse", count), &outputs, |b, outputs| {
            b.iter(|| engine.fuse(black_box(outputs)));
        });
    }

    group.finish();
}

fn bench_assessment(c: &mut Criterion) {
    let mut group = c.benchmark_group("assessment");
    let profile = complex_profile();
    let measurements = vitals();

    group.bench_function("safety_gate", |b| {
        b.iter(|| SafetyGate::check(black_box(&profile), black_box(&measurements)));
    });

    let fused = PrescriptionEngine::with_config(FusionConfig::default());
    let legacy = PrescriptionEngine::with_config(FusionConfig {
        use_fusion: false,
        ..FusionConfig::default()
    });
    if let (Ok(fused), Ok(legacy)) = (fused, legacy) {
        group.bench_function("generate_fused", |b| {
            b.iter(|| fused.generate(black_box(&profile), black_box(&measurements)));
        });
        group.bench_function("generate_legacy", |b| {
            b.iter(|| legacy.generate(black_box(&profile), black_box(&measurements)));
        });
    }

    group.finish();
}

fn bench_adjustment(c: &mut Criterion) {
    let mut group = c.benchmark_group("adjustment");

    for days in [7, 90] {
        let history = adherence_history(days);
        group.bench_with_input(
            BenchmarkId::new("adjust_weekly", days),
            &history,
            |b, history| {
                b.iter(|| AdjustmentEngine::adjust_weekly(black_box(history)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_fusion, bench_assessment, bench_adjustment);
criterion_main!(benches);
