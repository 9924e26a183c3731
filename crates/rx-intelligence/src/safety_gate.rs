// ABOUTME: Pre-exercise safety gate: PAR-Q screen, vital thresholds, then acute symptom scan
// ABOUTME: Short-circuits on red and never downgrades a status once it has been raised
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

//! Safety Gate
//!
//! Three stages run in order:
//!
//! 1. **PAR-Q**: age and condition scoring; any cardiac condition or a
//!    score of 5 or more stops immediately.
//! 2. **Vitals**: latest blood pressure, glucose and heart rate against stop,
//!    caution and normal-band thresholds. Every violated metric is reported
//!    before a red verdict returns.
//! 3. **Symptoms**: keywords in the medical history. Red-tier symptoms stop;
//!    amber-tier symptoms only turn a green verdict yellow.
//!
//! Malformed measurements never raise. They produce a red verdict with a
//! generic "measurement data invalid" reason.

use rx_core::constants::{age, blood_pressure, glucose, heart_rate};
use rx_core::models::{
    BloodPressure, ConditionTag, GateResult, GateStatus, Glucose, Measurement, UserProfile,
    VitalsSnapshot,
};
use tracing::{debug, warn};

use crate::conditions::extract_from_text;

/// PAR-Q score at which the screen fails
const PARQ_RISK_SCORE: u32 = 5;

const PARQ_REASON: &str = "PAR-Q indicates high risk";
const INVALID_MEASUREMENT_REASON: &str = "measurement data invalid";

const PARQ_ACTION: &str = "stop and consult a physician before resuming";
const STOP_ACTION: &str = "stop and consult a physician / re-measure";
const CAUTION_ACTION: &str =
    "switch to low-intensity walking/stretching 10-15 min and re-measure after exercise";
const SYMPTOM_CAUTION_ACTION: &str =
    "switch to low-intensity walking/stretching 10-15 min, watch symptoms and re-measure";

/// Conditions that raise the PAR-Q heart flag
const CARDIAC_CONDITIONS: [ConditionTag; 5] = [
    ConditionTag::HeartDisease,
    ConditionTag::CoronaryHeartDisease,
    ConditionTag::HeartFailure,
    ConditionTag::Arrhythmia,
    ConditionTag::Angina,
];

/// Symptom keyword groups with the reason reported when any keyword matches
const RED_SYMPTOMS: &[(&[&str], &str)] = &[
    (
        &["胸痛", "胸闷", "chest pain", "chest tightness"],
        "recent chest pain/tightness",
    ),
    (
        &["呼吸困难", "shortness of breath", "dyspnea", "dyspnoea"],
        "recent dyspnea",
    ),
    (&["晕厥", "syncope", "fainting", "fainted"], "recent syncope"),
];

const AMBER_SYMPTOMS: &[(&[&str], &str)] = &[
    (&["心悸", "palpitation"], "palpitations"),
    (&["疲劳", "fatigue"], "unusual fatigue"),
    (&["水肿", "edema", "oedema", "swelling"], "edema"),
];

/// PAR-Q screen outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParqScreen {
    /// Accumulated risk score
    pub score: u32,
    /// Heart flag present
    pub heart_flag: bool,
}

impl ParqScreen {
    /// Whether the screen stops exercise
    #[must_use]
    pub const fn is_high_risk(&self) -> bool {
        self.heart_flag || self.score >= PARQ_RISK_SCORE
    }
}

/// Severity accumulator that can only move up
#[derive(Debug, Default)]
struct Findings {
    status: Option<GateStatus>,
    reasons: Vec<String>,
}

impl Findings {
    fn raise(&mut self, status: GateStatus, reason: impl Into<String>) {
        self.status = self.status.max(Some(status));
        self.reasons.push(reason.into());
    }

    fn status(&self) -> GateStatus {
        self.status.unwrap_or(GateStatus::Green)
    }
}

/// Pre-exercise safety gate
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyGate;

impl SafetyGate {
    /// Run all three stages and return the verdict
    #[must_use]
    pub fn check(profile: &UserProfile, measurements: &[Measurement]) -> GateResult {
        let parq = Self::parq_screen(profile);
        debug!(
            score = parq.score,
            heart_flag = parq.heart_flag,
            "PAR-Q screen"
        );
        if parq.is_high_risk() {
            warn!(score = parq.score, "Safety gate stopped at PAR-Q screen");
            return GateResult {
                status: GateStatus::Red,
                reasons: vec![PARQ_REASON.to_owned()],
                suggested_action: Some(PARQ_ACTION.to_owned()),
            };
        }

        let vitals = Self::screen_vitals(&VitalsSnapshot::latest(measurements));
        let status = vitals.status();
        let mut reasons = vitals.reasons;
        if status == GateStatus::Red {
            warn!(violations = reasons.len(), "Safety gate stopped at vital screen");
            return Self::verdict(GateStatus::Red, reasons, STOP_ACTION);
        }

        let symptoms = Self::screen_symptoms(profile.history_text());
        let symptom_status = symptoms.status();
        if symptom_status == GateStatus::Red {
            warn!("Safety gate stopped at symptom screen");
            reasons.extend(symptoms.reasons);
            return Self::verdict(GateStatus::Red, reasons, STOP_ACTION);
        }
        if symptom_status == GateStatus::Yellow && status == GateStatus::Green {
            return Self::verdict(GateStatus::Yellow, symptoms.reasons, SYMPTOM_CAUTION_ACTION);
        }

        if status == GateStatus::Yellow {
            Self::verdict(status, reasons, CAUTION_ACTION)
        } else {
            GateResult::green()
        }
    }

    /// Score the PAR-Q approximation for a profile.
    ///
    /// Flags come from canonical tags, including those mentioned in the
    /// medical history, so the wording language never changes the score.
    #[must_use]
    pub fn parq_screen(profile: &UserProfile) -> ParqScreen {
        let history_tags = extract_from_text(profile.history_text());
        let has = |tag: ConditionTag| profile.has_condition(tag) || history_tags.contains(&tag);

        let mut score = 0;
        if profile.age >= age::PARQ_HIGH {
            score += 2;
        } else if profile.age >= age::OLDER_ADULT {
            score += 1;
        }

        let heart_flag = CARDIAC_CONDITIONS.into_iter().any(has);
        if heart_flag {
            score += 3;
        }
        if has(ConditionTag::Hypertension) {
            score += 2;
        }
        if has(ConditionTag::Diabetes) {
            score += 2;
        }

        ParqScreen { score, heart_flag }
    }

    fn screen_vitals(vitals: &VitalsSnapshot<'_>) -> Findings {
        let mut findings = Findings::default();
        if !vitals.invalid().is_empty() {
            findings.raise(GateStatus::Red, INVALID_MEASUREMENT_REASON);
        }
        if let Some(bp) = vitals.blood_pressure() {
            Self::check_blood_pressure(&bp, &mut findings);
        }
        if let Some(bg) = vitals.glucose() {
            Self::check_glucose(&bg, &mut findings);
        }
        if let Some(bpm) = vitals.heart_rate() {
            Self::check_heart_rate(bpm, &mut findings);
        }
        findings
    }

    fn check_blood_pressure(bp: &BloodPressure, findings: &mut Findings) {
        let BloodPressure {
            systolic,
            diastolic,
        } = *bp;
        if bp.reaches(blood_pressure::STOP_SYSTOLIC, blood_pressure::STOP_DIASTOLIC) {
            findings.raise(
                GateStatus::Red,
                format!("blood pressure at stop threshold: {systolic}/{diastolic} mmHg"),
            );
        } else if bp.reaches(
            blood_pressure::CAUTION_SYSTOLIC,
            blood_pressure::CAUTION_DIASTOLIC,
        ) {
            findings.raise(
                GateStatus::Yellow,
                format!("blood pressure at caution threshold: {systolic}/{diastolic} mmHg"),
            );
        }

        if !(blood_pressure::SYSTOLIC_MIN..=blood_pressure::SYSTOLIC_MAX).contains(&systolic) {
            let extreme = systolic > blood_pressure::SYSTOLIC_EXTREME_HIGH
                || systolic < blood_pressure::SYSTOLIC_EXTREME_LOW;
            findings.raise(
                severity(extreme),
                format!("systolic pressure out of range: {systolic} mmHg"),
            );
        }
        if !(blood_pressure::DIASTOLIC_MIN..=blood_pressure::DIASTOLIC_MAX).contains(&diastolic) {
            let extreme = diastolic > blood_pressure::DIASTOLIC_EXTREME_HIGH
                || diastolic < blood_pressure::DIASTOLIC_EXTREME_LOW;
            findings.raise(
                severity(extreme),
                format!("diastolic pressure out of range: {diastolic} mmHg"),
            );
        }
    }

    fn check_glucose(bg: &Glucose, findings: &mut Findings) {
        let max = if bg.is_fasting {
            glucose::FASTING_MAX
        } else {
            glucose::RANDOM_MAX
        };
        if !(glucose::BAND_MIN..=max).contains(&bg.value) {
            let extreme = bg.value > glucose::EXTREME_HIGH || bg.value < glucose::EXTREME_LOW;
            let sample = if bg.is_fasting { "fasting" } else { "random" };
            findings.raise(
                severity(extreme),
                format!("{sample} glucose out of range: {} mmol/L", bg.value),
            );
        }
    }

    fn check_heart_rate(bpm: f64, findings: &mut Findings) {
        if !(heart_rate::BAND_MIN..=heart_rate::BAND_MAX).contains(&bpm) {
            let extreme = bpm > heart_rate::EXTREME_HIGH || bpm < heart_rate::EXTREME_LOW;
            findings.raise(
                severity(extreme),
                format!("heart rate out of range: {bpm} bpm"),
            );
        }
    }

    fn screen_symptoms(history: &str) -> Findings {
        let text = history.to_lowercase();
        let mut findings = Findings::default();
        let matched = |groups: &'static [(&'static [&'static str], &'static str)]| {
            groups
                .iter()
                .filter(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
                .map(|(_, reason)| *reason)
                .collect::<Vec<_>>()
        };

        let red = matched(RED_SYMPTOMS);
        if red.is_empty() {
            for reason in matched(AMBER_SYMPTOMS) {
                findings.raise(GateStatus::Yellow, reason);
            }
        } else {
            for reason in red {
                findings.raise(GateStatus::Red, reason);
            }
        }
        findings
    }

    fn verdict(status: GateStatus, reasons: Vec<String>, action: &str) -> GateResult {
        GateResult {
            status,
            reasons,
            suggested_action: Some(action.to_owned()),
        }
    }
}

const fn severity(extreme: bool) -> GateStatus {
    if extreme {
        GateStatus::Red
    } else {
        GateStatus::Yellow
    }
}
