// ABOUTME: Static, ordered catalog of evidence-tagged exercise prescription rules
// ABOUTME: Evaluates triggers against a profile and vitals and pads the UI display rule set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Exercise Rx Contributors

//! Prescription rule catalog.
//!
//! Rules are data: a [`Predicate`] decides whether a rule triggers and a
//! [`RuleAction`] decides which FITT fields it proposes. Declaration order
//! breaks priority ties everywhere.

use chrono::{DateTime, Utc};
use rx_core::constants::{age, anthropometrics, blood_pressure, glucose, heart_rate};
use rx_core::errors::{EngineError, EngineResult};
use rx_core::models::{
    ConditionTag, Intensity, Measurement, PartialFit, RuleOutput, UserProfile,
};
use serde::Serialize;
use std::cmp::Reverse;
use tracing::debug;

use crate::confidence::measurement_confidence;
use crate::predicate::{Predicate, RuleContext};

/// Display set size used by the orchestrator
pub const DISPLAY_SET_SIZE: usize = 4;

/// Fully specified FITT proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FitTemplate {
    /// Sessions per week
    pub freq: u32,
    /// Intensity tier
    pub intensity: Intensity,
    /// Minutes per session
    pub time: u32,
    /// Exercise modality
    pub exercise_type: &'static str,
}

impl FitTemplate {
    const fn new(freq: u32, intensity: Intensity, time: u32, exercise_type: &'static str) -> Self {
        Self {
            freq,
            intensity,
            time,
            exercise_type,
        }
    }

    /// The template as a partial fit with every field set
    #[must_use]
    pub fn to_partial(&self) -> PartialFit {
        PartialFit {
            freq: Some(self.freq),
            intensity: Some(self.intensity),
            time: Some(self.time),
            exercise_type: Some(self.exercise_type.to_owned()),
        }
    }
}

/// What a triggered rule proposes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    /// Always the same template
    Fixed(FitTemplate),
    /// Template chosen by the latest blood pressure
    ByBloodPressure {
        /// Systolic threshold (mmHg)
        systolic: f64,
        /// Diastolic threshold (mmHg)
        diastolic: f64,
        /// Used when either threshold is reached
        at_or_above: FitTemplate,
        /// Used otherwise, including when no reading exists
        below: FitTemplate,
    },
    /// Template chosen by the latest glucose tier
    ByGlycemia {
        /// Fasting >= 7.0 or random >= 11.1 mmol/L
        high: FitTemplate,
        /// Fasting >= 6.1 or random >= 7.8 mmol/L
        medium: FitTemplate,
        /// Lower readings or no reading
        baseline: FitTemplate,
    },
}

impl RuleAction {
    /// Resolve the template for a context
    #[must_use]
    pub fn resolve(&self, ctx: &RuleContext<'_>) -> FitTemplate {
        match *self {
            Self::Fixed(template) => template,
            Self::ByBloodPressure {
                systolic,
                diastolic,
                at_or_above,
                below,
            } => {
                if ctx
                    .vitals
                    .blood_pressure()
                    .is_some_and(|bp| bp.reaches(systolic, diastolic))
                {
                    at_or_above
                } else {
                    below
                }
            }
            Self::ByGlycemia {
                high,
                medium,
                baseline,
            } => match ctx.vitals.glucose() {
                Some(bg) if bg.value >= glucose_tier(bg.is_fasting, true) => high,
                Some(bg) if bg.value >= glucose_tier(bg.is_fasting, false) => medium,
                _ => baseline,
            },
        }
    }
}

const fn glucose_tier(is_fasting: bool, high: bool) -> f64 {
    match (is_fasting, high) {
        (true, true) => glucose::FASTING_HIGH_TIER,
        (true, false) => glucose::FASTING_MEDIUM_TIER,
        (false, true) => glucose::RANDOM_HIGH_TIER,
        (false, false) => glucose::RANDOM_MEDIUM_TIER,
    }
}

/// An immutable prescription rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrescriptionRule {
    /// Stable rule id, e.g. `HTN-001`
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Guideline the rule is drawn from
    pub evidence_source: &'static str,
    /// Priority, 1-10, higher wins
    pub priority: u8,
    /// Evidence tags for audit export
    pub evidence_tags: &'static [&'static str],
    /// Trigger
    pub condition: Predicate,
    /// Proposal
    pub action: RuleAction,
    /// One of the age-band rules that always appear in the display set
    pub age_band: bool,
}

impl PrescriptionRule {
    /// Whether the rule triggers
    #[must_use]
    pub fn applies(&self, ctx: &RuleContext<'_>) -> bool {
        self.condition.evaluate(ctx)
    }

    /// The rule's proposal as a rule output with full confidence
    #[must_use]
    pub fn output(&self, ctx: &RuleContext<'_>) -> RuleOutput {
        RuleOutput {
            id: self.id.to_owned(),
            priority: self.priority,
            confidence: 1.0,
            fit: self.action.resolve(ctx).to_partial(),
        }
    }

    /// Lowest confidence among the well-formed measurements the trigger reads;
    /// 1.0 when it reads none
    #[must_use]
    pub fn input_confidence(&self, ctx: &RuleContext<'_>, now: DateTime<Utc>) -> f64 {
        self.condition
            .measurement_kinds()
            .into_iter()
            .filter_map(|kind| ctx.vitals.get(kind))
            .filter(|m| m.validate().is_ok())
            .map(|m| measurement_confidence(m, now))
            .fold(1.0, f64::min)
    }
}

const ELEVATED_BP: Predicate = Predicate::BloodPressureAtLeast {
    systolic: blood_pressure::ELEVATED_SYSTOLIC,
    diastolic: blood_pressure::ELEVATED_DIASTOLIC,
};

const OBESE: Predicate = Predicate::Any(&[
    Predicate::BmiAtLeast(anthropometrics::BMI_OBESE),
    Predicate::HasCondition(ConditionTag::Obesity),
]);

const HYPERTENSIVE: Predicate = Predicate::Any(&[
    Predicate::HasCondition(ConditionTag::Hypertension),
    ELEVATED_BP,
]);

const DIABETES_BASELINE: FitTemplate =
    FitTemplate::new(4, Intensity::Moderate, 35, "brisk walking + resistance training");

static RULES: [PrescriptionRule; 18] = [
    PrescriptionRule {
        id: "OB-HTN-001",
        name: "Obesity with hypertension",
        evidence_source: "Chinese Guidelines for Hypertension Management; Chinese Adult Obesity Guideline",
        priority: 10,
        evidence_tags: &["CHG-2018", "OBESITY-CN-2021"],
        condition: Predicate::All(&[OBESE, HYPERTENSIVE]),
        action: RuleAction::Fixed(FitTemplate::new(
            5,
            Intensity::Low,
            45,
            "brisk walking + aquatic exercise",
        )),
        age_band: false,
    },
    PrescriptionRule {
        id: "HTN-001",
        name: "Hypertension",
        evidence_source: "Chinese Guidelines for Hypertension Management",
        priority: 9,
        evidence_tags: &["CHG-2018", "ACSM-HTN"],
        condition: HYPERTENSIVE,
        action: RuleAction::ByBloodPressure {
            systolic: blood_pressure::CAUTION_SYSTOLIC,
            diastolic: blood_pressure::CAUTION_DIASTOLIC,
            at_or_above: FitTemplate::new(4, Intensity::Low, 40, "brisk walking + tai chi"),
            below: FitTemplate::new(4, Intensity::LowMid, 40, "brisk walking + tai chi"),
        },
        age_band: false,
    },
    PrescriptionRule {
        id: "OB-001",
        name: "Obesity",
        evidence_source: "Chinese Adult Obesity Guideline",
        priority: 8,
        evidence_tags: &["OBESITY-CN-2021"],
        condition: OBESE,
        action: RuleAction::Fixed(FitTemplate::new(
            5,
            Intensity::LowMid,
            50,
            "brisk walking + swimming",
        )),
        age_band: false,
    },
    PrescriptionRule {
        id: "DM-001",
        name: "Type 2 diabetes",
        evidence_source: "Chinese Type 2 Diabetes Prevention and Treatment Guideline",
        priority: 8,
        evidence_tags: &["CDS-2020", "ADA-EX"],
        condition: Predicate::Any(&[
            Predicate::HasCondition(ConditionTag::Diabetes),
            Predicate::GlucoseAtLeast {
                fasting: glucose::FASTING_MEDIUM_TIER,
                random: glucose::RANDOM_MEDIUM_TIER,
            },
        ]),
        action: RuleAction::ByGlycemia {
            high: FitTemplate::new(4, Intensity::Low, 30, DIABETES_BASELINE.exercise_type),
            medium: FitTemplate::new(4, Intensity::LowMid, 35, DIABETES_BASELINE.exercise_type),
            baseline: DIABETES_BASELINE,
        },
        age_band: false,
    },
    PrescriptionRule {
        id: "OW-001",
        name: "Overweight",
        evidence_source: "Chinese Adult Obesity Guideline",
        priority: 6,
        evidence_tags: &["OBESITY-CN-2021"],
        condition: Predicate::BmiBetween {
            min: anthropometrics::BMI_OVERWEIGHT,
            max: anthropometrics::BMI_OBESE,
        },
        action: RuleAction::Fixed(FitTemplate::new(
            4,
            Intensity::Moderate,
            40,
            "brisk walking + jogging",
        )),
        age_band: false,
    },
    PrescriptionRule {
        id: "AGE-001",
        name: "Older adult",
        evidence_source: "Physical Activity Guidelines for Chinese Older Adults",
        priority: 7,
        evidence_tags: &["PAG-CN-2021", "ACSM-OLDER"],
        condition: Predicate::AgeAtLeast(age::OLDER_ADULT),
        action: RuleAction::Fixed(FitTemplate::new(3, Intensity::Low, 30, "tai chi + walking")),
        age_band: true,
    },
    PrescriptionRule {
        id: "MID-001",
        name: "Middle-aged adult",
        evidence_source: "Physical Activity Guidelines for Chinese Adults",
        priority: 5,
        evidence_tags: &["PAG-CN-2021"],
        condition: Predicate::AgeBetween {
            min: age::MIDDLE_AGED,
            max: age::OLDER_ADULT,
        },
        action: RuleAction::Fixed(FitTemplate::new(
            4,
            Intensity::Moderate,
            35,
            "brisk walking + strength training",
        )),
        age_band: true,
    },
    PrescriptionRule {
        id: "YNG-001",
        name: "Younger adult",
        evidence_source: "Physical Activity Guidelines for Chinese Adults",
        priority: 4,
        evidence_tags: &["PAG-CN-2021"],
        condition: Predicate::AgeBelow(age::MIDDLE_AGED),
        action: RuleAction::Fixed(FitTemplate::new(
            4,
            Intensity::Moderate,
            40,
            "running + strength training",
        )),
        age_band: true,
    },
    PrescriptionRule {
        id: "HR-001",
        name: "Abnormal resting heart rate",
        evidence_source: "ACSM Guidelines for Exercise Testing and Prescription",
        priority: 8,
        evidence_tags: &["ACSM-GETP"],
        condition: Predicate::HeartRateOutside {
            min: heart_rate::RESTING_LOW,
            max: heart_rate::RESTING_HIGH,
        },
        action: RuleAction::Fixed(FitTemplate::new(
            3,
            Intensity::Low,
            25,
            "walking + breathing exercises",
        )),
        age_band: false,
    },
    PrescriptionRule {
        id: "JNT-001",
        name: "Arthritis",
        evidence_source: "Chinese Osteoarthritis Diagnosis and Treatment Guideline",
        priority: 7,
        evidence_tags: &["OA-CN-2021", "ACR-EX"],
        condition: Predicate::HasCondition(ConditionTag::Arthritis),
        action: RuleAction::Fixed(FitTemplate::new(
            3,
            Intensity::Low,
            30,
            "aquatic exercise + flexibility training",
        )),
        age_band: false,
    },
    PrescriptionRule {
        id: "CHD-001",
        name: "Coronary heart disease",
        evidence_source: "Chinese Expert Consensus on Cardiac Rehabilitation",
        priority: 9,
        evidence_tags: &["CR-CN-2018", "AHA-CR"],
        condition: Predicate::Any(&[
            Predicate::HasCondition(ConditionTag::CoronaryHeartDisease),
            Predicate::HasCondition(ConditionTag::Angina),
        ]),
        action: RuleAction::Fixed(FitTemplate::new(
            3,
            Intensity::Low,
            30,
            "supervised walking + cycle ergometer",
        )),
        age_band: false,
    },
    PrescriptionRule {
        id: "HF-001",
        name: "Heart failure",
        evidence_source: "Chinese Heart Failure Guideline",
        priority: 10,
        evidence_tags: &["HF-CN-2018", "ESC-HF"],
        condition: Predicate::HasCondition(ConditionTag::HeartFailure),
        action: RuleAction::Fixed(FitTemplate::new(
            3,
            Intensity::Low,
            20,
            "walking + breathing exercises",
        )),
        age_band: false,
    },
    PrescriptionRule {
        id: "ARR-001",
        name: "Arrhythmia",
        evidence_source: "Chinese Expert Consensus on Cardiac Rehabilitation",
        priority: 9,
        evidence_tags: &["CR-CN-2018"],
        condition: Predicate::HasCondition(ConditionTag::Arrhythmia),
        action: RuleAction::Fixed(FitTemplate::new(3, Intensity::Low, 25, "walking + tai chi")),
        age_band: false,
    },
    PrescriptionRule {
        id: "STK-001",
        name: "Stroke recovery",
        evidence_source: "Chinese Stroke Rehabilitation Guideline",
        priority: 8,
        evidence_tags: &["STROKE-REHAB-CN-2017"],
        condition: Predicate::HasCondition(ConditionTag::Stroke),
        action: RuleAction::Fixed(FitTemplate::new(
            3,
            Intensity::Low,
            30,
            "assisted walking + balance training",
        )),
        age_band: false,
    },
    PrescriptionRule {
        id: "KOA-001",
        name: "Knee osteoarthritis",
        evidence_source: "Chinese Osteoarthritis Diagnosis and Treatment Guideline",
        priority: 7,
        evidence_tags: &["OA-CN-2021", "OARSI"],
        condition: Predicate::HasCondition(ConditionTag::KneeOsteoarthritis),
        action: RuleAction::Fixed(FitTemplate::new(
            3,
            Intensity::Low,
            30,
            "stationary cycling + aquatic exercise",
        )),
        age_band: false,
    },
    PrescriptionRule {
        id: "LBP-001",
        name: "Low back pain",
        evidence_source: "Chinese Expert Consensus on Low Back Pain",
        priority: 6,
        evidence_tags: &["LBP-CN-2020"],
        condition: Predicate::HasCondition(ConditionTag::LowBackPain),
        action: RuleAction::Fixed(FitTemplate::new(
            4,
            Intensity::LowMid,
            30,
            "core stabilization + walking",
        )),
        age_band: false,
    },
    PrescriptionRule {
        id: "OST-001",
        name: "Osteoporosis",
        evidence_source: "Chinese Primary Osteoporosis Guideline",
        priority: 6,
        evidence_tags: &["OP-CN-2022"],
        condition: Predicate::HasCondition(ConditionTag::Osteoporosis),
        action: RuleAction::Fixed(FitTemplate::new(
            3,
            Intensity::LowMid,
            30,
            "weight-bearing walking + balance training",
        )),
        age_band: false,
    },
    PrescriptionRule {
        id: "WST-001",
        name: "Central obesity",
        evidence_source: "Chinese Adult Obesity Guideline",
        priority: 5,
        evidence_tags: &["OBESITY-CN-2021"],
        condition: Predicate::CentralObesity,
        action: RuleAction::Fixed(FitTemplate::new(
            5,
            Intensity::LowMid,
            40,
            "brisk walking + cycling",
        )),
        age_band: false,
    },
];

/// Read-only view over the rule table
#[derive(Debug, Clone, Copy)]
pub struct RuleCatalog {
    rules: &'static [PrescriptionRule],
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleCatalog {
    /// The built-in catalog
    #[must_use]
    pub fn new() -> Self {
        Self { rules: &RULES }
    }

    /// Rules in declaration order
    #[must_use]
    pub const fn rules(&self) -> &'static [PrescriptionRule] {
        self.rules
    }

    /// Number of rules
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the catalog has no rules
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up a rule by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&'static PrescriptionRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Look up a rule that must exist
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnknownRule` when no rule has this id
    pub fn require(&self, id: &str) -> EngineResult<&'static PrescriptionRule> {
        self.get(id)
            .ok_or_else(|| EngineError::UnknownRule(id.to_owned()))
    }

    /// Priority of a rule by id
    #[must_use]
    pub fn priority_of(&self, id: &str) -> Option<u8> {
        self.get(id).map(|rule| rule.priority)
    }

    /// Triggered rules, highest priority first, each with confidence 1
    #[must_use]
    pub fn evaluate(&self, profile: &UserProfile, measurements: &[Measurement]) -> Vec<RuleOutput> {
        let ctx = RuleContext::new(profile, measurements);
        self.triggered(&ctx)
            .into_iter()
            .map(|rule| rule.output(&ctx))
            .collect()
    }

    /// Triggered rules with confidence taken from the measurements each trigger reads
    #[must_use]
    pub fn evaluate_weighted(
        &self,
        profile: &UserProfile,
        measurements: &[Measurement],
        now: DateTime<Utc>,
    ) -> Vec<RuleOutput> {
        let ctx = RuleContext::new(profile, measurements);
        self.triggered(&ctx)
            .into_iter()
            .map(|rule| RuleOutput {
                confidence: rule.input_confidence(&ctx, now),
                ..rule.output(&ctx)
            })
            .collect()
    }

    /// Exactly `min(n, catalog size)` rule ids for display, highest priority first.
    ///
    /// Starts from the known, distinct triggered ids and always adds the
    /// profile's age-band rule, which is display-only when it did not
    /// trigger. Pads with other applicable rules, then with any rule.
    #[must_use]
    pub fn ensure_minimum_display_set<S: AsRef<str>>(
        &self,
        triggered_ids: &[S],
        profile: &UserProfile,
        measurements: &[Measurement],
        n: usize,
    ) -> Vec<String> {
        let ctx = RuleContext::new(profile, measurements);
        let mut selected: Vec<usize> = Vec::with_capacity(n.max(triggered_ids.len()));

        for id in triggered_ids {
            match self.index_of(id.as_ref()) {
                Some(index) => push_unique(&mut selected, index),
                None => debug!(rule_id = id.as_ref(), "Ignoring unknown rule id for display"),
            }
        }

        if let Some(index) = self
            .rules
            .iter()
            .position(|rule| rule.age_band && rule.applies(&ctx))
        {
            push_unique(&mut selected, index);
        }

        for index in self.by_priority() {
            if selected.len() >= n {
                break;
            }
            if self.rules[index].applies(&ctx) {
                push_unique(&mut selected, index);
            }
        }
        for index in self.by_priority() {
            if selected.len() >= n {
                break;
            }
            push_unique(&mut selected, index);
        }

        selected.sort_by_key(|&index| (Reverse(self.rules[index].priority), index));
        selected.truncate(n);
        selected
            .into_iter()
            .map(|index| self.rules[index].id.to_owned())
            .collect()
    }

    fn triggered(&self, ctx: &RuleContext<'_>) -> Vec<&'static PrescriptionRule> {
        let rules = self.rules;
        self.by_priority()
            .into_iter()
            .map(|index| &rules[index])
            .filter(|rule| rule.applies(ctx))
            .collect()
    }

    /// Rule indices sorted by descending priority, declaration order on ties
    fn by_priority(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.rules.len()).collect();
        order.sort_by_key(|&index| Reverse(self.rules[index].priority));
        order
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.rules.iter().position(|rule| rule.id == id)
    }
}

fn push_unique(selected: &mut Vec<usize>, index: usize) {
    if !selected.contains(&index) {
        selected.push(index);
    }
}
