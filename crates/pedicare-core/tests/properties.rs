//! Property tests for the triage and growth rules.
//!
//! Uses proptest to check the rules over every combination of answers
//! instead of hand-picked cases.

// Allow unwrap and float arithmetic in tests
#![allow(clippy::unwrap_used, clippy::float_arithmetic)]

use pedicare_core::growth::{body_mass_index, OBESITY_FROM, OVERWEIGHT_FROM, UNDERWEIGHT_BELOW};
use pedicare_core::triage::{DIFFICULTY_BREATHING, SYMPTOM_OPTIONS};
use pedicare_core::{
    Behavior, BmiCategory, FeverLevel, GrowthClassifier, GrowthInput, Severity, Sex,
    SymptomDuration, SymptomResponse, TriageEngine, TriageLevel,
};
use proptest::prelude::*;
use proptest::sample::{select, subsequence};

// =============================================================================
// STRATEGIES
// =============================================================================

fn fever() -> impl Strategy<Value = FeverLevel> {
    select(FeverLevel::ALL.to_vec())
}

fn behavior() -> impl Strategy<Value = Behavior> {
    select(Behavior::ALL.to_vec())
}

fn duration() -> impl Strategy<Value = Option<SymptomDuration>> {
    proptest::option::of(select(SymptomDuration::ALL.to_vec()))
}

fn severity() -> impl Strategy<Value = Severity> {
    (Severity::MIN..=Severity::MAX).prop_map(|v| Severity::new(v).unwrap())
}

fn response() -> impl Strategy<Value = SymptomResponse> {
    (
        fever(),
        subsequence(SYMPTOM_OPTIONS.to_vec(), 0..=SYMPTOM_OPTIONS.len()),
        duration(),
        severity(),
        behavior(),
    )
        .prop_map(|(fever, symptoms, duration, severity, behavior)| SymptomResponse {
            fever,
            symptoms: symptoms.into_iter().map(str::to_string).collect(),
            duration,
            severity,
            behavior,
        })
}

fn sex() -> impl Strategy<Value = Sex> {
    prop_oneof![Just(Sex::Male), Just(Sex::Female)]
}

// =============================================================================
// TRIAGE PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn very_high_fever_is_always_urgent(response in response()) {
        let response = response.with_fever(FeverLevel::VeryHigh);
        prop_assert_eq!(TriageEngine::level(&response), TriageLevel::Urgent);
    }

    #[test]
    fn extreme_lethargy_is_always_urgent(response in response()) {
        let response = response.with_behavior(Behavior::ExtremelyLethargic);
        prop_assert_eq!(TriageEngine::level(&response), TriageLevel::Urgent);
    }

    #[test]
    fn severity_four_or_more_is_always_urgent(response in response(), value in 4u8..=5) {
        let response = response.with_severity(Severity::new(value).unwrap());
        prop_assert_eq!(TriageEngine::level(&response), TriageLevel::Urgent);
    }

    #[test]
    fn severity_three_without_urgent_flags_is_moderate(
        response in response(),
        fever in prop_oneof![Just(FeverLevel::None), Just(FeverLevel::Mild), Just(FeverLevel::High)],
        behavior in prop_oneof![
            Just(Behavior::Normal),
            Just(Behavior::SlightlyLessActive),
            Just(Behavior::VeryTired),
        ],
    ) {
        let response = response
            .with_fever(fever)
            .with_behavior(behavior)
            .with_severity(Severity::new(3).unwrap());
        prop_assert_eq!(TriageEngine::level(&response), TriageLevel::Moderate);
    }

    #[test]
    fn low_severity_without_flags_is_mild(
        symptoms in subsequence(SYMPTOM_OPTIONS.to_vec(), 0..=SYMPTOM_OPTIONS.len()),
        value in 1u8..=2,
        fever in prop_oneof![Just(FeverLevel::None), Just(FeverLevel::Mild)],
        behavior in prop_oneof![
            Just(Behavior::Normal),
            Just(Behavior::SlightlyLessActive),
            Just(Behavior::VeryTired),
        ],
        duration in duration(),
    ) {
        let response = SymptomResponse {
            fever,
            symptoms: symptoms
                .into_iter()
                .filter(|s| *s != DIFFICULTY_BREATHING)
                .map(str::to_string)
                .collect(),
            duration,
            severity: Severity::new(value).unwrap(),
            behavior,
        };
        prop_assert_eq!(TriageEngine::level(&response), TriageLevel::Mild);
    }

    #[test]
    fn duration_never_changes_the_result(response in response(), other in duration()) {
        let mut changed = response.clone();
        changed.duration = other;
        prop_assert_eq!(TriageEngine::classify(&response), TriageEngine::classify(&changed));
    }

    #[test]
    fn triage_is_idempotent(response in response()) {
        prop_assert_eq!(TriageEngine::classify(&response), TriageEngine::classify(&response));
    }

    #[test]
    fn action_always_matches_level(response in response()) {
        let result = TriageEngine::classify(&response);
        prop_assert_eq!(result.recommended_action.as_str(), result.level.recommended_action());
        prop_assert_eq!(result.care_flow, result.level.care_flow());
    }
}

// =============================================================================
// GROWTH PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn bmi_is_rounded_to_two_decimals(
        weight in 5.0f64..120.0,
        height in 60.0f64..200.0,
        age in 2.0f64..20.0,
        sex in sex(),
    ) {
        let result = GrowthClassifier::classify(&GrowthInput::new(weight, height, age, sex).unwrap());
        let exact = body_mass_index(weight, height);
        prop_assert!((result.bmi - exact).abs() <= 0.005 + 1e-9);
        prop_assert!((result.bmi * 100.0 - (result.bmi * 100.0).round()).abs() < 1e-6);
    }

    #[test]
    fn category_follows_thresholds(
        weight in 5.0f64..120.0,
        height in 60.0f64..200.0,
        sex in sex(),
    ) {
        let result = GrowthClassifier::classify(&GrowthInput::new(weight, height, 8.0, sex).unwrap());
        let bmi = body_mass_index(weight, height);
        let expected = if bmi < UNDERWEIGHT_BELOW {
            BmiCategory::Underweight
        } else if bmi < OVERWEIGHT_FROM {
            BmiCategory::Healthy
        } else if bmi < OBESITY_FROM {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obesity
        };
        prop_assert_eq!(result.category, expected);
        prop_assert_eq!(result.percentile_hint.as_str(), expected.percentile_hint());
    }

    #[test]
    fn age_and_sex_do_not_move_the_category(
        weight in 5.0f64..120.0,
        height in 60.0f64..200.0,
        age_a in 2.0f64..20.0,
        age_b in 2.0f64..20.0,
    ) {
        let a = GrowthClassifier::classify(&GrowthInput::new(weight, height, age_a, Sex::Male).unwrap());
        let b = GrowthClassifier::classify(&GrowthInput::new(weight, height, age_b, Sex::Female).unwrap());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn non_positive_measures_are_rejected(weight in -50.0f64..=0.0, height in 60.0f64..200.0) {
        prop_assert!(GrowthInput::new(weight, height, 5.0, Sex::Male).is_err());
    }
}
