use super::common::*;
use serde_json::json;

use crate::underwriting::domain::{ApplicantProfile, EmploymentType, UtilityPaymentHistory};
use crate::underwriting::scoring::{
    classify, component_scores, resolve_config, score, ComponentWeights, Decision,
    DecisionThresholds, ScoringConfig, MEETS_CRITERIA, WEAK_EMPLOYMENT, WEAK_FINANCIAL,
    WEAK_HOUSING, WEAK_OTHER,
};

fn zero_weights() -> ScoringConfig {
    ScoringConfig {
        weights: ComponentWeights {
            personal: 0.0,
            employment: 0.0,
            financial: 0.0,
            housing: 0.0,
            other: 0.0,
        },
        ..ScoringConfig::default()
    }
}

fn sample_profiles() -> Vec<ApplicantProfile> {
    vec![
        ApplicantProfile::default(),
        strong_profile(),
        unemployed_profile(),
        fragile_profile(),
        ApplicantProfile {
            age: Some(70),
            employment_type: Some(EmploymentType::Retired),
            monthly_net_salary: Some(1200.0),
            rent_amount: Some(700.0),
            ..ApplicantProfile::default()
        },
    ]
}

#[test]
fn strong_applicant_is_accepted_with_full_marks() {
    let result = score(&strong_profile(), &ScoringConfig::default());

    assert_eq!(result.components.personal, 10.0);
    assert_eq!(result.components.employment, 25.0);
    assert_eq!(result.components.financial, 20.0);
    assert_eq!(result.components.housing, 25.0);
    assert_eq!(result.components.other, 20.0);
    assert_eq!(result.safety_score, 100.0);
    assert_eq!(result.pd_12m, 0.0);
    assert_eq!(result.decision, Decision::Accept);
    assert_eq!(result.explanations, vec![MEETS_CRITERIA]);
}

#[test]
fn applicant_without_income_or_savings_is_flagged() {
    let result = score(&unemployed_profile(), &ScoringConfig::default());

    // neutral affordability 5 + tenure 5
    assert_eq!(result.components.employment, 10.0);
    assert_eq!(result.components.financial, 0.0);
    assert_eq!(result.safety_score, 65.0);
    assert_eq!(result.pd_12m, 0.0875);
    assert_eq!(result.decision, Decision::ConditionalAccept);
    // employment sits exactly on the 40% cutoff, which is not below it
    assert_eq!(result.explanations, vec![WEAK_FINANCIAL]);
}

#[test]
fn short_tenure_pushes_employment_below_the_cutoff() {
    let profile = ApplicantProfile {
        employment_years: Some(3),
        ..unemployed_profile()
    };

    let result = score(&profile, &ScoringConfig::default());

    assert_eq!(result.components.employment, 8.0);
    assert_eq!(result.explanations, vec![WEAK_EMPLOYMENT, WEAK_FINANCIAL]);
}

#[test]
fn fragile_applicant_is_declined_with_every_warning() {
    let result = score(&fragile_profile(), &ScoringConfig::default());

    assert_eq!(result.safety_score, 12.0);
    assert_eq!(result.pd_12m, 0.22);
    assert_eq!(result.decision, Decision::Decline);
    assert_eq!(
        result.explanations,
        vec![WEAK_HOUSING, WEAK_EMPLOYMENT, WEAK_FINANCIAL, WEAK_OTHER]
    );
}

#[test]
fn zero_weights_score_zero_for_any_profile() {
    let config = zero_weights();

    for profile in sample_profiles() {
        let result = score(&profile, &config);
        assert_eq!(result.safety_score, 0.0);
        assert_eq!(result.pd_12m, config.pd_max);
        assert_eq!(result.decision, Decision::Decline);
        assert_eq!(result.explanations, vec![MEETS_CRITERIA]);
    }
}

#[test]
fn generous_thresholds_can_accept_a_zero_weight_config() {
    let config = ScoringConfig {
        decision_thresholds: DecisionThresholds {
            accept_pd: 0.25,
            conditional_pd: 0.25,
        },
        ..zero_weights()
    };

    assert_eq!(score(&strong_profile(), &config).decision, Decision::Accept);
}

#[test]
fn negative_weight_is_rejected_before_scoring() {
    let err = resolve_config(Some(&json!({ "weights": { "personal": -5 } }))).unwrap_err();

    assert_eq!(err.field, "weights.personal");
}

#[test]
fn results_stay_within_bounds() {
    let config = ScoringConfig::default();

    for profile in sample_profiles() {
        let result = score(&profile, &config);
        assert!((0.0..=100.0).contains(&result.safety_score));
        assert!((0.0..=config.pd_max).contains(&result.pd_12m));
        assert!(result.components.personal <= config.weights.personal);
        assert!(result.components.employment <= config.weights.employment);
        assert!(result.components.financial <= config.weights.financial);
        assert!(result.components.housing <= config.weights.housing);
        assert!(result.components.other <= config.weights.other);
    }
}

#[test]
fn scoring_is_deterministic() {
    let config = resolve_config(Some(&json!({
        "weights": { "personal": 3.3, "financial": 17.9 },
        "pdMax": 0.31
    })))
    .unwrap();

    for profile in sample_profiles() {
        let first = score(&profile, &config);
        let second = score(&profile, &config);
        assert_eq!(first, second);
        assert_eq!(first.safety_score.to_bits(), second.safety_score.to_bits());
        assert_eq!(first.pd_12m.to_bits(), second.pd_12m.to_bits());
    }
}

#[test]
fn more_savings_never_lowers_the_financial_component() {
    let mut previous = f64::MIN;
    for savings in (0..=40).map(|step| f64::from(step) * 250.0) {
        let profile = ApplicantProfile {
            savings_balance: Some(savings),
            ..fragile_profile()
        };
        let financial = component_scores(&profile).financial;
        assert!(financial >= previous, "savings {savings} lowered the score");
        previous = financial;
    }
}

#[test]
fn more_past_defaults_never_raise_the_housing_component() {
    let mut previous = f64::MAX;
    for defaults in 0..8 {
        let profile = ApplicantProfile {
            number_of_past_defaults: Some(defaults),
            ..strong_profile()
        };
        let housing = component_scores(&profile).housing;
        assert!(housing <= previous, "defaults {defaults} raised the score");
        previous = housing;
    }
}

#[test]
fn lower_pd_is_never_a_more_severe_decision() {
    let thresholds = [
        DecisionThresholds::default(),
        DecisionThresholds {
            accept_pd: 0.0,
            conditional_pd: 0.2,
        },
        DecisionThresholds {
            accept_pd: 0.15,
            conditional_pd: 0.05,
        },
    ];
    let pds: Vec<f64> = (0..=50).map(|step| f64::from(step) * 0.005).collect();

    for thresholds in &thresholds {
        for window in pds.windows(2) {
            let lower = classify(window[0], thresholds);
            let higher = classify(window[1], thresholds);
            assert!(lower.severity() <= higher.severity());
        }
    }
}

#[test]
fn insurer_weights_change_the_aggregate_but_not_the_rules() {
    let profile = ApplicantProfile {
        utility_payment_history: Some(UtilityPaymentHistory::Frequently),
        ..strong_profile()
    };
    let utility_heavy = resolve_config(Some(&json!({
        "weights": { "personal": 0, "employment": 0, "financial": 0, "housing": 0, "other": 50 }
    })))
    .unwrap();

    let default_result = score(&profile, &ScoringConfig::default());
    let weighted_result = score(&profile, &utility_heavy);

    assert_eq!(default_result.components.other, 10.0);
    assert_eq!(default_result.safety_score, 90.0);
    assert_eq!(weighted_result.components.other, 25.0);
    assert_eq!(weighted_result.safety_score, 50.0);
    assert_eq!(
        component_scores(&profile).housing,
        component_scores(&strong_profile()).housing
    );
}

#[test]
fn tiny_weights_keep_results_in_range() {
    let config = resolve_config(Some(&json!({
        "weights": { "personal": 0.005, "employment": 0.005, "financial": 0.005, "housing": 0.005, "other": 0.005 }
    })))
    .expect("tiny weights are valid");

    for profile in sample_profiles() {
        let result = score(&profile, &config);

        for (name, points) in result.components.entries() {
            assert!((0.0..=0.005).contains(&points), "{name} scaled to {points}");
        }
        assert!((0.0..=100.0).contains(&result.safety_score));
        assert!((0.0..=config.pd_max).contains(&result.pd_12m));
    }

    let strong = score(&strong_profile(), &config);
    assert_eq!(strong.safety_score, 100.0);
    assert_eq!(strong.pd_12m, 0.0);
    assert_eq!(strong.decision, Decision::Accept);
}

#[test]
fn score_result_serializes_with_wire_names() {
    let result = score(&unemployed_profile(), &ScoringConfig::default());
    let payload = serde_json::to_value(&result).unwrap();

    assert_eq!(payload["safetyScore"], json!(65.0));
    assert_eq!(payload["PD_12m"], json!(0.0875));
    assert_eq!(payload["decision"], json!("conditional_accept"));
    assert_eq!(payload["components"]["housing"], json!(25.0));
    assert_eq!(payload["explanations"][0], json!(WEAK_FINANCIAL));
}

#[test]
fn profile_accepts_camel_case_payloads() {
    let profile: ApplicantProfile = serde_json::from_value(json!({
        "age": 30,
        "maritalStatus": "Married",
        "employmentType": "Self_employed",
        "guarantorLocation": "Outside",
        "landlordReferences": [{ "rating": "Neutral" }, { "rating": "Positive" }],
        "verifiedId": true
    }))
    .unwrap();

    assert_eq!(profile.employment_type, Some(EmploymentType::SelfEmployed));
    assert_eq!(profile.landlord_references.len(), 2);
    assert_eq!(profile.utility_payment_history, None);
    assert_eq!(profile.best_reference().map(|r| r.label()), Some("Positive"));
}
