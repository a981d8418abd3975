mod config;
mod policy;
mod rules;

pub use config::{
    resolve_config, resolve_with_defaults, ComponentWeights, ConfigValidationError,
    DecisionThresholds, ScoringConfig,
};
pub use policy::{
    classify, explain, probability_of_default, rescale, safety_score, ComponentBreakdown,
    Decision, MEETS_CRITERIA, WEAK_EMPLOYMENT, WEAK_FINANCIAL, WEAK_HOUSING, WEAK_OTHER,
};
pub use rules::{
    component_scores, ComponentScores, EMPLOYMENT_MAX, FINANCIAL_MAX, HOUSING_MAX, OTHER_MAX,
    PERSONAL_MAX,
};

use super::domain::ApplicantProfile;
use serde::{Deserialize, Serialize};

/// Scoring output returned to callers and embedded in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub safety_score: f64,
    #[serde(rename = "PD_12m")]
    pub pd_12m: f64,
    pub decision: Decision,
    pub components: ComponentBreakdown,
    pub explanations: Vec<String>,
}

/// Score a profile against an insurer configuration.
///
/// Pure: no I/O, no shared state, identical inputs give identical results.
pub fn score(profile: &ApplicantProfile, config: &ScoringConfig) -> ScoreResult {
    let raw = component_scores(profile);
    let components = rescale(&raw, &config.weights);

    let safety_score = safety_score(&components, &config.weights);
    let pd_12m = probability_of_default(safety_score, config.pd_max);
    let decision = classify(pd_12m, &config.decision_thresholds);
    let explanations = explain(&components, &config.weights);

    ScoreResult {
        safety_score,
        pd_12m,
        decision,
        components,
        explanations,
    }
}
