use super::config::{ComponentWeights, DecisionThresholds};
use super::rules::{
    ComponentScores, EMPLOYMENT_MAX, FINANCIAL_MAX, HOUSING_MAX, OTHER_MAX, PERSONAL_MAX,
};
use serde::{Deserialize, Serialize};

pub const WEAK_HOUSING: &str = "Weak housing history or missing guarantor.";
pub const WEAK_EMPLOYMENT: &str = "Employment not stable or low income.";
pub const WEAK_FINANCIAL: &str = "High debt or low savings.";
pub const WEAK_OTHER: &str = "Utility payments or verification missing.";
pub const MEETS_CRITERIA: &str = "Applicant meets primary underwriting criteria.";

/// Underwriting outcome derived from the 12 month probability of default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accept,
    ConditionalAccept,
    Decline,
}

impl Decision {
    /// Ordering used to compare outcomes: accept < conditional_accept < decline.
    pub const fn severity(self) -> u8 {
        match self {
            Decision::Accept => 0,
            Decision::ConditionalAccept => 1,
            Decision::Decline => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Decision::Accept => "accept",
            Decision::ConditionalAccept => "conditional_accept",
            Decision::Decline => "decline",
        }
    }
}

/// Component points after reweighting, each bounded by its configured weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentBreakdown {
    pub personal: f64,
    pub employment: f64,
    pub financial: f64,
    pub housing: f64,
    pub other: f64,
}

impl ComponentBreakdown {
    pub fn total(&self) -> f64 {
        self.personal + self.employment + self.financial + self.housing + self.other
    }

    /// Component names paired with their points, in report order.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("personal", self.personal),
            ("employment", self.employment),
            ("financial", self.financial),
            ("housing", self.housing),
            ("other", self.other),
        ]
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// Rounding can lift a tiny weight's share above the weight itself.
fn scaled(points: f64, original_max: f64, weight: f64) -> f64 {
    round_to(points / original_max * weight, 2).min(weight)
}

/// Map fixed-scale points onto the insurer's weights.
pub fn rescale(scores: &ComponentScores, weights: &ComponentWeights) -> ComponentBreakdown {
    ComponentBreakdown {
        personal: scaled(scores.personal, PERSONAL_MAX, weights.personal),
        employment: scaled(scores.employment, EMPLOYMENT_MAX, weights.employment),
        financial: scaled(scores.financial, FINANCIAL_MAX, weights.financial),
        housing: scaled(scores.housing, HOUSING_MAX, weights.housing),
        other: scaled(scores.other, OTHER_MAX, weights.other),
    }
}

/// Percentage of attainable weighted points. A zero weight total scores 0.
pub fn safety_score(breakdown: &ComponentBreakdown, weights: &ComponentWeights) -> f64 {
    let total_weight = weights.total();
    if total_weight <= 0.0 {
        return 0.0;
    }

    round_to(breakdown.total() / total_weight * 100.0, 2).clamp(0.0, 100.0)
}

pub fn probability_of_default(safety_score: f64, pd_max: f64) -> f64 {
    round_to(pd_max * (1.0 - safety_score / 100.0), 4)
        .min(pd_max)
        .max(0.0)
}

pub fn classify(pd: f64, thresholds: &DecisionThresholds) -> Decision {
    if pd <= thresholds.accept_pd {
        Decision::Accept
    } else if pd <= thresholds.conditional_pd {
        Decision::ConditionalAccept
    } else {
        Decision::Decline
    }
}

/// Percentage of a component's weight that was earned; `None` for zero-weight components.
///
/// Computed as `points * 100 / weight` rather than `points / weight * 100` so a component sitting
/// exactly on a cutoff (10 of 25 is 40%) lands on it instead of drifting across it.
fn attainment(points: f64, weight: f64) -> Option<f64> {
    (weight > 0.0).then(|| points * 100.0 / weight)
}

fn below(points: f64, weight: f64, cutoff: f64) -> bool {
    attainment(points, weight).is_some_and(|percent| percent < cutoff)
}

pub fn explain(breakdown: &ComponentBreakdown, weights: &ComponentWeights) -> Vec<String> {
    let checks = [
        (below(breakdown.housing, weights.housing, 40.0), WEAK_HOUSING),
        (
            below(breakdown.employment, weights.employment, 40.0),
            WEAK_EMPLOYMENT,
        ),
        (
            below(breakdown.financial, weights.financial, 40.0),
            WEAK_FINANCIAL,
        ),
        (below(breakdown.other, weights.other, 30.0), WEAK_OTHER),
    ];

    let mut explanations: Vec<String> = checks
        .into_iter()
        .filter(|(triggered, _)| *triggered)
        .map(|(_, message)| message.to_string())
        .collect();

    if explanations.is_empty() {
        explanations.push(MEETS_CRITERIA.to_string());
    }

    explanations
}
