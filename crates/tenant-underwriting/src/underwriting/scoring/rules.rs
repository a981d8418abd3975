use super::super::domain::{
    ApplicantProfile, EmploymentType, GuarantorLocation, HealthStatus, MaritalStatus,
    UtilityPaymentHistory,
};
use serde::{Deserialize, Serialize};

pub const PERSONAL_MAX: f64 = 10.0;
pub const EMPLOYMENT_MAX: f64 = 25.0;
pub const FINANCIAL_MAX: f64 = 20.0;
pub const HOUSING_MAX: f64 = 25.0;
pub const OTHER_MAX: f64 = 20.0;

/// Component points on their fixed rule-table scales, before insurer reweighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub personal: f64,
    pub employment: f64,
    pub financial: f64,
    pub housing: f64,
    pub other: f64,
}

/// Evaluate every rule table against the profile. Each category is clamped to its scale.
pub fn component_scores(profile: &ApplicantProfile) -> ComponentScores {
    ComponentScores {
        personal: clamp(personal_points(profile), PERSONAL_MAX),
        employment: clamp(employment_points(profile), EMPLOYMENT_MAX),
        financial: clamp(financial_points(profile), FINANCIAL_MAX),
        housing: clamp(housing_points(profile), HOUSING_MAX),
        other: clamp(other_points(profile), OTHER_MAX),
    }
}

fn clamp(points: f64, max: f64) -> f64 {
    points.clamp(0.0, max)
}

fn personal_points(profile: &ApplicantProfile) -> f64 {
    let age = match profile.age {
        Some(21..=60) => 5.0,
        Some(age) if age > 60 => 2.0,
        Some(age) if age > 0 => 2.0,
        _ => 0.0,
    };

    let marital = match profile.marital_status {
        Some(MaritalStatus::Married) => 3.0,
        Some(MaritalStatus::Single) => 2.0,
        Some(MaritalStatus::Divorced | MaritalStatus::Widowed) => 1.0,
        None => 0.0,
    };

    let dependents = match profile.dependents() {
        0..=2 => 2.0,
        3..=4 => 1.0,
        _ => 0.0,
    };

    age + marital + dependents
}

fn employment_points(profile: &ApplicantProfile) -> f64 {
    let contract = match profile.employment_type {
        Some(EmploymentType::Permanent) => 10.0,
        Some(EmploymentType::Contract) => 7.0,
        Some(EmploymentType::SelfEmployed) => 5.0,
        Some(EmploymentType::Retired) => 4.0,
        Some(EmploymentType::Student) => 2.0,
        Some(EmploymentType::Unemployed) | None => 0.0,
    };

    let salary = profile.salary();
    let rent = profile.rent();
    let affordability = if salary > 0.0 && rent > 0.0 {
        let rent_to_salary = rent / salary;
        if rent_to_salary <= 0.30 {
            10.0
        } else if rent_to_salary <= 0.50 {
            5.0
        } else {
            0.0
        }
    } else {
        5.0
    };

    let tenure = match profile.years_employed() {
        years if years >= 5 => 5.0,
        years if years >= 2 => 3.0,
        _ => 1.0,
    };

    contract + affordability + tenure
}

/// Share of salary consumed by `amount`; an absent salary counts as fully consumed.
fn income_share(amount: f64, salary: f64) -> f64 {
    if salary > 0.0 {
        amount / salary
    } else {
        1.0
    }
}

fn financial_points(profile: &ApplicantProfile) -> f64 {
    let salary = profile.salary();

    let debt_to_income = income_share(profile.debt_payments() + profile.obligations(), salary);
    let debt = if debt_to_income < 0.20 {
        7.0
    } else if debt_to_income <= 0.40 {
        4.0
    } else {
        0.0
    };

    let rent = profile.rent();
    let months_of_rent = if rent > 0.0 {
        profile.savings() / rent
    } else {
        0.0
    };
    let savings = if months_of_rent >= 6.0 {
        8.0
    } else if months_of_rent >= 3.0 {
        4.0
    } else {
        0.0
    };

    let obligation_ratio = income_share(profile.obligations(), salary);
    let obligations = if obligation_ratio < 0.10 {
        5.0
    } else if obligation_ratio <= 0.20 {
        3.0
    } else {
        0.0
    };

    debt + savings + obligations
}

fn housing_points(profile: &ApplicantProfile) -> f64 {
    let stability = match profile.residence_months() {
        months if months >= 36 => 5.0,
        months if months >= 12 => 3.0,
        _ => 1.0,
    };

    let guarantor = if profile.guarantor() {
        5.0 + match profile.guarantor_origin() {
            GuarantorLocation::Tunisia => 3.0,
            GuarantorLocation::Outside => 1.0,
            GuarantorLocation::Unknown => 0.0,
        }
    } else {
        0.0
    };

    let defaults = match profile.past_defaults() {
        0 => 7.0,
        1..=2 => 3.0,
        _ => 0.0,
    };

    // Only the strongest reference counts; extra references never stack.
    let references = profile
        .best_reference()
        .map(|rating| f64::from(rating.points()))
        .unwrap_or(0.0);

    stability + guarantor + defaults + references
}

fn other_points(profile: &ApplicantProfile) -> f64 {
    let utilities = match profile.utility_history() {
        UtilityPaymentHistory::Always => 10.0,
        UtilityPaymentHistory::Sometimes => 5.0,
        UtilityPaymentHistory::Frequently => 0.0,
    };

    let health = match profile.health() {
        HealthStatus::Good => 5.0,
        HealthStatus::Average => 3.0,
        HealthStatus::Poor => 0.0,
    };

    let identity = if profile.id_verified() { 5.0 } else { 0.0 };

    utilities + health + identity
}
