use serde::{Deserialize, Serialize};

/// Identifier wrapper for the insurer requesting an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InsurerId(pub String);

impl InsurerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Prospective tenant attributes consumed by the scoring engine.
///
/// Every field is optional on the wire. Fallbacks are applied through the accessor methods
/// so the rule tables never see an undefined value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicantProfile {
    pub age: Option<u32>,
    pub marital_status: Option<MaritalStatus>,
    pub number_of_dependents: Option<u32>,

    pub employment_type: Option<EmploymentType>,
    pub monthly_net_salary: Option<f64>,
    pub employment_years: Option<u32>,

    pub monthly_debt_payments: Option<f64>,
    pub savings_balance: Option<f64>,
    pub other_obligations: Option<f64>,

    pub rent_amount: Option<f64>,
    pub has_guarantor: Option<bool>,
    pub guarantor_location: Option<GuarantorLocation>,
    pub months_at_residence: Option<u32>,
    pub number_of_past_defaults: Option<u32>,
    pub landlord_references: Vec<LandlordReference>,

    pub utility_payment_history: Option<UtilityPaymentHistory>,
    pub health_status: Option<HealthStatus>,
    pub verified_id: Option<bool>,
}

impl ApplicantProfile {
    pub fn dependents(&self) -> u32 {
        self.number_of_dependents.unwrap_or(0)
    }

    pub fn salary(&self) -> f64 {
        self.monthly_net_salary.unwrap_or(0.0)
    }

    pub fn years_employed(&self) -> u32 {
        self.employment_years.unwrap_or(0)
    }

    pub fn debt_payments(&self) -> f64 {
        self.monthly_debt_payments.unwrap_or(0.0)
    }

    pub fn savings(&self) -> f64 {
        self.savings_balance.unwrap_or(0.0)
    }

    pub fn obligations(&self) -> f64 {
        self.other_obligations.unwrap_or(0.0)
    }

    pub fn rent(&self) -> f64 {
        self.rent_amount.unwrap_or(0.0)
    }

    pub fn guarantor(&self) -> bool {
        self.has_guarantor.unwrap_or(false)
    }

    pub fn guarantor_origin(&self) -> GuarantorLocation {
        self.guarantor_location.unwrap_or(GuarantorLocation::Unknown)
    }

    pub fn residence_months(&self) -> u32 {
        self.months_at_residence.unwrap_or(0)
    }

    pub fn past_defaults(&self) -> u32 {
        self.number_of_past_defaults.unwrap_or(0)
    }

    pub fn utility_history(&self) -> UtilityPaymentHistory {
        self.utility_payment_history
            .unwrap_or(UtilityPaymentHistory::Sometimes)
    }

    pub fn health(&self) -> HealthStatus {
        self.health_status.unwrap_or(HealthStatus::Good)
    }

    pub fn id_verified(&self) -> bool {
        self.verified_id.unwrap_or(false)
    }

    /// Highest rated landlord reference, if any were supplied.
    pub fn best_reference(&self) -> Option<ReferenceRating> {
        self.landlord_references
            .iter()
            .map(|reference| reference.rating)
            .max_by_key(|rating| rating.points())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    Permanent,
    Contract,
    #[serde(rename = "Self_employed")]
    SelfEmployed,
    Student,
    Unemployed,
    Retired,
}

/// Where the guarantor resides, which affects how enforceable the guarantee is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuarantorLocation {
    Tunisia,
    Outside,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandlordReference {
    pub rating: ReferenceRating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceRating {
    Positive,
    Neutral,
    Negative,
}

impl ReferenceRating {
    pub const fn points(self) -> u8 {
        match self {
            ReferenceRating::Positive => 5,
            ReferenceRating::Neutral => 2,
            ReferenceRating::Negative => 0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ReferenceRating::Positive => "Positive",
            ReferenceRating::Neutral => "Neutral",
            ReferenceRating::Negative => "Negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UtilityPaymentHistory {
    /// Utilities always paid on time.
    Always,
    Sometimes,
    /// Frequently late.
    Frequently,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Good,
    Average,
    Poor,
}
