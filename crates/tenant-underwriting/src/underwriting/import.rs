use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::domain::{
    ApplicantProfile, EmploymentType, GuarantorLocation, HealthStatus, LandlordReference,
    MaritalStatus, ReferenceRating, UtilityPaymentHistory,
};

#[derive(Debug, thiserror::Error)]
pub enum ProfileImportError {
    #[error("failed to read applicant export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid applicant CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown landlord reference rating '{value}'")]
    InvalidReference { row: usize, value: String },
}

/// One CSV row turned into a scoreable profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedApplicant {
    pub applicant_id: String,
    pub profile: ApplicantProfile,
}

pub fn parse_profiles_from_path<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ImportedApplicant>, ProfileImportError> {
    let file = File::open(path)?;
    parse_profiles(file)
}

/// Parse applicant rows. Headers match the JSON profile field names plus `applicantId`.
pub fn parse_profiles<R: Read>(reader: R) -> Result<Vec<ImportedApplicant>, ProfileImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut applicants = Vec::new();

    for (index, record) in csv_reader.deserialize::<ApplicantRow>().enumerate() {
        let row = record?;
        let row_number = index + 1;
        applicants.push(row.into_applicant(row_number)?);
    }

    Ok(applicants)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicantRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    applicant_id: Option<String>,
    age: Option<u32>,
    marital_status: Option<MaritalStatus>,
    number_of_dependents: Option<u32>,
    employment_type: Option<EmploymentType>,
    monthly_net_salary: Option<f64>,
    employment_years: Option<u32>,
    monthly_debt_payments: Option<f64>,
    savings_balance: Option<f64>,
    other_obligations: Option<f64>,
    rent_amount: Option<f64>,
    has_guarantor: Option<bool>,
    guarantor_location: Option<GuarantorLocation>,
    months_at_residence: Option<u32>,
    number_of_past_defaults: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    landlord_references: Option<String>,
    utility_payment_history: Option<UtilityPaymentHistory>,
    health_status: Option<HealthStatus>,
    verified_id: Option<bool>,
}

impl ApplicantRow {
    fn into_applicant(self, row: usize) -> Result<ImportedApplicant, ProfileImportError> {
        let landlord_references = match self.landlord_references.as_deref() {
            Some(raw) => parse_references(raw, row)?,
            None => Vec::new(),
        };

        Ok(ImportedApplicant {
            applicant_id: self.applicant_id.unwrap_or_else(|| format!("row-{row}")),
            profile: ApplicantProfile {
                age: self.age,
                marital_status: self.marital_status,
                number_of_dependents: self.number_of_dependents,
                employment_type: self.employment_type,
                monthly_net_salary: self.monthly_net_salary,
                employment_years: self.employment_years,
                monthly_debt_payments: self.monthly_debt_payments,
                savings_balance: self.savings_balance,
                other_obligations: self.other_obligations,
                rent_amount: self.rent_amount,
                has_guarantor: self.has_guarantor,
                guarantor_location: self.guarantor_location,
                months_at_residence: self.months_at_residence,
                number_of_past_defaults: self.number_of_past_defaults,
                landlord_references,
                utility_payment_history: self.utility_payment_history,
                health_status: self.health_status,
                verified_id: self.verified_id,
            },
        })
    }
}

fn parse_references(raw: &str, row: usize) -> Result<Vec<LandlordReference>, ProfileImportError> {
    raw.split(';')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            let rating = match value.to_ascii_lowercase().as_str() {
                "positive" => ReferenceRating::Positive,
                "neutral" => ReferenceRating::Neutral,
                "negative" => ReferenceRating::Negative,
                _ => {
                    return Err(ProfileImportError::InvalidReference {
                        row,
                        value: value.to_string(),
                    })
                }
            };
            Ok(LandlordReference { rating })
        })
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
