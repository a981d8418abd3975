use super::domain::ApplicantProfile;

/// Validation errors raised before a profile reaches the scoring engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileValidationError {
    #[error("`{field}` must be a finite, non-negative amount (found {value})")]
    InvalidAmount { field: &'static str, value: f64 },
}

/// Reject monetary amounts the rule tables cannot interpret.
///
/// Counts are unsigned in [`ApplicantProfile`], so negative values never deserialize.
pub fn validate_profile(profile: &ApplicantProfile) -> Result<(), ProfileValidationError> {
    let amounts = [
        ("monthlyNetSalary", profile.monthly_net_salary),
        ("monthlyDebtPayments", profile.monthly_debt_payments),
        ("savingsBalance", profile.savings_balance),
        ("otherObligations", profile.other_obligations),
        ("rentAmount", profile.rent_amount),
    ];

    for (field, amount) in amounts {
        if let Some(value) = amount {
            if !value.is_finite() || value < 0.0 {
                return Err(ProfileValidationError::InvalidAmount { field, value });
            }
        }
    }

    Ok(())
}
