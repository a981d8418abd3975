use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::underwriting::domain::{
    ApplicantProfile, EmploymentType, GuarantorLocation, HealthStatus, InsurerId,
    LandlordReference, MaritalStatus, ReferenceRating, UtilityPaymentHistory,
};
use crate::underwriting::repository::{
    RepositoryError, ScoringConfigRepository, StoredScoringConfig,
};
use crate::underwriting::{underwriting_router, UnderwritingService};

/// Applicant who maxes out every rule table.
pub(super) fn strong_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: Some(30),
        marital_status: Some(MaritalStatus::Married),
        number_of_dependents: Some(1),
        employment_type: Some(EmploymentType::Permanent),
        monthly_net_salary: Some(3000.0),
        employment_years: Some(6),
        monthly_debt_payments: Some(0.0),
        savings_balance: Some(6000.0),
        other_obligations: Some(0.0),
        rent_amount: Some(800.0),
        has_guarantor: Some(true),
        guarantor_location: Some(GuarantorLocation::Tunisia),
        months_at_residence: Some(40),
        number_of_past_defaults: Some(0),
        landlord_references: vec![LandlordReference {
            rating: ReferenceRating::Positive,
        }],
        utility_payment_history: Some(UtilityPaymentHistory::Always),
        health_status: Some(HealthStatus::Good),
        verified_id: Some(true),
    }
}

/// Same applicant without income or savings.
pub(super) fn unemployed_profile() -> ApplicantProfile {
    ApplicantProfile {
        monthly_net_salary: Some(0.0),
        employment_type: Some(EmploymentType::Unemployed),
        savings_balance: Some(0.0),
        ..strong_profile()
    }
}

/// Applicant weak in every area except the personal one.
pub(super) fn fragile_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: Some(45),
        marital_status: Some(MaritalStatus::Single),
        number_of_dependents: Some(3),
        employment_type: Some(EmploymentType::Student),
        monthly_net_salary: Some(900.0),
        employment_years: Some(0),
        monthly_debt_payments: Some(300.0),
        savings_balance: Some(100.0),
        other_obligations: Some(200.0),
        rent_amount: Some(600.0),
        has_guarantor: Some(false),
        guarantor_location: None,
        months_at_residence: Some(3),
        number_of_past_defaults: Some(4),
        landlord_references: vec![LandlordReference {
            rating: ReferenceRating::Negative,
        }],
        utility_payment_history: Some(UtilityPaymentHistory::Frequently),
        health_status: Some(HealthStatus::Poor),
        verified_id: Some(false),
    }
}

pub(super) fn insurer(name: &str) -> InsurerId {
    InsurerId(name.to_string())
}

pub(super) fn build_service() -> (
    UnderwritingService<MemoryConfigRepository>,
    Arc<MemoryConfigRepository>,
) {
    let repository = Arc::new(MemoryConfigRepository::default());
    let service = UnderwritingService::new(repository.clone());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryConfigRepository {
    pub(super) records: Arc<Mutex<HashMap<InsurerId, StoredScoringConfig>>>,
}

impl ScoringConfigRepository for MemoryConfigRepository {
    fn fetch(&self, insurer: &InsurerId) -> Result<Option<StoredScoringConfig>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(insurer).cloned())
    }

    fn upsert(&self, record: StoredScoringConfig) -> Result<StoredScoringConfig, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.insurer_id.clone(), record.clone());
        Ok(record)
    }

    fn delete(&self, insurer: &InsurerId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .remove(insurer)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn list(&self) -> Result<Vec<StoredScoringConfig>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct UnavailableRepository;

impl ScoringConfigRepository for UnavailableRepository {
    fn fetch(&self, _insurer: &InsurerId) -> Result<Option<StoredScoringConfig>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn upsert(&self, _record: StoredScoringConfig) -> Result<StoredScoringConfig, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _insurer: &InsurerId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<StoredScoringConfig>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(
    service: UnderwritingService<MemoryConfigRepository>,
) -> axum::Router {
    underwriting_router(Arc::new(service))
}
