//! Tenant risk scoring and underwriting decisions.
//!
//! The scoring engine in [`scoring`] is pure; everything else in this module is the plumbing
//! that feeds it (profile validation, per-insurer configuration storage, HTTP routes, reports,
//! and CSV import).

pub mod domain;
pub mod import;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantProfile, EmploymentType, GuarantorLocation, HealthStatus, InsurerId,
    LandlordReference, MaritalStatus, ReferenceRating, UtilityPaymentHistory,
};
pub use import::{parse_profiles, parse_profiles_from_path, ImportedApplicant, ProfileImportError};
pub use report::{ReportMetadata, UnderwritingReport};
pub use repository::{RepositoryError, ScoringConfigRepository, StoredScoringConfig};
pub use router::{underwriting_router, ReportRequest, ScoreRequest};
pub use scoring::{
    resolve_config, score, ComponentBreakdown, ComponentWeights, ConfigValidationError, Decision,
    DecisionThresholds, ScoreResult, ScoringConfig,
};
pub use service::{ConfigSource, UnderwritingError, UnderwritingService};
pub use validation::{validate_profile, ProfileValidationError};
