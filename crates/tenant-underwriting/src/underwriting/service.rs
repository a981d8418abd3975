use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::domain::{ApplicantProfile, InsurerId};
use super::report::{ReportMetadata, UnderwritingReport};
use super::repository::{RepositoryError, ScoringConfigRepository, StoredScoringConfig};
use super::scoring::{self, resolve_config, ConfigValidationError, ScoreResult, ScoringConfig};
use super::validation::{validate_profile, ProfileValidationError};

/// Where the configuration used for an assessment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    Stored,
    Default,
}

impl ConfigSource {
    pub const fn label(self) -> &'static str {
        match self {
            ConfigSource::Stored => "stored",
            ConfigSource::Default => "default",
        }
    }
}

/// Service composing profile validation, configuration lookup, and the scoring engine.
pub struct UnderwritingService<R> {
    repository: Arc<R>,
    default_config: ScoringConfig,
}

impl<R> UnderwritingService<R>
where
    R: ScoringConfigRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_default_config(repository, ScoringConfig::default())
    }

    /// Use `default_config` for insurers without a stored configuration.
    pub fn with_default_config(repository: Arc<R>, default_config: ScoringConfig) -> Self {
        Self {
            repository,
            default_config,
        }
    }

    pub fn default_config(&self) -> &ScoringConfig {
        &self.default_config
    }

    /// Stored configuration for the insurer, falling back to the system default.
    pub fn effective_config(
        &self,
        insurer: Option<&InsurerId>,
    ) -> Result<(ScoringConfig, ConfigSource), UnderwritingError> {
        let Some(insurer) = insurer else {
            return Ok((self.default_config.clone(), ConfigSource::Default));
        };

        match self.repository.fetch(insurer)? {
            Some(stored) => Ok((stored.config, ConfigSource::Stored)),
            None => Ok((self.default_config.clone(), ConfigSource::Default)),
        }
    }

    /// Validate the profile and score it with the insurer's effective configuration.
    pub fn assess(
        &self,
        insurer: Option<&InsurerId>,
        profile: &ApplicantProfile,
    ) -> Result<ScoreResult, UnderwritingError> {
        validate_profile(profile)?;
        let (config, source) = self.effective_config(insurer)?;

        let result = scoring::score(profile, &config);

        debug!(
            insurer = insurer.map(InsurerId::as_str).unwrap_or("-"),
            config_source = source.label(),
            safety_score = result.safety_score,
            pd_12m = result.pd_12m,
            decision = result.decision.label(),
            "applicant scored"
        );

        Ok(result)
    }

    /// Score the profile and wrap the result with report metadata.
    pub fn report(
        &self,
        insurer: Option<&InsurerId>,
        metadata: ReportMetadata,
        profile: &ApplicantProfile,
    ) -> Result<UnderwritingReport, UnderwritingError> {
        let result = self.assess(insurer, profile)?;
        Ok(UnderwritingReport::new(
            insurer.cloned(),
            metadata,
            result,
            Utc::now(),
        ))
    }

    /// Validate a raw configuration payload and persist it for the insurer.
    pub fn store_config(
        &self,
        insurer: &InsurerId,
        raw: &Value,
    ) -> Result<StoredScoringConfig, UnderwritingError> {
        let config = resolve_config(Some(raw))?;

        if config.has_inverted_thresholds() {
            warn!(
                insurer = insurer.as_str(),
                accept_pd = config.decision_thresholds.accept_pd,
                conditional_pd = config.decision_thresholds.conditional_pd,
                "acceptPd exceeds conditionalPd; conditional_accept is unreachable"
            );
        }

        let stored = self.repository.upsert(StoredScoringConfig {
            insurer_id: insurer.clone(),
            config,
            updated_at: Utc::now(),
        })?;

        info!(insurer = insurer.as_str(), "scoring configuration stored");
        Ok(stored)
    }

    pub fn config_for(
        &self,
        insurer: &InsurerId,
    ) -> Result<Option<StoredScoringConfig>, UnderwritingError> {
        Ok(self.repository.fetch(insurer)?)
    }

    pub fn remove_config(&self, insurer: &InsurerId) -> Result<(), UnderwritingError> {
        self.repository.delete(insurer)?;
        info!(insurer = insurer.as_str(), "scoring configuration removed");
        Ok(())
    }
}

/// Error raised by the underwriting service.
#[derive(Debug, thiserror::Error)]
pub enum UnderwritingError {
    #[error(transparent)]
    Config(#[from] ConfigValidationError),
    #[error(transparent)]
    Profile(#[from] ProfileValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl UnderwritingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UnderwritingError::Config(_) => StatusCode::BAD_REQUEST,
            UnderwritingError::Profile(_) => StatusCode::UNPROCESSABLE_ENTITY,
            UnderwritingError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            UnderwritingError::Repository(RepositoryError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
