use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::InsurerId;
use super::scoring::ScoringConfig;

/// Persisted scoring configuration for a single insurer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredScoringConfig {
    pub insurer_id: InsurerId,
    pub config: ScoringConfig,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction for per-insurer configurations.
///
/// Implementations own consistency of concurrent upserts; the service only reads and replaces
/// whole records.
pub trait ScoringConfigRepository: Send + Sync {
    fn fetch(&self, insurer: &InsurerId) -> Result<Option<StoredScoringConfig>, RepositoryError>;
    fn upsert(&self, record: StoredScoringConfig) -> Result<StoredScoringConfig, RepositoryError>;
    fn delete(&self, insurer: &InsurerId) -> Result<(), RepositoryError>;
    fn list(&self) -> Result<Vec<StoredScoringConfig>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
