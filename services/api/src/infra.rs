use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tenant_underwriting::error::AppError;
use tenant_underwriting::underwriting::{
    resolve_config, InsurerId, RepositoryError, ScoringConfig, ScoringConfigRepository,
    StoredScoringConfig,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local configuration store; whole records are replaced under the lock.
#[derive(Default, Clone)]
pub(crate) struct InMemoryScoringConfigRepository {
    records: Arc<Mutex<HashMap<InsurerId, StoredScoringConfig>>>,
}

impl ScoringConfigRepository for InMemoryScoringConfigRepository {
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
        match guard.remove(insurer) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn list(&self) -> Result<Vec<StoredScoringConfig>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut records: Vec<_> = guard.values().cloned().collect();
        records.sort_by(|a, b| a.insurer_id.cmp(&b.insurer_id));
        Ok(records)
    }
}

/// Read a JSON scoring configuration from disk and validate it.
pub(crate) fn load_scoring_config(path: &Path) -> Result<ScoringConfig, AppError> {
    let raw = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;
    Ok(resolve_config(Some(&value))?)
}

/// System default used for insurers without a stored configuration.
pub(crate) fn default_scoring_config(path: Option<&Path>) -> Result<ScoringConfig, AppError> {
    match path {
        Some(path) => load_scoring_config(path),
        None => Ok(ScoringConfig::default()),
    }
}
