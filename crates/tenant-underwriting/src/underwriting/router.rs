use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::{ApplicantProfile, InsurerId};
use super::report::ReportMetadata;
use super::repository::{RepositoryError, ScoringConfigRepository};
use super::service::{UnderwritingError, UnderwritingService};

/// Body accepted by the scoring endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    #[serde(default)]
    pub insurer_id: Option<InsurerId>,
    pub profile: ApplicantProfile,
}

/// Body accepted by the report endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(default)]
    pub insurer_id: Option<InsurerId>,
    #[serde(flatten)]
    pub metadata: ReportMetadata,
    pub profile: ApplicantProfile,
}

/// Router builder exposing scoring, reporting, and configuration management endpoints.
pub fn underwriting_router<R>(service: Arc<UnderwritingService<R>>) -> Router
where
    R: ScoringConfigRepository + 'static,
{
    Router::new()
        .route("/api/v1/underwriting/score", post(score_handler::<R>))
        .route("/api/v1/underwriting/report", post(report_handler::<R>))
        .route(
            "/api/v1/underwriting/configs/:insurer_id",
            get(get_config_handler::<R>)
                .put(put_config_handler::<R>)
                .delete(delete_config_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn score_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    R: ScoringConfigRepository + 'static,
{
    match service.assess(request.insurer_id.as_ref(), &request.profile) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn report_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
    axum::Json(request): axum::Json<ReportRequest>,
) -> Response
where
    R: ScoringConfigRepository + 'static,
{
    let ReportRequest {
        insurer_id,
        metadata,
        profile,
    } = request;

    match service.report(insurer_id.as_ref(), metadata, &profile) {
        Ok(report) => {
            let lines = report.render_lines();
            let payload = json!({
                "report": report,
                "lines": lines,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn get_config_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
    Path(insurer_id): Path<String>,
) -> Response
where
    R: ScoringConfigRepository + 'static,
{
    let id = InsurerId(insurer_id);
    match service.config_for(&id) {
        Ok(Some(stored)) => {
            let payload = json!({
                "insurerId": stored.insurer_id,
                "source": "stored",
                "config": stored.config,
                "updatedAt": stored.updated_at,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(None) => {
            let payload = json!({
                "insurerId": id,
                "source": "default",
                "config": service.default_config(),
                "updatedAt": Value::Null,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn put_config_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
    Path(insurer_id): Path<String>,
    axum::Json(raw): axum::Json<Value>,
) -> Response
where
    R: ScoringConfigRepository + 'static,
{
    let id = InsurerId(insurer_id);
    match service.store_config(&id, &raw) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_config_handler<R>(
    State(service): State<Arc<UnderwritingService<R>>>,
    Path(insurer_id): Path<String>,
) -> Response
where
    R: ScoringConfigRepository + 'static,
{
    let id = InsurerId(insurer_id);
    match service.remove_config(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(UnderwritingError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": format!("no scoring configuration stored for {}", id.as_str()),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: UnderwritingError) -> Response {
    let status = error.status_code();
    let payload = match &error {
        UnderwritingError::Config(validation) => json!({
            "error": error.to_string(),
            "field": validation.field,
        }),
        _ => json!({
            "error": error.to_string(),
        }),
    };
    (status, axum::Json(payload)).into_response()
}
