use crate::cli::ServeArgs;
use crate::infra::{default_scoring_config, AppState, InMemoryScoringConfigRepository};
use crate::routes::with_underwriting_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tenant_underwriting::config::AppConfig;
use tenant_underwriting::error::AppError;
use tenant_underwriting::telemetry;
use tenant_underwriting::underwriting::UnderwritingService;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let default_config =
        default_scoring_config(config.underwriting.default_config_path.as_deref())?;
    if let Some(path) = &config.underwriting.default_config_path {
        info!(path = %path.display(), "loaded system default scoring configuration");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryScoringConfigRepository::default());
    let service = Arc::new(UnderwritingService::with_default_config(
        repository,
        default_config,
    ));

    let app = with_underwriting_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "tenant underwriting service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
