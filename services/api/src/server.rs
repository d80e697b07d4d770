use crate::cli::ServeArgs;
use crate::infra::{load_directory, AppState};
use crate::routes::with_donor_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use blood_donor::config::AppConfig;
use blood_donor::error::AppError;
use blood_donor::telemetry;
use blood_donor::workflows::donors::DonorSearchService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(load_directory(config.donors.directory_csv.as_deref())?);
    let search_service = Arc::new(DonorSearchService::new(
        directory.clone(),
        config.donors.policy(),
    ));

    let app = with_donor_routes(search_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        donors = directory.len(),
        minimum_interval_days = config.donors.minimum_interval_days,
        "blood donor search ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
