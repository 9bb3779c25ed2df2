use crate::cli::ServeArgs;
use crate::infra::{load_catalog, AppState};
use crate::routes::with_result_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ocean_badges::config::AppConfig;
use ocean_badges::error::AppError;
use ocean_badges::results::{InMemoryResultStore, ResultService, SlidingWindowLimiter};
use ocean_badges::telemetry;
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

    let catalog = Arc::new(load_catalog(&config.scoring)?);
    let store = Arc::new(InMemoryResultStore::default());
    let limiter = Arc::new(SlidingWindowLimiter::new(
        config.results.rate_limit.max_requests,
        config.results.rate_limit.window,
    ));
    let result_service = Arc::new(ResultService::new(
        catalog,
        store,
        limiter,
        config.result_policy(),
    ));

    let app = with_result_routes(result_service, &config.server.public_base_url)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        public_base_url = %config.server.public_base_url,
        "ocean badge service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
