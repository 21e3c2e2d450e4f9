use crate::cli::ServeArgs;
use crate::infra::{build_lead_service, file_slot, AppState, LeadSources};
use crate::routes::with_lead_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lead_triage::config::AppConfig;
use lead_triage::error::AppError;
use lead_triage::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

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

    let sources = LeadSources::from_config(&config.leads);
    let lead_service = build_lead_service(&sources, file_slot(&config.leads.filter_dir))?;

    // A failed warm-up is retried by the first request.
    match lead_service.cache().leads() {
        Ok(leads) => info!(
            total = leads.len(),
            path = %sources.data.display(),
            "lead collection warmed"
        ),
        Err(error) => warn!(%error, "lead collection unavailable at start-up"),
    }

    let app = with_lead_routes(lead_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "lead triage service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
