use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryDirectory};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_match::config::AppConfig;
use talent_match::error::AppError;
use talent_match::matching::MatchingService;
use talent_match::talent::RosterImporter;
use talent_match::telemetry;
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

    let mut directory = InMemoryDirectory::demo()?;
    if let Some(path) = args.roster.take() {
        let roster = RosterImporter::from_path(&path)?;
        info!(
            roster = %path.display(),
            profiles = roster.profiles.len(),
            skills = roster.skills.len(),
            "roster imported"
        );
        directory = directory.with_roster(roster);
    }

    let matching_service = Arc::new(MatchingService::new(
        Arc::new(directory),
        config.matching.formula,
    ));

    let app = with_matching_routes(matching_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        formula = %config.matching.formula,
        "talent matching service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
