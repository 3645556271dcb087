//! Pathway Pilot server binary.
//!
//! Wires the filesystem catalog and the in-memory consultation store
//! into the application handlers and serves the REST API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pathway_pilot::adapters::http::{api_router, ConsultationHandlers, PathwayHandlers};
use pathway_pilot::adapters::{FilePathwayStore, InMemoryConsultationRepository};
use pathway_pilot::application::handlers::{
    AbandonConsultationHandler, AnswerQuestionHandler, GenerateReportHandler,
    GetConsultationViewHandler, GoBackHandler, ListPathwaysHandler, RestartConsultationHandler,
    StartConsultationHandler,
};
use pathway_pilot::config::AppConfig;
use pathway_pilot::ports::{ConsultationRepository, PathwayStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let pathway_store: Arc<dyn PathwayStore> =
        Arc::new(FilePathwayStore::new(config.catalog.pathways_path()));
    let consultations: Arc<dyn ConsultationRepository> =
        Arc::new(InMemoryConsultationRepository::new());

    let pathway_handlers = PathwayHandlers::new(Arc::new(ListPathwaysHandler::new(
        pathway_store.clone(),
    )));
    let consultation_handlers = ConsultationHandlers::new(
        Arc::new(StartConsultationHandler::new(
            pathway_store.clone(),
            consultations.clone(),
        )),
        Arc::new(AnswerQuestionHandler::new(
            pathway_store.clone(),
            consultations.clone(),
        )),
        Arc::new(GoBackHandler::new(
            pathway_store.clone(),
            consultations.clone(),
        )),
        Arc::new(RestartConsultationHandler::new(
            pathway_store.clone(),
            consultations.clone(),
        )),
        Arc::new(GetConsultationViewHandler::new(
            pathway_store.clone(),
            consultations.clone(),
        )),
        Arc::new(GenerateReportHandler::new(
            pathway_store.clone(),
            consultations.clone(),
        )),
        Arc::new(AbandonConsultationHandler::new(consultations.clone())),
    );

    let cors = {
        let origins: Vec<HeaderValue> = config
            .server
            .cors_origins_list()
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        if origins.is_empty() {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    let app = api_router(pathway_handlers, consultation_handlers)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    info!(%addr, pathways_dir = %config.catalog.pathways_dir, "starting pathway-pilot");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
