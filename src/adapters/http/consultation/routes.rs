//! HTTP routes for consultation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    abandon_consultation, answer_question, create_consultation, download_report, get_consultation,
    go_back, restart_consultation, ConsultationHandlers,
};

/// Creates the consultation router with all endpoints.
pub fn consultation_routes(handlers: ConsultationHandlers) -> Router {
    Router::new()
        .route("/", post(create_consultation))
        .route("/:id", get(get_consultation).delete(abandon_consultation))
        .route("/:id/answer", post(answer_question))
        .route("/:id/back", post(go_back))
        .route("/:id/restart", post(restart_consultation))
        .route("/:id/report", get(download_report))
        .with_state(handlers)
}
