//! HTTP adapters - the REST surface over the consultation engine.
//!
//! Each module has its own `dto`/`handlers`/`routes` triple; this module
//! assembles them into the API router.

use axum::{routing::get, Router};

pub mod consultation;
pub mod error;
pub mod pathway;

pub use consultation::{consultation_routes, ConsultationHandlers};
pub use error::ErrorResponse;
pub use pathway::{pathway_routes, PathwayHandlers};

/// Assembles the full API router.
pub fn api_router(
    pathway_handlers: PathwayHandlers,
    consultation_handlers: ConsultationHandlers,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/pathways", pathway_routes(pathway_handlers))
        .nest(
            "/api/consultations",
            consultation_routes(consultation_handlers),
        )
}

/// GET /health - liveness probe
async fn health() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::InMemoryConsultationRepository;
    use crate::application::handlers::test_support::{two_step_document, StaticPathwayStore};
    use crate::application::handlers::{
        AbandonConsultationHandler, AnswerQuestionHandler, GenerateReportHandler,
        GetConsultationViewHandler, GoBackHandler, ListPathwaysHandler,
        RestartConsultationHandler, StartConsultationHandler,
    };
    use crate::domain::foundation::ConsultationId;
    use crate::ports::{ConsultationRepository, PathwayStore};

    use super::*;

    fn app() -> Router {
        let store: Arc<dyn PathwayStore> =
            Arc::new(StaticPathwayStore::with_document("test", two_step_document()));
        let repo: Arc<dyn ConsultationRepository> = Arc::new(InMemoryConsultationRepository::new());

        let pathway_handlers =
            PathwayHandlers::new(Arc::new(ListPathwaysHandler::new(store.clone())));
        let consultation_handlers = ConsultationHandlers::new(
            Arc::new(StartConsultationHandler::new(store.clone(), repo.clone())),
            Arc::new(AnswerQuestionHandler::new(store.clone(), repo.clone())),
            Arc::new(GoBackHandler::new(store.clone(), repo.clone())),
            Arc::new(RestartConsultationHandler::new(store.clone(), repo.clone())),
            Arc::new(GetConsultationViewHandler::new(store.clone(), repo.clone())),
            Arc::new(GenerateReportHandler::new(store.clone(), repo.clone())),
            Arc::new(AbandonConsultationHandler::new(repo.clone())),
        );

        api_router(pathway_handlers, consultation_handlers)
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_responds_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn pathway_listing_responds_ok() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/pathways")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn starting_a_consultation_responds_created() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/api/consultations",
                r#"{"pathway_id": "test"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn starting_with_unknown_pathway_is_not_found() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/api/consultations",
                r#"{"pathway_id": "nope"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn starting_with_invalid_patient_is_bad_request() {
        let body = r#"{
            "pathway_id": "test",
            "patient": {"gender": "male", "age": 300, "weight": 70}
        }"#;
        let response = app()
            .oneshot(json_request("POST", "/api/consultations", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_consultation_is_not_found() {
        let uri = format!("/api/consultations/{}/back", ConsultationId::new());
        let response = app()
            .oneshot(json_request("POST", &uri, "{}"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_consultation_id_is_bad_request() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/consultations/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
