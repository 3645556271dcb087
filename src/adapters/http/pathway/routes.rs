//! HTTP routes for pathway catalog endpoints.

use axum::{routing::get, Router};

use super::handlers::{list_pathways, PathwayHandlers};

/// Creates the pathway router.
pub fn pathway_routes(handlers: PathwayHandlers) -> Router {
    Router::new()
        .route("/", get(list_pathways))
        .with_state(handlers)
}
