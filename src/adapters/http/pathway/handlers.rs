//! HTTP handlers for pathway catalog endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::adapters::http::error::domain_error_response;
use crate::application::handlers::{ListPathwaysError, ListPathwaysHandler};

use super::dto::{PathwayListResponse, PathwaySummaryResponse};

/// State for the pathway router.
#[derive(Clone)]
pub struct PathwayHandlers {
    list_handler: Arc<ListPathwaysHandler>,
}

impl PathwayHandlers {
    pub fn new(list_handler: Arc<ListPathwaysHandler>) -> Self {
        Self { list_handler }
    }
}

/// GET /api/pathways - List the available pathways
pub async fn list_pathways(State(handlers): State<PathwayHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(summaries) => {
            let response = PathwayListResponse {
                pathways: summaries
                    .into_iter()
                    .map(PathwaySummaryResponse::from)
                    .collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(ListPathwaysError::Domain(err)) => domain_error_response(&err),
    }
}
