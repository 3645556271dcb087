//! HTTP DTOs for pathway catalog endpoints.

use serde::Serialize;

use crate::ports::PathwaySummary;

/// One selectable pathway on the selection screen.
#[derive(Debug, Clone, Serialize)]
pub struct PathwaySummaryResponse {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<PathwaySummary> for PathwaySummaryResponse {
    fn from(summary: PathwaySummary) -> Self {
        Self {
            id: summary.id.to_string(),
            title: summary.title,
            description: summary.description,
        }
    }
}

/// Response for the catalog listing.
#[derive(Debug, Clone, Serialize)]
pub struct PathwayListResponse {
    pub pathways: Vec<PathwaySummaryResponse>,
}
