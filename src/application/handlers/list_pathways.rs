//! ListPathwaysHandler - Query handler for the pathway selection screen.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::{PathwayStore, PathwaySummary};

/// Error type for listing pathways.
#[derive(Debug, Clone)]
pub enum ListPathwaysError {
    /// Domain error (e.g., catalog read failure).
    Domain(DomainError),
}

impl std::fmt::Display for ListPathwaysError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListPathwaysError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ListPathwaysError {}

impl From<DomainError> for ListPathwaysError {
    fn from(err: DomainError) -> Self {
        ListPathwaysError::Domain(err)
    }
}

/// Handler for the catalog listing.
pub struct ListPathwaysHandler {
    pathway_store: Arc<dyn PathwayStore>,
}

impl ListPathwaysHandler {
    pub fn new(pathway_store: Arc<dyn PathwayStore>) -> Self {
        Self { pathway_store }
    }

    pub async fn handle(&self) -> Result<Vec<PathwaySummary>, ListPathwaysError> {
        Ok(self.pathway_store.list().await?)
    }
}
