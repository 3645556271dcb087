//! Pathway store port (read side).
//!
//! Defines the contract for the pathway catalog: listing the documents
//! available for selection and loading one by id. The engine itself
//! never performs I/O; a document is acquired once, before a
//! consultation is constructed.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PathwayId};
use crate::domain::pathway::PathwayDocument;

/// Catalog entry shown on the selection screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwaySummary {
    pub id: PathwayId,
    pub title: String,
    pub description: Option<String>,
}

/// Port for acquiring pathway documents.
///
/// Implementations own the storage format and location; documents are
/// returned fully parsed and are treated as immutable afterwards.
#[async_trait]
pub trait PathwayStore: Send + Sync {
    /// Lists the available pathways, in catalog order.
    async fn list(&self) -> Result<Vec<PathwaySummary>, DomainError>;

    /// Loads a pathway document by id.
    ///
    /// Returns `None` if the catalog has no such pathway.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the document exists but cannot be read or parsed
    async fn load(&self, id: &PathwayId) -> Result<Option<PathwayDocument>, DomainError>;
}
