//! GetConsultationViewHandler - Query handler for the current
//! presentation state of a consultation.

use std::sync::Arc;

use crate::application::view::ConsultationView;
use crate::domain::foundation::{ConsultationId, DomainError, PathwayId};
use crate::ports::{ConsultationRepository, PathwayStore};

/// Query for a consultation's current view.
#[derive(Debug, Clone)]
pub struct GetConsultationViewQuery {
    pub consultation_id: ConsultationId,
}

/// Error type for the view query.
#[derive(Debug, Clone)]
pub enum GetConsultationViewError {
    /// Consultation not found.
    ConsultationNotFound(ConsultationId),
    /// The consultation's pathway vanished from the catalog.
    PathwayNotFound(PathwayId),
    /// Domain error (e.g., storage failure).
    Domain(DomainError),
}

impl std::fmt::Display for GetConsultationViewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetConsultationViewError::ConsultationNotFound(id) => {
                write!(f, "Consultation not found: {}", id)
            }
            GetConsultationViewError::PathwayNotFound(id) => {
                write!(f, "Pathway not found: {}", id)
            }
            GetConsultationViewError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GetConsultationViewError {}

impl From<DomainError> for GetConsultationViewError {
    fn from(err: DomainError) -> Self {
        GetConsultationViewError::Domain(err)
    }
}

/// Handler for the view query.
pub struct GetConsultationViewHandler {
    pathway_store: Arc<dyn PathwayStore>,
    consultations: Arc<dyn ConsultationRepository>,
}

impl GetConsultationViewHandler {
    pub fn new(
        pathway_store: Arc<dyn PathwayStore>,
        consultations: Arc<dyn ConsultationRepository>,
    ) -> Self {
        Self {
            pathway_store,
            consultations,
        }
    }

    pub async fn handle(
        &self,
        query: GetConsultationViewQuery,
    ) -> Result<ConsultationView, GetConsultationViewError> {
        let consultation = self
            .consultations
            .find_by_id(&query.consultation_id)
            .await?
            .ok_or(GetConsultationViewError::ConsultationNotFound(
                query.consultation_id,
            ))?;

        let document = self
            .pathway_store
            .load(consultation.pathway_id())
            .await?
            .ok_or_else(|| {
                GetConsultationViewError::PathwayNotFound(consultation.pathway_id().clone())
            })?;

        Ok(ConsultationView::assemble(&consultation, &document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        two_step_document, InMemoryConsultations, StaticPathwayStore,
    };
    use crate::domain::consultation::{Consultation, PatientContext};
    use crate::domain::foundation::PathwayId;

    #[tokio::test]
    async fn returns_view_for_active_consultation() {
        let store = Arc::new(StaticPathwayStore::with_document(
            "test",
            two_step_document(),
        ));
        let repo = Arc::new(InMemoryConsultations::new());
        let consultation = Consultation::new(
            PathwayId::new("test").unwrap(),
            PatientContext::not_specified(),
        );
        let id = consultation.id();
        repo.insert(consultation);

        let handler = GetConsultationViewHandler::new(store, repo);
        let view = handler
            .handle(GetConsultationViewQuery {
                consultation_id: id,
            })
            .await
            .unwrap();

        assert_eq!(view.consultation_id, id);
        assert!(view.current_node.is_some());
        assert!(!view.concluded);
    }

    #[tokio::test]
    async fn fails_when_consultation_unknown() {
        let store = Arc::new(StaticPathwayStore::empty());
        let repo = Arc::new(InMemoryConsultations::new());
        let handler = GetConsultationViewHandler::new(store, repo);

        let result = handler
            .handle(GetConsultationViewQuery {
                consultation_id: ConsultationId::new(),
            })
            .await;

        assert!(matches!(
            result,
            Err(GetConsultationViewError::ConsultationNotFound(_))
        ));
    }
}
