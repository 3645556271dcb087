//! StartConsultationHandler - Command handler for starting a consultation.
//!
//! A consultation is constructed only once its pathway document is fully
//! loaded; the aggregate then traverses the immutable document without
//! any further I/O.

use std::sync::Arc;

use crate::application::view::ConsultationView;
use crate::domain::consultation::{Consultation, PatientContext};
use crate::domain::foundation::{DomainError, PathwayId};
use crate::ports::{ConsultationRepository, PathwayStore};

/// Command to start a consultation on a pathway.
#[derive(Debug, Clone)]
pub struct StartConsultationCommand {
    /// The pathway to traverse.
    pub pathway_id: PathwayId,
    /// Patient intake data, or the "not specified" sentinel.
    pub patient: PatientContext,
}

/// Result of a successful start.
#[derive(Debug)]
pub struct StartConsultationResult {
    pub view: ConsultationView,
}

/// Error type for starting a consultation.
#[derive(Debug, Clone)]
pub enum StartConsultationError {
    /// The catalog has no pathway with this id.
    PathwayNotFound(PathwayId),
    /// Domain error (e.g., storage failure).
    Domain(DomainError),
}

impl std::fmt::Display for StartConsultationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartConsultationError::PathwayNotFound(id) => write!(f, "Pathway not found: {}", id),
            StartConsultationError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for StartConsultationError {}

impl From<DomainError> for StartConsultationError {
    fn from(err: DomainError) -> Self {
        StartConsultationError::Domain(err)
    }
}

/// Handler for starting consultations.
pub struct StartConsultationHandler {
    pathway_store: Arc<dyn PathwayStore>,
    consultations: Arc<dyn ConsultationRepository>,
}

impl StartConsultationHandler {
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
        cmd: StartConsultationCommand,
    ) -> Result<StartConsultationResult, StartConsultationError> {
        // 1. Acquire the document
        let document = self
            .pathway_store
            .load(&cmd.pathway_id)
            .await?
            .ok_or_else(|| StartConsultationError::PathwayNotFound(cmd.pathway_id.clone()))?;

        // 2. Construct the aggregate at the root
        let consultation = Consultation::new(cmd.pathway_id, cmd.patient);

        // 3. Persist
        self.consultations.save(&consultation).await?;

        Ok(StartConsultationResult {
            view: ConsultationView::assemble(&consultation, &document),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{InMemoryConsultations, StaticPathwayStore};
    use crate::domain::pathway::{AnswerOption, Node, PathwayDocument, PathwayMetadata};
    use crate::domain::foundation::NodeId;

    fn test_document() -> PathwayDocument {
        PathwayDocument {
            metadata: PathwayMetadata {
                title: "Ankle fractures".to_string(),
                ..PathwayMetadata::default()
            },
            root: Node {
                id: "root".to_string(),
                kind: "question".to_string(),
                question: Some("Q1".to_string()),
                answers: vec![AnswerOption {
                    text: "Yes".to_string(),
                    next_node_id: Some(NodeId::new("n1")),
                }],
                ..Node::default()
            },
            nodes: Default::default(),
        }
    }

    #[tokio::test]
    async fn starts_at_root_and_persists() {
        let store = Arc::new(StaticPathwayStore::with_document("ankle", test_document()));
        let repo = Arc::new(InMemoryConsultations::new());
        let handler = StartConsultationHandler::new(store, repo.clone());

        let result = handler
            .handle(StartConsultationCommand {
                pathway_id: PathwayId::new("ankle").unwrap(),
                patient: PatientContext::not_specified(),
            })
            .await
            .unwrap();

        assert_eq!(result.view.pathway_title, "Ankle fractures");
        assert_eq!(result.view.step, 1);
        assert!(result.view.current_node_id.is_root());
        assert!(repo.get(&result.view.consultation_id).is_some());
    }

    #[tokio::test]
    async fn fails_when_pathway_unknown() {
        let store = Arc::new(StaticPathwayStore::empty());
        let repo = Arc::new(InMemoryConsultations::new());
        let handler = StartConsultationHandler::new(store, repo.clone());

        let result = handler
            .handle(StartConsultationCommand {
                pathway_id: PathwayId::new("missing").unwrap(),
                patient: PatientContext::not_specified(),
            })
            .await;

        assert!(matches!(
            result,
            Err(StartConsultationError::PathwayNotFound(_))
        ));
        assert!(repo.is_empty());
    }
}
