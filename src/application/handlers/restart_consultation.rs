//! RestartConsultationHandler - Command handler for restarting a
//! traversal from the root.
//!
//! Restart keeps the pathway document and the patient context; only the
//! traversal state is reset.

use std::sync::Arc;

use crate::application::view::ConsultationView;
use crate::domain::foundation::{ConsultationId, DomainError, PathwayId};
use crate::ports::{ConsultationRepository, PathwayStore};

/// Command to restart a consultation.
#[derive(Debug, Clone)]
pub struct RestartConsultationCommand {
    pub consultation_id: ConsultationId,
}

/// Result of a successful restart.
#[derive(Debug)]
pub struct RestartConsultationResult {
    pub view: ConsultationView,
}

/// Error type for restarting a consultation.
#[derive(Debug, Clone)]
pub enum RestartConsultationError {
    /// Consultation not found.
    ConsultationNotFound(ConsultationId),
    /// The consultation's pathway vanished from the catalog.
    PathwayNotFound(PathwayId),
    /// Domain error (e.g., storage failure).
    Domain(DomainError),
}

impl std::fmt::Display for RestartConsultationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestartConsultationError::ConsultationNotFound(id) => {
                write!(f, "Consultation not found: {}", id)
            }
            RestartConsultationError::PathwayNotFound(id) => {
                write!(f, "Pathway not found: {}", id)
            }
            RestartConsultationError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for RestartConsultationError {}

impl From<DomainError> for RestartConsultationError {
    fn from(err: DomainError) -> Self {
        RestartConsultationError::Domain(err)
    }
}

/// Handler for restarting consultations.
pub struct RestartConsultationHandler {
    pathway_store: Arc<dyn PathwayStore>,
    consultations: Arc<dyn ConsultationRepository>,
}

impl RestartConsultationHandler {
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
        cmd: RestartConsultationCommand,
    ) -> Result<RestartConsultationResult, RestartConsultationError> {
        // 1. Find the consultation
        let mut consultation = self
            .consultations
            .find_by_id(&cmd.consultation_id)
            .await?
            .ok_or(RestartConsultationError::ConsultationNotFound(
                cmd.consultation_id,
            ))?;

        // 2. Reset the traversal
        consultation.restart();

        // 3. Persist and assemble the view
        self.consultations.update(&consultation).await?;

        let document = self
            .pathway_store
            .load(consultation.pathway_id())
            .await?
            .ok_or_else(|| {
                RestartConsultationError::PathwayNotFound(consultation.pathway_id().clone())
            })?;

        Ok(RestartConsultationResult {
            view: ConsultationView::assemble(&consultation, &document),
        })
    }
}
