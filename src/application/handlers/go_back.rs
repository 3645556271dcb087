//! GoBackHandler - Command handler for stepping back one question.

use std::sync::Arc;

use crate::application::view::ConsultationView;
use crate::domain::foundation::{ConsultationId, DomainError, PathwayId};
use crate::ports::{ConsultationRepository, PathwayStore};

/// Command to step back to the previous question.
#[derive(Debug, Clone)]
pub struct GoBackCommand {
    pub consultation_id: ConsultationId,
}

/// Result of a successful step back.
#[derive(Debug)]
pub struct GoBackResult {
    pub view: ConsultationView,
}

/// Error type for stepping back.
#[derive(Debug, Clone)]
pub enum GoBackError {
    /// Consultation not found.
    ConsultationNotFound(ConsultationId),
    /// The consultation's pathway vanished from the catalog.
    PathwayNotFound(PathwayId),
    /// Domain error (e.g., already at the first step).
    Domain(DomainError),
}

impl std::fmt::Display for GoBackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoBackError::ConsultationNotFound(id) => write!(f, "Consultation not found: {}", id),
            GoBackError::PathwayNotFound(id) => write!(f, "Pathway not found: {}", id),
            GoBackError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GoBackError {}

impl From<DomainError> for GoBackError {
    fn from(err: DomainError) -> Self {
        GoBackError::Domain(err)
    }
}

/// Handler for stepping back.
pub struct GoBackHandler {
    pathway_store: Arc<dyn PathwayStore>,
    consultations: Arc<dyn ConsultationRepository>,
}

impl GoBackHandler {
    pub fn new(
        pathway_store: Arc<dyn PathwayStore>,
        consultations: Arc<dyn ConsultationRepository>,
    ) -> Self {
        Self {
            pathway_store,
            consultations,
        }
    }

    pub async fn handle(&self, cmd: GoBackCommand) -> Result<GoBackResult, GoBackError> {
        // 1. Find the consultation
        let mut consultation = self
            .consultations
            .find_by_id(&cmd.consultation_id)
            .await?
            .ok_or(GoBackError::ConsultationNotFound(cmd.consultation_id))?;

        // 2. Step back (rejected at the root)
        consultation.back()?;

        // 3. Persist and assemble the view
        self.consultations.update(&consultation).await?;

        let document = self
            .pathway_store
            .load(consultation.pathway_id())
            .await?
            .ok_or_else(|| GoBackError::PathwayNotFound(consultation.pathway_id().clone()))?;

        Ok(GoBackResult {
            view: ConsultationView::assemble(&consultation, &document),
        })
    }
}
