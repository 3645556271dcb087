//! AbandonConsultationHandler - Command handler for discarding a
//! consultation when the user exits to the selection screen.
//!
//! The engine holds no external resources, so abandoning is a plain
//! delete with no teardown protocol.

use std::sync::Arc;

use crate::domain::foundation::{ConsultationId, DomainError};
use crate::ports::ConsultationRepository;

/// Command to abandon a consultation.
#[derive(Debug, Clone)]
pub struct AbandonConsultationCommand {
    pub consultation_id: ConsultationId,
}

/// Error type for abandoning a consultation.
#[derive(Debug, Clone)]
pub enum AbandonConsultationError {
    /// Consultation not found.
    ConsultationNotFound(ConsultationId),
    /// Domain error (e.g., storage failure).
    Domain(DomainError),
}

impl std::fmt::Display for AbandonConsultationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbandonConsultationError::ConsultationNotFound(id) => {
                write!(f, "Consultation not found: {}", id)
            }
            AbandonConsultationError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AbandonConsultationError {}

impl From<DomainError> for AbandonConsultationError {
    fn from(err: DomainError) -> Self {
        AbandonConsultationError::Domain(err)
    }
}

/// Handler for abandoning consultations.
pub struct AbandonConsultationHandler {
    consultations: Arc<dyn ConsultationRepository>,
}

impl AbandonConsultationHandler {
    pub fn new(consultations: Arc<dyn ConsultationRepository>) -> Self {
        Self { consultations }
    }

    pub async fn handle(
        &self,
        cmd: AbandonConsultationCommand,
    ) -> Result<(), AbandonConsultationError> {
        let existing = self
            .consultations
            .find_by_id(&cmd.consultation_id)
            .await?;
        if existing.is_none() {
            return Err(AbandonConsultationError::ConsultationNotFound(
                cmd.consultation_id,
            ));
        }

        self.consultations.delete(&cmd.consultation_id).await?;
        Ok(())
    }
}
