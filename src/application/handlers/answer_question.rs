//! AnswerQuestionHandler - Command handler for applying a user's choice.
//!
//! The client selects by index into the lists it was presented; the
//! handler resolves the index against the current node and delegates the
//! transition to the aggregate.

use std::sync::Arc;

use crate::application::view::ConsultationView;
use crate::domain::consultation::{Progress, Selection};
use crate::domain::foundation::{ConsultationId, DomainError, ErrorCode, PathwayId};
use crate::ports::{ConsultationRepository, PathwayStore};

/// Which presented entry was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceSelector {
    /// Index into the current node's `answers` list.
    Answer(usize),
    /// Index into the current node's `options` list.
    Option(usize),
}

/// Command to apply a choice to a consultation.
#[derive(Debug, Clone)]
pub struct AnswerQuestionCommand {
    pub consultation_id: ConsultationId,
    pub choice: ChoiceSelector,
}

/// Result of a successful choice.
#[derive(Debug)]
pub struct AnswerQuestionResult {
    /// What the choice did: advanced, noted, or concluded.
    pub progress: Progress,
    pub view: ConsultationView,
}

/// Error type for answering a question.
#[derive(Debug, Clone)]
pub enum AnswerQuestionError {
    /// Consultation not found.
    ConsultationNotFound(ConsultationId),
    /// The consultation's pathway vanished from the catalog.
    PathwayNotFound(PathwayId),
    /// The index does not name a presented answer or option.
    SelectionNotFound,
    /// Domain error (e.g., consultation already concluded).
    Domain(DomainError),
}

impl std::fmt::Display for AnswerQuestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerQuestionError::ConsultationNotFound(id) => {
                write!(f, "Consultation not found: {}", id)
            }
            AnswerQuestionError::PathwayNotFound(id) => write!(f, "Pathway not found: {}", id),
            AnswerQuestionError::SelectionNotFound => {
                write!(f, "Selected answer or option does not exist")
            }
            AnswerQuestionError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AnswerQuestionError {}

impl From<DomainError> for AnswerQuestionError {
    fn from(err: DomainError) -> Self {
        AnswerQuestionError::Domain(err)
    }
}

/// Handler for applying choices.
pub struct AnswerQuestionHandler {
    pathway_store: Arc<dyn PathwayStore>,
    consultations: Arc<dyn ConsultationRepository>,
}

impl AnswerQuestionHandler {
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
        cmd: AnswerQuestionCommand,
    ) -> Result<AnswerQuestionResult, AnswerQuestionError> {
        // 1. Find the consultation and its document
        let mut consultation = self
            .consultations
            .find_by_id(&cmd.consultation_id)
            .await?
            .ok_or(AnswerQuestionError::ConsultationNotFound(
                cmd.consultation_id,
            ))?;

        let document = self
            .pathway_store
            .load(consultation.pathway_id())
            .await?
            .ok_or_else(|| {
                AnswerQuestionError::PathwayNotFound(consultation.pathway_id().clone())
            })?;

        // 2. Resolve the chosen entry against the current node
        let current = document.resolve(consultation.current_node_id()).ok_or_else(|| {
            DomainError::new(
                ErrorCode::NodeNotFound,
                format!(
                    "Current node '{}' is missing from the pathway",
                    consultation.current_node_id()
                ),
            )
        })?;

        let entry = match cmd.choice {
            ChoiceSelector::Answer(index) => current.answers.get(index),
            ChoiceSelector::Option(index) => current.options.get(index),
        }
        .ok_or(AnswerQuestionError::SelectionNotFound)?;
        let selection = Selection::from(entry);

        // 3. Apply the transition (domain logic owns the policy)
        let progress = consultation.choose(&document, &selection)?;

        // 4. Persist the updated consultation
        self.consultations.update(&consultation).await?;

        Ok(AnswerQuestionResult {
            progress,
            view: ConsultationView::assemble(&consultation, &document),
        })
    }
}
