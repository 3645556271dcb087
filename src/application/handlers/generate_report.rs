//! GenerateReportHandler - Query handler for the downloadable report.
//!
//! Valid only once the consultation has concluded: the report is the
//! final artifact of a finished traversal, not a progress snapshot.

use std::sync::Arc;

use crate::domain::consultation::render_report;
use crate::domain::foundation::{ConsultationId, DomainError, PathwayId, Timestamp};
use crate::ports::{ConsultationRepository, PathwayStore};

/// Query for a consultation's report.
#[derive(Debug, Clone)]
pub struct GenerateReportQuery {
    pub consultation_id: ConsultationId,
}

/// The rendered report and its suggested download filename.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub filename: String,
    pub content: String,
}

/// Error type for report generation.
#[derive(Debug, Clone)]
pub enum GenerateReportError {
    /// Consultation not found.
    ConsultationNotFound(ConsultationId),
    /// The consultation's pathway vanished from the catalog.
    PathwayNotFound(PathwayId),
    /// The consultation has not concluded yet.
    NotConcluded(ConsultationId),
    /// Domain error (e.g., storage failure).
    Domain(DomainError),
}

impl std::fmt::Display for GenerateReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateReportError::ConsultationNotFound(id) => {
                write!(f, "Consultation not found: {}", id)
            }
            GenerateReportError::PathwayNotFound(id) => write!(f, "Pathway not found: {}", id),
            GenerateReportError::NotConcluded(id) => {
                write!(f, "Consultation {} has not concluded yet", id)
            }
            GenerateReportError::Domain(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GenerateReportError {}

impl From<DomainError> for GenerateReportError {
    fn from(err: DomainError) -> Self {
        GenerateReportError::Domain(err)
    }
}

/// Handler for report generation.
pub struct GenerateReportHandler {
    pathway_store: Arc<dyn PathwayStore>,
    consultations: Arc<dyn ConsultationRepository>,
}

impl GenerateReportHandler {
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
        query: GenerateReportQuery,
    ) -> Result<GeneratedReport, GenerateReportError> {
        // 1. Find the consultation and require a conclusion
        let consultation = self
            .consultations
            .find_by_id(&query.consultation_id)
            .await?
            .ok_or(GenerateReportError::ConsultationNotFound(
                query.consultation_id,
            ))?;

        let outcome = consultation
            .outcome()
            .ok_or(GenerateReportError::NotConcluded(query.consultation_id))?;

        // 2. Load the document for its metadata
        let document = self
            .pathway_store
            .load(consultation.pathway_id())
            .await?
            .ok_or_else(|| {
                GenerateReportError::PathwayNotFound(consultation.pathway_id().clone())
            })?;

        // 3. Render with the generation timestamp stamped here, at the
        //    serialization boundary
        let generated_at = Timestamp::now();
        let content = render_report(
            &document.metadata,
            consultation.patient(),
            consultation.log(),
            Some(outcome),
            generated_at,
        );

        Ok(GeneratedReport {
            filename: report_filename(&document.metadata.title, generated_at),
            content,
        })
    }
}

/// Derives the suggested download filename:
/// `report_<title-with-underscores>_<YYYY-MM-DD>.txt`.
fn report_filename(title: &str, generated_at: Timestamp) -> String {
    let slug: String = title.split_whitespace().collect::<Vec<_>>().join("_");
    format!("report_{}_{}.txt", slug, generated_at.date_string())
}
