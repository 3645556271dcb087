//! HTTP DTOs for consultation endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution. Recommendation items are serialized in their
//! domain wire shape (`{"type": ..., "text"|"data": ...}`), which is
//! already the contract the report templates are written against.

use serde::{Deserialize, Serialize};

use crate::application::view::ConsultationView;
use crate::domain::consultation::{Gender, LogEntry, Outcome, PatientContext};
use crate::domain::foundation::ValidationError;
use crate::domain::pathway::{ClinicalInfo, Node, RecommendationItem};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Patient intake block of the create request.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientRequest {
    pub gender: Gender,
    pub age: u32,
    pub weight: u32,
    #[serde(default)]
    pub chronic_diseases: String,
}

impl PatientRequest {
    /// Converts to the validated domain context.
    pub fn into_context(self) -> Result<PatientContext, ValidationError> {
        match self.gender {
            Gender::NotSpecified => Ok(PatientContext::not_specified()),
            gender => PatientContext::new(gender, self.age, self.weight, self.chronic_diseases),
        }
    }
}

/// Request to start a consultation.
///
/// Omitting `patient` skips intake, like the "data not relevant" path of
/// the intake form.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConsultationRequest {
    pub pathway_id: String,
    #[serde(default)]
    pub patient: Option<PatientRequest>,
}

/// Request to apply a choice: exactly one of the two indexes.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    #[serde(default)]
    pub answer: Option<usize>,
    #[serde(default)]
    pub option: Option<usize>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One selectable answer of the presented node.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub text: String,
}

/// One option of the presented node; informational entries are listed
/// but flagged non-selectable.
#[derive(Debug, Clone, Serialize)]
pub struct OptionResponse {
    pub text: String,
    pub selectable: bool,
}

/// Clinical context of the presented node.
#[derive(Debug, Clone, Serialize)]
pub struct ClinicalInfoResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl From<&ClinicalInfo> for ClinicalInfoResponse {
    fn from(info: &ClinicalInfo) -> Self {
        Self {
            objective: info.objective.clone(),
            evidence: info.evidence.clone(),
        }
    }
}

/// The question card to present.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub node_id: String,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_info: Option<ClinicalInfoResponse>,
    pub answers: Vec<AnswerResponse>,
    pub options: Vec<OptionResponse>,
}

impl QuestionResponse {
    fn from_node(node_id: String, node: &Node) -> Self {
        Self {
            node_id,
            question: node.prompt().to_string(),
            source_reference: node.source_reference.clone(),
            clinical_info: node.clinical_info.as_ref().map(ClinicalInfoResponse::from),
            answers: node
                .answers
                .iter()
                .map(|a| AnswerResponse {
                    text: a.text.clone(),
                })
                .collect(),
            options: node
                .options
                .iter()
                .map(|o| OptionResponse {
                    text: o.text.clone(),
                    selectable: o.target().is_some(),
                })
                .collect(),
        }
    }
}

/// How the consultation concluded.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeResponse {
    pub kind: String,
    pub recommendations: Vec<RecommendationItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_node_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&Outcome> for OutcomeResponse {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Guidance { recommendations } => Self {
                kind: "guidance".to_string(),
                recommendations: recommendations.clone(),
                missing_node_id: None,
                message: None,
            },
            Outcome::NoGuidance => Self {
                kind: "no_guidance".to_string(),
                recommendations: Vec::new(),
                missing_node_id: None,
                message: Some("Diagnostics complete. No recommendations found.".to_string()),
            },
            Outcome::DanglingReference { missing } => Self {
                kind: "dangling_reference".to_string(),
                recommendations: Vec::new(),
                missing_node_id: Some(missing.to_string()),
                message: Some(format!(
                    "Diagnostics ended: node \"{}\" is not present in the pathway data.",
                    missing
                )),
            },
            Outcome::MissingNode { missing } => Self {
                kind: "missing_node".to_string(),
                recommendations: Vec::new(),
                missing_node_id: Some(missing.to_string()),
                message: Some(format!(
                    "Diagnostics ended: current node \"{}\" could not be resolved.",
                    missing
                )),
            },
        }
    }
}

/// One audit-trail entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntryResponse {
    pub step: u32,
    pub question: String,
    pub answer: String,
    pub timestamp: String,
    pub node_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinical_info: Option<String>,
}

impl From<&LogEntry> for LogEntryResponse {
    fn from(entry: &LogEntry) -> Self {
        Self {
            step: entry.step,
            question: entry.question.clone(),
            answer: entry.answer.clone(),
            timestamp: entry.timestamp.to_rfc3339(),
            node_id: entry.node_id.to_string(),
            source_reference: entry.source_reference.clone(),
            clinical_info: entry.clinical_info.clone(),
        }
    }
}

/// Full consultation state for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ConsultationResponse {
    pub consultation_id: String,
    pub pathway_id: String,
    pub pathway_title: String,
    pub step: u32,
    pub can_go_back: bool,
    pub concluded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<OutcomeResponse>,
    pub log: Vec<LogEntryResponse>,
}

impl From<ConsultationView> for ConsultationResponse {
    fn from(view: ConsultationView) -> Self {
        let question = if view.concluded {
            None
        } else {
            view.current_node
                .as_ref()
                .map(|node| QuestionResponse::from_node(view.current_node_id.to_string(), node))
        };
        Self {
            consultation_id: view.consultation_id.to_string(),
            pathway_id: view.pathway_id.to_string(),
            pathway_title: view.pathway_title,
            step: view.step,
            can_go_back: view.can_go_back,
            concluded: view.concluded,
            question,
            outcome: view.outcome.as_ref().map(OutcomeResponse::from),
            log: view.log.iter().map(LogEntryResponse::from).collect(),
        }
    }
}
