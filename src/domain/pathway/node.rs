//! Node types for pathway documents.
//!
//! A node is one question, classification, or guidance point in a
//! pathway. Documents are hand-authored, so every field except the
//! identity pair is optional and unknown fields are ignored on input.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::NodeId;

/// One selectable (or informational) entry of a node's `answers` or
/// `options` list.
///
/// An entry without a target node is informational only: it is listed to
/// the clinician but does not continue the traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_node_id: Option<NodeId>,
}

impl AnswerOption {
    /// Returns the target node id, treating an empty id as absent.
    pub fn target(&self) -> Option<&NodeId> {
        self.next_node_id
            .as_ref()
            .filter(|id| !id.as_str().is_empty())
    }
}

/// Explanatory context attached to a question node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl ClinicalInfo {
    /// Flattens the record into the single audit-log string,
    /// `Objective: .. | Evidence level: ..`, omitting absent parts.
    pub fn flatten(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(objective) = &self.objective {
            parts.push(format!("Objective: {}", objective));
        }
        if let Some(evidence) = &self.evidence {
            parts.push(format!("Evidence level: {}", evidence));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

/// A structured treatment protocol.
///
/// The field set is the union of what guideline authors use across
/// protocol kinds (conservative, surgical, rehabilitation phases); any
/// subset may be present on a given record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentProtocol {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anatomical_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surgical_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contraindications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_bearing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progression: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immobilization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rehabilitation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_specifics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indication: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_phase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measures: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objectives: Option<Vec<String>>,
}

/// A therapeutic measure with optional timing and implementation notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TherapeuticMeasure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
}

/// A prevention measure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreventionMeasure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation: Option<String>,
}

/// A critical rule or contraindication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// One node of a pathway document.
///
/// The `kind` tag documents authoring intent (question, classification,
/// recommendation) but does not gate behavior: the classifier inspects
/// structural fields instead, so an inconsistently tagged node still
/// traverses correctly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_info: Option<ClinicalInfo>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerOption>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<AnswerOption>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detailed_recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub treatment_protocols: Vec<TreatmentProtocol>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub therapeutic_measures: Vec<TherapeuticMeasure>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prevention_measures: Vec<PreventionMeasure>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub critical_rules: Vec<CriticalRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub risk_factors: Vec<String>,
}

impl Node {
    /// The prompt to log when the node has no explicit question text.
    pub const FALLBACK_PROMPT: &'static str = "Select an option";

    /// Returns the question text, falling back to the generic prompt.
    pub fn prompt(&self) -> &str {
        self.question.as_deref().unwrap_or(Self::FALLBACK_PROMPT)
    }

    /// Returns the flattened clinical info string, if any.
    pub fn clinical_info_text(&self) -> Option<String> {
        self.clinical_info.as_ref().and_then(ClinicalInfo::flatten)
    }
}
