//! Read model assembled for the presentation layer.

use crate::domain::consultation::{Consultation, LogEntry, Outcome};
use crate::domain::foundation::{ConsultationId, NodeId, PathwayId};
use crate::domain::pathway::{Node, PathwayDocument};

/// Snapshot of a consultation for presentation: the node to present,
/// navigability flags, the audit log, and the outcome once concluded.
#[derive(Debug, Clone)]
pub struct ConsultationView {
    pub consultation_id: ConsultationId,
    pub pathway_id: PathwayId,
    pub pathway_title: String,
    pub current_node_id: NodeId,
    /// The node to present; `None` only if the cursor fails to resolve.
    pub current_node: Option<Node>,
    pub step: u32,
    pub can_go_back: bool,
    pub concluded: bool,
    pub outcome: Option<Outcome>,
    pub log: Vec<LogEntry>,
}

impl ConsultationView {
    /// Assembles the view from the aggregate and its document.
    pub fn assemble(consultation: &Consultation, document: &PathwayDocument) -> Self {
        Self {
            consultation_id: consultation.id(),
            pathway_id: consultation.pathway_id().clone(),
            pathway_title: document.metadata.title.clone(),
            current_node_id: consultation.current_node_id().clone(),
            current_node: document.resolve(consultation.current_node_id()).cloned(),
            step: consultation.step(),
            can_go_back: consultation.can_go_back(),
            concluded: consultation.is_concluded(),
            outcome: consultation.outcome().cloned(),
            log: consultation.log().to_vec(),
        }
    }
}
