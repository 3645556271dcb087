//! Consultation aggregate - the traversal state machine.
//!
//! A consultation owns the cursor into a pathway document, the ordered
//! history of visited nodes, and the audit log of choices. The pathway
//! document itself is not owned: it is immutable, shared, and passed
//! into each operation, so any number of consultations can traverse the
//! same document concurrently, each with its own state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ConsultationId, DomainError, ErrorCode, NodeId, PathwayId, Timestamp,
};
use crate::domain::pathway::{
    classifier, collect_recommendations, AnswerOption, Node, PathwayDocument, RecommendationItem,
};

use super::{LogEntry, PatientContext};

/// A user's choice: the text that was selected and, for traversable
/// entries, the node it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub text: String,
    pub next_node_id: Option<NodeId>,
}

impl Selection {
    /// Returns the target node id, treating an empty id as absent.
    pub fn target(&self) -> Option<&NodeId> {
        self.next_node_id
            .as_ref()
            .filter(|id| !id.as_str().is_empty())
    }
}

impl From<&AnswerOption> for Selection {
    fn from(entry: &AnswerOption) -> Self {
        Self {
            text: entry.text.clone(),
            next_node_id: entry.next_node_id.clone(),
        }
    }
}

/// How a traversal concluded.
///
/// Guidance and no-guidance conclusions are regular outcomes; the
/// reference errors are terminal-like but tagged as errors, so the
/// report and the UI can distinguish a finished pathway from a broken
/// one. All of them are recoverable: `back()` and `restart()` clear the
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// A terminal node emitted at least one recommendation item.
    Guidance {
        recommendations: Vec<RecommendationItem>,
    },
    /// The pathway ended without recommendations: a dead-end node, or a
    /// terminal node whose guidance fields yielded nothing.
    NoGuidance,
    /// A chosen answer named a node absent from the document.
    DanglingReference { missing: NodeId },
    /// The current node id itself failed to resolve.
    MissingNode { missing: NodeId },
}

impl Outcome {
    /// Returns true for the reference-error conclusions.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Outcome::DanglingReference { .. } | Outcome::MissingNode { .. }
        )
    }

    /// Returns the collected recommendation items, empty for every
    /// non-guidance outcome.
    pub fn recommendations(&self) -> &[RecommendationItem] {
        match self {
            Outcome::Guidance { recommendations } => recommendations,
            _ => &[],
        }
    }
}

/// The immediate effect of a `choose` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The cursor advanced to another question node.
    Advanced { to: NodeId },
    /// The selection was informational: logged, cursor unchanged.
    Noted,
    /// The traversal concluded; see [`Consultation::outcome`].
    Concluded,
}

/// The consultation aggregate root.
#[derive(Debug, Clone)]
pub struct Consultation {
    id: ConsultationId,
    pathway_id: PathwayId,
    patient: PatientContext,
    current_node_id: NodeId,
    history: Vec<NodeId>,
    log: Vec<LogEntry>,
    outcome: Option<Outcome>,
    started_at: Timestamp,
    updated_at: Timestamp,
}

impl Consultation {
    /// Starts a new consultation at the pathway's root node.
    pub fn new(pathway_id: PathwayId, patient: PatientContext) -> Self {
        let now = Timestamp::now();
        Self {
            id: ConsultationId::new(),
            pathway_id,
            patient,
            current_node_id: NodeId::root(),
            history: vec![NodeId::root()],
            log: Vec::new(),
            outcome: None,
            started_at: now,
            updated_at: now,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> ConsultationId {
        self.id
    }

    pub fn pathway_id(&self) -> &PathwayId {
        &self.pathway_id
    }

    pub fn patient(&self) -> &PatientContext {
        &self.patient
    }

    /// The node currently presented. While concluded this stays at the
    /// last question node, never at an unresolvable id.
    pub fn current_node_id(&self) -> &NodeId {
        &self.current_node_id
    }

    /// Visited node ids, earliest first, always starting at the root.
    pub fn history(&self) -> &[NodeId] {
        &self.history
    }

    /// The audit log, one entry per choice.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// The conclusion, if the traversal has reached one.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn is_concluded(&self) -> bool {
        self.outcome.is_some()
    }

    /// 1-based step number of the current position.
    pub fn step(&self) -> u32 {
        self.history.len() as u32
    }

    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    // ───────────────────────────────────────────────────────────────
    // State transitions
    // ───────────────────────────────────────────────────────────────

    /// Applies a user's choice to the traversal.
    ///
    /// The choice is logged against the *current* node before any state
    /// changes, so the transition-causing selection is always part of
    /// the audit trail. The destination is then classified: a question
    /// node advances the cursor, a terminal node concludes with
    /// collected guidance, a dead end concludes with the explicit
    /// no-guidance outcome, and an unresolvable target concludes with a
    /// dangling-reference error.
    pub fn choose(
        &mut self,
        document: &PathwayDocument,
        selection: &Selection,
    ) -> Result<Progress, DomainError> {
        if self.is_concluded() {
            return Err(DomainError::new(
                ErrorCode::ConsultationConcluded,
                "Consultation has already concluded; go back or restart first",
            ));
        }

        let current = match document.resolve(&self.current_node_id) {
            Some(node) => node,
            None => {
                // Defensive: the cursor should always resolve. Handled
                // like a dangling reference rather than a crash.
                self.outcome = Some(Outcome::MissingNode {
                    missing: self.current_node_id.clone(),
                });
                self.updated_at = Timestamp::now();
                return Ok(Progress::Concluded);
            }
        };

        self.log.push(LogEntry {
            step: self.log.len() as u32 + 1,
            question: current.prompt().to_string(),
            answer: selection.text.clone(),
            timestamp: Timestamp::now(),
            node_id: self.current_node_id.clone(),
            source_reference: current.source_reference.clone(),
            clinical_info: current.clinical_info_text(),
        });
        self.updated_at = Timestamp::now();

        let target = match selection.target() {
            Some(target) => target.clone(),
            None => {
                // Target-less selection: conclude if the current node is
                // itself terminal, otherwise record it and stay put.
                if classifier::is_terminal(current) {
                    self.conclude_at(current);
                    return Ok(Progress::Concluded);
                }
                return Ok(Progress::Noted);
            }
        };

        // The chosen id joins the history before resolution, so back()
        // uniformly truncates one step regardless of what it led to.
        self.history.push(target.clone());

        let destination = match document.resolve(&target) {
            Some(node) => node,
            None => {
                self.outcome = Some(Outcome::DanglingReference { missing: target });
                return Ok(Progress::Concluded);
            }
        };

        match classifier::classify(destination) {
            classifier::NodeRole::Question => {
                self.current_node_id = target.clone();
                Ok(Progress::Advanced { to: target })
            }
            classifier::NodeRole::Terminal => {
                self.conclude_at(destination);
                Ok(Progress::Concluded)
            }
            classifier::NodeRole::DeadEnd => {
                self.outcome = Some(Outcome::NoGuidance);
                Ok(Progress::Concluded)
            }
        }
    }

    /// Steps back to the previous question.
    ///
    /// History and log shrink in lock-step (a pure truncation of both
    /// sequences), the cursor moves to the new last history entry, and
    /// any conclusion is cleared. Rejected at the root.
    pub fn back(&mut self) -> Result<(), DomainError> {
        if self.history.len() <= 1 {
            return Err(DomainError::new(
                ErrorCode::AlreadyAtStart,
                "Cannot go back from the first step",
            ));
        }

        self.history.pop();
        self.log.truncate(self.history.len() - 1);
        // The history always starts at the root, so last() cannot fail
        // after the length guard above.
        if let Some(last) = self.history.last() {
            self.current_node_id = last.clone();
        }
        self.outcome = None;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Resets the traversal to the root, keeping the pathway and the
    /// patient context.
    pub fn restart(&mut self) {
        self.current_node_id = NodeId::root();
        self.history = vec![NodeId::root()];
        self.log.clear();
        self.outcome = None;
        self.updated_at = Timestamp::now();
    }

    fn conclude_at(&mut self, node: &Node) {
        let recommendations = collect_recommendations(node);
        self.outcome = Some(if recommendations.is_empty() {
            // A terminal node that yields nothing still concludes with
            // an explicit outcome, never an empty list.
            Outcome::NoGuidance
        } else {
            Outcome::Guidance { recommendations }
        });
    }
}
