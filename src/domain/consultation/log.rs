//! Audit log entries - one per user choice.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{NodeId, Timestamp};

/// One step of the audit trail.
///
/// An entry is built from the node that *asked* the question, before the
/// traversal advances, so `node_id` always names the question node, not
/// the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 1-based step number.
    pub step: u32,
    pub question: String,
    pub answer: String,
    pub timestamp: Timestamp,
    pub node_id: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_info: Option<String>,
}
