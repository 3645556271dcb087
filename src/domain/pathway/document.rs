//! Pathway document - the immutable graph a consultation traverses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::NodeId;

use super::Node;

/// Descriptive fields of a pathway document.
///
/// Passed through verbatim to the report header, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// An externally supplied, immutable graph of diagnostic nodes.
///
/// Cross-references between nodes stay string keys against the `nodes`
/// map rather than materialized links, so the document is trivially
/// shareable between consultations and cycles in the authored graph need
/// no special handling. The entry node lives outside the map and is
/// addressed by the reserved `root` sentinel; a map entry that shadows
/// the sentinel is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayDocument {
    #[serde(default)]
    pub metadata: PathwayMetadata,
    pub root: Node,
    #[serde(default)]
    pub nodes: HashMap<NodeId, Node>,
}

impl PathwayDocument {
    /// Resolves a node id, honoring the `root` sentinel.
    ///
    /// Returns `None` for a dangling reference; the traversal turns that
    /// into a recoverable error outcome, never a panic.
    pub fn resolve(&self, id: &NodeId) -> Option<&Node> {
        if id.is_root() {
            Some(&self.root)
        } else {
            self.nodes.get(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_with_one_node() -> PathwayDocument {
        let mut nodes = HashMap::new();
        nodes.insert(
            NodeId::new("n1"),
            Node {
                id: "n1".to_string(),
                kind: "question".to_string(),
                question: Some("Is the fracture open?".to_string()),
                ..Node::default()
            },
        );
        PathwayDocument {
            metadata: PathwayMetadata {
                title: "Ankle fractures".to_string(),
                ..PathwayMetadata::default()
            },
            root: Node {
                id: "root".to_string(),
                kind: "question".to_string(),
                ..Node::default()
            },
            nodes,
        }
    }

    #[test]
    fn resolve_root_sentinel_returns_entry_node() {
        let doc = document_with_one_node();
        let node = doc.resolve(&NodeId::root()).unwrap();
        assert_eq!(node.id, "root");
    }

    #[test]
    fn resolve_finds_mapped_node() {
        let doc = document_with_one_node();
        let node = doc.resolve(&NodeId::new("n1")).unwrap();
        assert_eq!(node.question.as_deref(), Some("Is the fracture open?"));
    }

    #[test]
    fn resolve_dangling_reference_is_none() {
        let doc = document_with_one_node();
        assert!(doc.resolve(&NodeId::new("ghost")).is_none());
    }

    #[test]
    fn root_sentinel_shadows_map_entry() {
        let mut doc = document_with_one_node();
        doc.nodes.insert(
            NodeId::root(),
            Node {
                id: "impostor".to_string(),
                ..Node::default()
            },
        );

        assert_eq!(doc.resolve(&NodeId::root()).unwrap().id, "root");
    }

    #[test]
    fn document_deserializes_from_authored_json() {
        let json = r#"{
            "metadata": {
                "title": "Heel fractures",
                "subtitle": "Calcaneal fracture triage",
                "source_document": "Clinical guidelines 2024",
                "year": 2024
            },
            "root": {
                "id": "root",
                "type": "question",
                "question": "Mechanism of injury?",
                "answers": [{"text": "Fall from height", "next_node_id": "n1"}]
            },
            "nodes": {
                "n1": {"id": "n1", "type": "recommendation", "recommendations": ["CT scan"]}
            }
        }"#;

        let doc: PathwayDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.metadata.title, "Heel fractures");
        assert_eq!(doc.metadata.year, Some(2024));
        assert_eq!(doc.root.answers.len(), 1);
        assert!(doc.resolve(&NodeId::new("n1")).is_some());
    }
}
