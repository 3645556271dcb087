//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for an active consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsultationId(Uuid);

impl ConsultationId {
    /// Creates a new random ConsultationId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ConsultationId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ConsultationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConsultationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConsultationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier of a pathway document in the catalog.
///
/// Pathway ids come from the catalog (the document's file stem), so they
/// are human-readable slugs like `ankle` or `heel-fracture`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathwayId(String);

impl PathwayId {
    /// Creates a new PathwayId, returning an error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("pathway_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathwayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a node within a pathway document.
///
/// The identifier `root` is reserved: it addresses the document's entry
/// node, which lives outside the `nodes` map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// The reserved identifier of the entry node.
    pub const ROOT: &'static str = "root";

    /// Creates a NodeId from document data.
    ///
    /// No shape is enforced: node ids are authoring-time strings and the
    /// traversal treats unresolvable ids as a recoverable outcome.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id of the entry node.
    pub fn root() -> Self {
        Self(Self::ROOT.to_string())
    }

    /// Returns true if this is the reserved root identifier.
    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
