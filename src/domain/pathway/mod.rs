//! Pathway module - the diagnostic graph and its pure services.
//!
//! A pathway document is an immutable, hand-authored graph of question
//! and guidance nodes. This module owns the data model, the structural
//! classification of nodes, and the flattening of guidance fields into
//! the typed recommendation list.

pub mod classifier;
mod document;
mod guidance;
mod node;

pub use document::{PathwayDocument, PathwayMetadata};
pub use guidance::{collect_recommendations, RecommendationItem};
pub use node::{
    AnswerOption, ClinicalInfo, CriticalRule, Node, PreventionMeasure, TherapeuticMeasure,
    TreatmentProtocol,
};
