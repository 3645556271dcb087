//! Recommendation collection - flattening a terminal node's guidance
//! fields into one ordered, typed list.

use serde::{Deserialize, Serialize};

use super::{CriticalRule, Node, PreventionMeasure, TherapeuticMeasure, TreatmentProtocol};

/// One classified, renderable unit of clinical guidance.
///
/// The discriminant matches the source field the item came from; the
/// payload is carried untouched. Rendering of structured payloads is the
/// report serializer's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RecommendationItem {
    Recommendation { text: String },
    KeyRecommendation { text: String },
    DetailedRecommendation { text: String },
    TreatmentProtocol { data: TreatmentProtocol },
    TherapeuticMeasure { data: TherapeuticMeasure },
    PreventionMeasure { data: PreventionMeasure },
    CriticalRule { data: CriticalRule },
    RiskFactor { text: String },
}

/// Flattens a node's guidance fields into one ordered list.
///
/// Field emission order is fixed: plain recommendations, key, detailed,
/// treatment protocols, therapeutic measures, prevention measures,
/// critical rules, risk factors. Each field contributes its items in
/// array order; absent fields contribute nothing.
pub fn collect_recommendations(node: &Node) -> Vec<RecommendationItem> {
    let mut items = Vec::new();

    for text in &node.recommendations {
        items.push(RecommendationItem::Recommendation { text: text.clone() });
    }
    for text in &node.key_recommendations {
        items.push(RecommendationItem::KeyRecommendation { text: text.clone() });
    }
    for text in &node.detailed_recommendations {
        items.push(RecommendationItem::DetailedRecommendation { text: text.clone() });
    }
    for protocol in &node.treatment_protocols {
        items.push(RecommendationItem::TreatmentProtocol {
            data: protocol.clone(),
        });
    }
    for measure in &node.therapeutic_measures {
        items.push(RecommendationItem::TherapeuticMeasure {
            data: measure.clone(),
        });
    }
    for measure in &node.prevention_measures {
        items.push(RecommendationItem::PreventionMeasure {
            data: measure.clone(),
        });
    }
    for rule in &node.critical_rules {
        items.push(RecommendationItem::CriticalRule { data: rule.clone() });
    }
    for text in &node.risk_factors {
        items.push(RecommendationItem::RiskFactor { text: text.clone() });
    }

    items
}
