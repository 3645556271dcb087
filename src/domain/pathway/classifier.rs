//! Node classification - deciding whether a node asks or concludes.
//!
//! Classification is pure and inspects structural fields only; the
//! node's `type` tag is authoring documentation, not behavior.

use super::Node;

/// The structural role of a node, as seen by the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Offers at least one selectable next step.
    Question,
    /// No next step, and at least one qualifying guidance field.
    Terminal,
    /// No next step and no qualifying guidance: a dead end that must be
    /// surfaced as an explicit "no recommendations found" result.
    DeadEnd,
}

/// Returns true if the node offers a further selectable step: a
/// non-empty `answers` list, or at least one `options` entry carrying a
/// non-empty target.
pub fn has_next_step(node: &Node) -> bool {
    !node.answers.is_empty() || node.options.iter().any(|o| o.target().is_some())
}

/// Returns true if the node carries at least one guidance field that
/// qualifies it as terminal.
///
/// `critical_rules` and `risk_factors` are deliberately excluded: on
/// their own they annotate a pathway but do not conclude it. They are
/// still emitted when another field makes the node terminal.
pub fn has_qualifying_guidance(node: &Node) -> bool {
    !node.recommendations.is_empty()
        || !node.key_recommendations.is_empty()
        || !node.detailed_recommendations.is_empty()
        || !node.treatment_protocols.is_empty()
        || !node.therapeutic_measures.is_empty()
        || !node.prevention_measures.is_empty()
}

/// Returns true if the node is terminal: no next step and at least one
/// qualifying guidance field.
pub fn is_terminal(node: &Node) -> bool {
    !has_next_step(node) && has_qualifying_guidance(node)
}

/// Classifies a node into its structural role.
pub fn classify(node: &Node) -> NodeRole {
    if has_next_step(node) {
        NodeRole::Question
    } else if has_qualifying_guidance(node) {
        NodeRole::Terminal
    } else {
        NodeRole::DeadEnd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::NodeId;
    use crate::domain::pathway::{AnswerOption, CriticalRule, TreatmentProtocol};

    fn answer(text: &str, target: Option<&str>) -> AnswerOption {
        AnswerOption {
            text: text.to_string(),
            next_node_id: target.map(NodeId::new),
        }
    }

    #[test]
    fn node_with_answers_is_a_question() {
        let node = Node {
            answers: vec![answer("Yes", Some("n1"))],
            ..Node::default()
        };
        assert!(has_next_step(&node));
        assert_eq!(classify(&node), NodeRole::Question);
    }

    #[test]
    fn node_with_targeted_option_is_a_question() {
        let node = Node {
            options: vec![
                answer("Type A: informational", None),
                answer("Type B", Some("n2")),
            ],
            ..Node::default()
        };
        assert!(has_next_step(&node));
    }

    #[test]
    fn node_with_only_informational_options_has_no_next_step() {
        let node = Node {
            options: vec![answer("Type A", None), answer("Type B", None)],
            ..Node::default()
        };
        assert!(!has_next_step(&node));
    }

    #[test]
    fn node_with_guidance_and_no_next_step_is_terminal() {
        let node = Node {
            recommendations: vec!["Rest 2 weeks".to_string()],
            ..Node::default()
        };
        assert!(is_terminal(&node));
        assert_eq!(classify(&node), NodeRole::Terminal);
    }

    #[test]
    fn answers_always_win_over_guidance() {
        // A node that still offers a next step is never terminal, no
        // matter how much guidance it carries.
        let node = Node {
            answers: vec![answer("Continue", Some("n1"))],
            recommendations: vec!["Interim advice".to_string()],
            treatment_protocols: vec![TreatmentProtocol::default()],
            ..Node::default()
        };
        assert!(!is_terminal(&node));
        assert_eq!(classify(&node), NodeRole::Question);
    }

    #[test]
    fn critical_rules_alone_do_not_make_a_node_terminal() {
        let node = Node {
            critical_rules: vec![CriticalRule {
                rule: Some("Do not reduce without imaging".to_string()),
                warning: None,
            }],
            ..Node::default()
        };
        assert!(!is_terminal(&node));
        assert_eq!(classify(&node), NodeRole::DeadEnd);
    }

    #[test]
    fn risk_factors_alone_do_not_make_a_node_terminal() {
        let node = Node {
            risk_factors: vec!["Osteoporosis".to_string()],
            ..Node::default()
        };
        assert!(!is_terminal(&node));
        assert_eq!(classify(&node), NodeRole::DeadEnd);
    }

    #[test]
    fn empty_node_is_a_dead_end() {
        assert_eq!(classify(&Node::default()), NodeRole::DeadEnd);
    }

    #[test]
    fn each_qualifying_field_triggers_terminality() {
        let cases: Vec<Node> = vec![
            Node {
                recommendations: vec!["r".to_string()],
                ..Node::default()
            },
            Node {
                key_recommendations: vec!["k".to_string()],
                ..Node::default()
            },
            Node {
                detailed_recommendations: vec!["d".to_string()],
                ..Node::default()
            },
            Node {
                treatment_protocols: vec![TreatmentProtocol::default()],
                ..Node::default()
            },
            Node {
                therapeutic_measures: vec![Default::default()],
                ..Node::default()
            },
            Node {
                prevention_measures: vec![Default::default()],
                ..Node::default()
            },
        ];
        for node in &cases {
            assert!(is_terminal(node));
        }
    }
}
