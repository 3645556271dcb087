//! Report serialization - the deterministic plain-text consultation
//! report.
//!
//! The report is a faithful expansion of the underlying data: sections
//! appear in fixed order, every present field is rendered, and nothing
//! is reordered, deduplicated, or summarized. Given identical inputs
//! (including the generation timestamp) the output is byte-identical.

use crate::domain::foundation::Timestamp;
use crate::domain::pathway::{
    CriticalRule, PathwayMetadata, PreventionMeasure, RecommendationItem, TherapeuticMeasure,
    TreatmentProtocol,
};

use super::{LogEntry, Outcome, PatientContext};

const HEAVY_RULE: &str =
    "═══════════════════════════════════════════════════════════";
const LIGHT_RULE: &str =
    "───────────────────────────────────────────────────────────";

/// Renders the consultation report.
///
/// Section order: header and pathway metadata, patient context (only
/// when intake was supplied), the full audit trail, the outcome with
/// every recommendation item, and the closing rule.
pub fn render_report(
    metadata: &PathwayMetadata,
    patient: &PatientContext,
    log: &[LogEntry],
    outcome: Option<&Outcome>,
    generated_at: Timestamp,
) -> String {
    let mut out = String::new();

    out.push_str(HEAVY_RULE);
    out.push('\n');
    out.push_str("           CLINICAL CONSULTATION REPORT\n");
    out.push_str(HEAVY_RULE);
    out.push_str("\n\n");

    out.push_str(&format!("PATHWAY: {}\n", metadata.title));
    if let Some(subtitle) = &metadata.subtitle {
        out.push_str(&format!("SUBTITLE: {}\n", subtitle));
    }
    if let Some(source) = &metadata.source_document {
        out.push_str(&format!("SOURCE: {}\n", source));
    }
    if let Some(year) = metadata.year {
        out.push_str(&format!("YEAR: {}\n", year));
    }
    if let Some(version) = &metadata.version {
        out.push_str(&format!("VERSION: {}\n", version));
    }
    out.push_str(&format!("GENERATED: {}\n\n", generated_at.to_rfc3339()));

    if patient.is_specified() {
        out.push_str(LIGHT_RULE);
        out.push('\n');
        out.push_str("PATIENT\n");
        out.push_str(LIGHT_RULE);
        out.push('\n');
        out.push_str(&format!("Gender: {}\n", patient.gender().label()));
        out.push_str(&format!("Age: {} years\n", patient.age()));
        out.push_str(&format!("Weight: {} kg\n", patient.weight()));
        let diseases = if patient.chronic_diseases().is_empty() {
            "None reported"
        } else {
            patient.chronic_diseases()
        };
        out.push_str(&format!("Chronic diseases: {}\n\n", diseases));
    }

    out.push_str(LIGHT_RULE);
    out.push('\n');
    out.push_str("DIAGNOSTIC PATH\n");
    out.push_str(LIGHT_RULE);
    out.push_str("\n\n");

    for entry in log {
        out.push_str(&format!(
            "Step {} [{}]\n",
            entry.step,
            entry.timestamp.to_rfc3339()
        ));
        out.push_str(&format!("  Node: {}\n", entry.node_id));
        if let Some(source) = &entry.source_reference {
            out.push_str(&format!("  Source: {}\n", source));
        }
        out.push_str(&format!("  Question: {}\n", entry.question));
        out.push_str(&format!("  Answer: {}\n", entry.answer));
        if let Some(info) = &entry.clinical_info {
            out.push_str(&format!("  Clinical info: {}\n", info));
        }
        out.push('\n');
    }

    if let Some(outcome) = outcome {
        out.push_str(HEAVY_RULE);
        out.push('\n');
        out.push_str("FINAL CLINICAL RECOMMENDATIONS\n");
        out.push_str(HEAVY_RULE);
        out.push_str("\n\n");
        render_outcome(&mut out, outcome);
    }

    out.push_str(LIGHT_RULE);
    out.push('\n');
    out.push_str("End of report\n");
    out.push_str(LIGHT_RULE);
    out.push('\n');

    out
}

fn render_outcome(out: &mut String, outcome: &Outcome) {
    match outcome {
        Outcome::Guidance { recommendations } => {
            for (index, item) in recommendations.iter().enumerate() {
                render_item(out, index + 1, item);
            }
        }
        Outcome::NoGuidance => {
            out.push_str("Diagnostics complete. No recommendations found.\n\n");
        }
        Outcome::DanglingReference { missing } => {
            out.push_str(&format!(
                "Diagnostics ended: node \"{}\" is not present in the pathway data.\n\n",
                missing
            ));
        }
        Outcome::MissingNode { missing } => {
            out.push_str(&format!(
                "Diagnostics ended: current node \"{}\" could not be resolved.\n\n",
                missing
            ));
        }
    }
}

fn render_item(out: &mut String, number: usize, item: &RecommendationItem) {
    match item {
        RecommendationItem::Recommendation { text } => {
            out.push_str(&format!("{}. [RECOMMENDATION] {}\n\n", number, text));
        }
        RecommendationItem::KeyRecommendation { text } => {
            out.push_str(&format!("{}. [KEY RECOMMENDATION] {}\n\n", number, text));
        }
        RecommendationItem::DetailedRecommendation { text } => {
            out.push_str(&format!(
                "{}. [DETAILED RECOMMENDATION] {}\n\n",
                number, text
            ));
        }
        RecommendationItem::TreatmentProtocol { data } => {
            out.push_str(&format!("{}. TREATMENT PROTOCOL\n", number));
            render_protocol(out, data);
            out.push('\n');
        }
        RecommendationItem::TherapeuticMeasure { data } => {
            out.push_str(&format!("{}. THERAPEUTIC MEASURE\n", number));
            render_therapeutic(out, data);
            out.push('\n');
        }
        RecommendationItem::PreventionMeasure { data } => {
            out.push_str(&format!("{}. PREVENTION MEASURE\n", number));
            render_prevention(out, data);
            out.push('\n');
        }
        RecommendationItem::CriticalRule { data } => {
            out.push_str(&format!(
                "{}. CRITICAL RULE / CONTRAINDICATION\n",
                number
            ));
            render_critical(out, data);
            out.push('\n');
        }
        RecommendationItem::RiskFactor { text } => {
            out.push_str(&format!("{}. RISK FACTOR: {}\n\n", number, text));
        }
    }
}

fn push_field(out: &mut String, label: &str, value: &Option<String>) {
    if let Some(value) = value {
        out.push_str(&format!("   {}: {}\n", label, value));
    }
}

fn render_protocol(out: &mut String, p: &TreatmentProtocol) {
    push_field(out, "Type", &p.kind);
    push_field(out, "Location", &p.location);
    push_field(out, "Anatomical note", &p.anatomical_note);
    push_field(out, "Detailed description", &p.detailed_description);
    push_field(out, "Surgical method", &p.surgical_method);
    push_field(out, "Alternative", &p.alternative);
    push_field(out, "Implementation", &p.implementation);
    push_field(out, "Indications", &p.indications);
    push_field(out, "Contraindications", &p.contraindications);
    push_field(out, "Timing", &p.timing);
    push_field(out, "Weight bearing", &p.weight_bearing);
    push_field(out, "Progression", &p.progression);
    push_field(out, "Immobilization", &p.immobilization);
    push_field(out, "Rehabilitation", &p.rehabilitation);
    push_field(out, "Method", &p.method);
    push_field(out, "Age specifics", &p.age_specifics);
    push_field(out, "Indication", &p.indication);
    push_field(out, "Early phase", &p.early_phase);
    push_field(out, "Late phase", &p.late_phase);
    push_field(out, "Phase description", &p.phase_description);
    push_field(out, "Measures", &p.measures);
    if let Some(objectives) = &p.objectives {
        out.push_str("   Objectives:\n");
        for objective in objectives {
            out.push_str(&format!("     - {}\n", objective));
        }
    }
}

fn render_therapeutic(out: &mut String, m: &TherapeuticMeasure) {
    push_field(out, "Measure", &m.measure);
    push_field(out, "Timing", &m.timing);
    push_field(out, "Details", &m.details);
    push_field(out, "Implementation", &m.implementation);
}

fn render_prevention(out: &mut String, m: &PreventionMeasure) {
    push_field(out, "Measure", &m.measure);
    push_field(out, "Implementation", &m.implementation);
}

fn render_critical(out: &mut String, r: &CriticalRule) {
    push_field(out, "Rule", &r.rule);
    push_field(out, "Warning", &r.warning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::consultation::Gender;
    use crate::domain::foundation::NodeId;
    use chrono::{DateTime, Utc};

    fn fixed_time(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    fn sample_metadata() -> PathwayMetadata {
        PathwayMetadata {
            title: "Ankle fractures".to_string(),
            subtitle: Some("Malleolar fracture triage".to_string()),
            source_document: Some("Clinical guidelines 2024".to_string()),
            year: Some(2024),
            version: None,
        }
    }

    fn sample_log() -> Vec<LogEntry> {
        vec![LogEntry {
            step: 1,
            question: "Is the fracture displaced?".to_string(),
            answer: "Yes".to_string(),
            timestamp: fixed_time("2024-03-01T09:15:00Z"),
            node_id: NodeId::root(),
            source_reference: Some("Guideline §2.1".to_string()),
            clinical_info: Some("Objective: Assess stability | Evidence level: B".to_string()),
        }]
    }

    #[test]
    fn report_is_deterministic() {
        let metadata = sample_metadata();
        let patient = PatientContext::new(Gender::Male, 35, 80, "none").unwrap();
        let log = sample_log();
        let outcome = Outcome::Guidance {
            recommendations: vec![RecommendationItem::Recommendation {
                text: "Rest 2 weeks".to_string(),
            }],
        };
        let at = fixed_time("2024-03-01T10:00:00Z");

        let first = render_report(&metadata, &patient, &log, Some(&outcome), at);
        let second = render_report(&metadata, &patient, &log, Some(&outcome), at);
        assert_eq!(first, second);
    }

    #[test]
    fn report_renders_sections_in_fixed_order() {
        let metadata = sample_metadata();
        let patient = PatientContext::new(Gender::Female, 60, 70, "osteoporosis").unwrap();
        let outcome = Outcome::Guidance {
            recommendations: vec![RecommendationItem::KeyRecommendation {
                text: "Immobilize".to_string(),
            }],
        };
        let report = render_report(
            &metadata,
            &patient,
            &sample_log(),
            Some(&outcome),
            fixed_time("2024-03-01T10:00:00Z"),
        );

        let header = report.find("CLINICAL CONSULTATION REPORT").unwrap();
        let patient_pos = report.find("PATIENT\n").unwrap();
        let path = report.find("DIAGNOSTIC PATH").unwrap();
        let recs = report.find("FINAL CLINICAL RECOMMENDATIONS").unwrap();
        let end = report.find("End of report").unwrap();

        assert!(header < patient_pos);
        assert!(patient_pos < path);
        assert!(path < recs);
        assert!(recs < end);

        assert!(report.contains("PATHWAY: Ankle fractures"));
        assert!(report.contains("SOURCE: Clinical guidelines 2024"));
        assert!(report.contains("YEAR: 2024"));
        assert!(report.contains("Gender: Female"));
        assert!(report.contains("Chronic diseases: osteoporosis"));
        assert!(report.contains("1. [KEY RECOMMENDATION] Immobilize"));
    }

    #[test]
    fn unspecified_patient_suppresses_the_whole_section() {
        let report = render_report(
            &sample_metadata(),
            &PatientContext::not_specified(),
            &sample_log(),
            None,
            fixed_time("2024-03-01T10:00:00Z"),
        );

        assert!(!report.contains("PATIENT\n"));
        assert!(!report.contains("Gender:"));
    }

    #[test]
    fn audit_trail_renders_every_optional_field() {
        let report = render_report(
            &sample_metadata(),
            &PatientContext::not_specified(),
            &sample_log(),
            None,
            fixed_time("2024-03-01T10:00:00Z"),
        );

        assert!(report.contains("Step 1 [2024-03-01T09:15:00Z]"));
        assert!(report.contains("  Node: root"));
        assert!(report.contains("  Source: Guideline §2.1"));
        assert!(report.contains("  Question: Is the fracture displaced?"));
        assert!(report.contains("  Answer: Yes"));
        assert!(report
            .contains("  Clinical info: Objective: Assess stability | Evidence level: B"));
    }

    #[test]
    fn structured_items_render_their_own_templates() {
        let outcome = Outcome::Guidance {
            recommendations: vec![
                RecommendationItem::TreatmentProtocol {
                    data: TreatmentProtocol {
                        kind: Some("Surgical".to_string()),
                        surgical_method: Some("Open reduction".to_string()),
                        objectives: Some(vec!["Restore alignment".to_string()]),
                        ..TreatmentProtocol::default()
                    },
                },
                RecommendationItem::TherapeuticMeasure {
                    data: TherapeuticMeasure {
                        measure: Some("Elevation".to_string()),
                        timing: Some("First 48 hours".to_string()),
                        ..TherapeuticMeasure::default()
                    },
                },
                RecommendationItem::CriticalRule {
                    data: CriticalRule {
                        rule: Some("No early weight bearing".to_string()),
                        warning: Some("Risk of displacement".to_string()),
                    },
                },
                RecommendationItem::RiskFactor {
                    text: "Osteoporosis".to_string(),
                },
            ],
        };

        let report = render_report(
            &sample_metadata(),
            &PatientContext::not_specified(),
            &[],
            Some(&outcome),
            fixed_time("2024-03-01T10:00:00Z"),
        );

        assert!(report.contains("1. TREATMENT PROTOCOL"));
        assert!(report.contains("   Type: Surgical"));
        assert!(report.contains("   Surgical method: Open reduction"));
        assert!(report.contains("   Objectives:\n     - Restore alignment"));
        assert!(report.contains("2. THERAPEUTIC MEASURE"));
        assert!(report.contains("   Measure: Elevation"));
        assert!(report.contains("3. CRITICAL RULE / CONTRAINDICATION"));
        assert!(report.contains("   Warning: Risk of displacement"));
        assert!(report.contains("4. RISK FACTOR: Osteoporosis"));
    }

    #[test]
    fn items_keep_collection_order_and_numbering() {
        let outcome = Outcome::Guidance {
            recommendations: vec![
                RecommendationItem::Recommendation {
                    text: "R1".to_string(),
                },
                RecommendationItem::KeyRecommendation {
                    text: "K1".to_string(),
                },
            ],
        };
        let report = render_report(
            &sample_metadata(),
            &PatientContext::not_specified(),
            &[],
            Some(&outcome),
            fixed_time("2024-03-01T10:00:00Z"),
        );

        let r1 = report.find("1. [RECOMMENDATION] R1").unwrap();
        let k1 = report.find("2. [KEY RECOMMENDATION] K1").unwrap();
        assert!(r1 < k1);
    }

    #[test]
    fn error_outcomes_render_explanatory_lines() {
        let report = render_report(
            &sample_metadata(),
            &PatientContext::not_specified(),
            &[],
            Some(&Outcome::DanglingReference {
                missing: NodeId::new("ghost"),
            }),
            fixed_time("2024-03-01T10:00:00Z"),
        );
        assert!(report
            .contains("Diagnostics ended: node \"ghost\" is not present in the pathway data."));

        let report = render_report(
            &sample_metadata(),
            &PatientContext::not_specified(),
            &[],
            Some(&Outcome::NoGuidance),
            fixed_time("2024-03-01T10:00:00Z"),
        );
        assert!(report.contains("Diagnostics complete. No recommendations found."));
    }
}
