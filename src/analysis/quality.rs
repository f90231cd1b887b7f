//! Non-fatal consistency checks on a parsed reply.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::analysis::{AnalysisResult, Hat};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityFinding {
    /// Wire path of the offending field, e.g. `sixHatExercise[2].hat`.
    pub field: String,
    pub message: String,
}

impl QualityFinding {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub fn inspect(result: &AnalysisResult) -> Vec<QualityFinding> {
    let mut findings = Vec::new();

    let texts = [
        ("executiveSummary", result.executive_summary.as_str()),
        ("architecturalScaffolding", result.architectural_scaffolding.as_str()),
        ("codeSequencing", result.code_sequencing.as_str()),
        ("techStackSelection", result.tech_stack_selection.as_str()),
        ("markdownOutline", result.markdown_outline.as_str()),
        ("saasArchitecture.overview", result.saas_architecture.overview.as_str()),
        (
            "verticalAILayoutDescription",
            result.vertical_ai_layout_description.as_str(),
        ),
        ("vertLayoutDescription", result.vert_layout_description.as_str()),
        (
            "brandComparisonSimulation.overallBrandingRecommendation",
            result
                .brand_comparison_simulation
                .overall_branding_recommendation
                .as_str(),
        ),
    ];
    for (field, text) in texts {
        if text.trim().is_empty() {
            findings.push(QualityFinding::new(field, "text is blank"));
        }
    }

    if result.framework_comparisons.is_empty() {
        findings.push(QualityFinding::new("frameworkComparisons", "no comparisons"));
    }
    for (idx, comparison) in result.framework_comparisons.iter().enumerate() {
        for (slot, framework) in ["framework1", "framework2"]
            .iter()
            .zip(comparison.frameworks())
        {
            if framework.name.trim().is_empty() {
                findings.push(QualityFinding::new(
                    format!("frameworkComparisons[{idx}].{slot}.name"),
                    "framework name is blank",
                ));
            }
        }
    }

    if result.simulation_results.is_empty() {
        findings.push(QualityFinding::new("simulationResults", "no simulations"));
    }

    let hats = &result.six_hat_exercise;
    if hats.len() != Hat::ALL.len() {
        findings.push(QualityFinding::new(
            "sixHatExercise",
            format!("expected {} hats, found {}", Hat::ALL.len(), hats.len()),
        ));
    }
    let mut counts: BTreeMap<Hat, usize> = BTreeMap::new();
    for entry in hats {
        *counts.entry(entry.hat).or_default() += 1;
    }
    for (hat, count) in counts.iter().filter(|(_, count)| **count > 1) {
        findings.push(QualityFinding::new(
            "sixHatExercise",
            format!("{hat} appears {count} times"),
        ));
    }

    let simulation = &result.brand_comparison_simulation;
    let known = simulation
        .participants
        .iter()
        .map(|p| p.name.trim())
        .collect::<BTreeSet<_>>();
    for (idx, entry) in simulation.dialogue_log.iter().enumerate() {
        if !known.contains(entry.participant_name.trim()) {
            findings.push(QualityFinding::new(
                format!("brandComparisonSimulation.dialogueLog[{idx}].participantName"),
                format!("unknown participant '{}'", entry.participant_name),
            ));
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::inspect;
    use crate::analysis::fixtures::sample_result;
    use crate::analysis::Hat;

    #[test]
    fn complete_result_has_no_findings() {
        assert!(inspect(&sample_result()).is_empty());
    }

    #[test]
    fn reports_hat_count_and_duplicates() {
        let mut result = sample_result();
        result.six_hat_exercise[1].hat = Hat::White;
        result.six_hat_exercise.pop();
        let findings = inspect(&result);
        assert!(findings
            .iter()
            .any(|f| f.message == "expected 6 hats, found 5"));
        assert!(findings
            .iter()
            .any(|f| f.message == "White Hat appears 2 times"));
    }

    #[test]
    fn reports_blank_text_and_framework_names() {
        let mut result = sample_result();
        result.executive_summary = " ".to_string();
        result.framework_comparisons[1].framework2.name.clear();
        let fields = inspect(&result)
            .into_iter()
            .map(|f| f.field)
            .collect::<Vec<_>>();
        assert!(fields.contains(&"executiveSummary".to_string()));
        assert!(fields.contains(&"frameworkComparisons[1].framework2.name".to_string()));
    }

    #[test]
    fn reports_dialogue_from_unknown_participants() {
        let mut result = sample_result();
        result.brand_comparison_simulation.dialogue_log[2].participant_name = "Zed".to_string();
        let findings = inspect(&result);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].field,
            "brandComparisonSimulation.dialogueLog[2].participantName"
        );
    }
}
