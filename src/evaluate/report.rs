use super::result::EvaluationResult;

const RULE_WIDTH: usize = 60;

/// Render a result for the terminal.
pub fn render(result: &EvaluationResult) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let assessment = if result.overall_assessment.is_empty() {
        "N/A"
    } else {
        result.overall_assessment.as_str()
    };

    let mut lines = vec![
        rule.clone(),
        format!("DESIGN EVALUATION: {}", result.file_key),
        rule.clone(),
        format!("Score:      {:.1}/10", result.score),
        format!("Confidence: {}", result.confidence),
        format!("Summary:    {assessment}"),
        format!(
            "Frames:     {} candidate / {} reference",
            result.candidate_profile.frame_count(),
            result.reference_profile.frame_count()
        ),
    ];

    if !result.penalties.is_empty() {
        lines.push(String::new());
        lines.push("Penalties:".to_string());
        for penalty in &result.penalties {
            lines.push(format!("  -{:.1}  {}", penalty.amount, penalty.reason));
        }
    }

    lines.push(String::new());
    let top = result.top_deviations();
    if top.is_empty() {
        lines.push("No deviations reported.".to_string());
    } else {
        lines.push("Top issues:".to_string());
        for (i, deviation) in top.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("{}. {} [{}]", i + 1, deviation.area, deviation.severity));
            lines.push(format!("   Reference: {}", deviation.reference_value));
            lines.push(format!("   Candidate: {}", deviation.candidate_value));
            lines.push(format!("   Impact:    {}", deviation.impact));
        }
    }

    lines.push(rule);
    lines.join("\n")
}
