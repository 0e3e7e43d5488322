use std::fmt::Write;

use tracing::{info, warn};

use super::result::EvaluationResult;
use crate::design::Deviation;
use crate::providers::FigmaClient;

pub fn summary_message(result: &EvaluationResult) -> String {
    let mut message = format!(
        "Design evaluation - Score: {:.1}/10\n\n\
         This design was compared against a proven reference flow.\n\n\
         Main findings:\n",
        result.score
    );
    for (i, deviation) in result.top_deviations().iter().enumerate() {
        let _ = write!(message, "\n{}. {}: {}", i + 1, deviation.area, deviation.impact);
    }
    message
}

pub fn detail_message(deviation: &Deviation) -> String {
    format!(
        "Comparison: {}\n\n\
         Reference: {}\n\
         This design: {}\n\n\
         Impact: {}\n\
         Severity: {}\n",
        deviation.area,
        deviation.reference_value,
        deviation.candidate_value,
        deviation.impact,
        deviation.severity
    )
}

/// Post a summary comment and one comment per top deviation on the evaluated
/// file. Nothing is posted when there are no deviations. Failures are logged
/// and skipped; returns how many comments went through.
pub async fn post_evaluation_comments(client: &FigmaClient, result: &EvaluationResult) -> usize {
    if result.deviations.is_empty() {
        info!(file_key = %result.file_key, "no deviations, skipping comments");
        return 0;
    }

    let mut messages = vec![summary_message(result)];
    messages.extend(result.top_deviations().iter().map(detail_message));

    let mut posted = 0;
    for message in &messages {
        match client.post_comment(&result.file_key, message, None).await {
            Ok(()) => posted += 1,
            Err(e) => warn!(file_key = %result.file_key, error = %e, "failed to post comment"),
        }
    }
    info!(file_key = %result.file_key, posted, total = messages.len(), "comments posted");
    posted
}
