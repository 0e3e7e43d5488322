use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::design::{Confidence, DesignProfile, Deviation, Penalty};

/// How many deviations the report and the posted comments surface.
pub const TOP_DEVIATIONS: usize = 3;

/// Outcome of one evaluation run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub file_key: String,
    /// In `[0, 10]`, one decimal.
    pub score: f64,
    #[serde(default)]
    pub penalties: Vec<Penalty>,
    #[serde(default)]
    pub deviations: Vec<Deviation>,
    #[serde(default)]
    pub overall_assessment: String,
    /// Passed through from the comparator; never affects the score.
    #[serde(default, rename = "comparison_confidence")]
    pub confidence: Confidence,
    pub candidate_profile: DesignProfile,
    pub reference_profile: DesignProfile,
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationResult {
    /// The first few deviations, in the order the comparator reported them.
    pub fn top_deviations(&self) -> &[Deviation] {
        &self.deviations[..self.deviations.len().min(TOP_DEVIATIONS)]
    }
}
