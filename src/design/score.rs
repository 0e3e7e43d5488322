use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::profile::DesignProfile;
use super::stats::round_to;

pub const MAX_SCORE: f64 = 10.0;
pub const MIN_SCORE: f64 = 0.0;

/// Severity assigned by the comparator. Anything unrecognized is `Low`,
/// including `null` and non-string values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    #[default]
    Low,
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<&str> for Severity {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Comparator's self-reported confidence. Informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    #[default]
    Low,
}

impl From<String> for Confidence {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(label(deserializer)?.map_or(Self::Low, Self::from))
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(label(deserializer)?.map_or(Self::Low, Self::from))
    }
}

/// A string label, or `None` for `null`, numbers and other non-string values.
fn label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

/// One qualitative difference reported by the comparator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deviation {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub area: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub reference_value: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub candidate_value: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub impact: String,
    #[serde(default)]
    pub severity: Severity,
}

/// Models often answer `"reference_value": 42`; keep the value as text.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Penalty amounts and ratio bands of the deterministic rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub excess_text_ratio: f64,
    pub excess_text_penalty: f64,
    pub elevated_text_ratio: f64,
    pub elevated_text_penalty: f64,
    pub sparse_text_ratio: f64,
    pub sparse_text_penalty: f64,
    pub inconsistent_buttons_penalty: f64,
    /// Reference progress usage above this makes a missing indicator count.
    pub progress_reference_min: f64,
    pub missing_progress_penalty: f64,
    pub high_severity_penalty: f64,
    pub medium_severity_penalty: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            excess_text_ratio: 2.0,
            excess_text_penalty: 2.0,
            elevated_text_ratio: 1.5,
            elevated_text_penalty: 1.0,
            sparse_text_ratio: 0.5,
            sparse_text_penalty: 1.5,
            inconsistent_buttons_penalty: 1.5,
            progress_reference_min: 0.5,
            missing_progress_penalty: 1.0,
            high_severity_penalty: 1.0,
            medium_severity_penalty: 0.5,
        }
    }
}

impl ScoringPolicy {
    pub fn severity_penalty(&self, severity: Severity) -> f64 {
        match severity {
            Severity::High => self.high_severity_penalty,
            Severity::Medium => self.medium_severity_penalty,
            Severity::Low => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Penalty {
    pub reason: String,
    pub amount: f64,
}

/// Final score plus every penalty that produced it, in application order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub score: f64,
    pub penalties: Vec<Penalty>,
}

/// Score a candidate against the reference with the default policy.
pub fn score(reference: &DesignProfile, candidate: &DesignProfile, deviations: &[Deviation]) -> f64 {
    score_breakdown(reference, candidate, deviations, &ScoringPolicy::default()).score
}

pub fn score_breakdown(
    reference: &DesignProfile,
    candidate: &DesignProfile,
    deviations: &[Deviation],
    policy: &ScoringPolicy,
) -> ScoreCard {
    let mut penalties = Vec::new();

    if let Some(penalty) = text_volume_penalty(reference.mean_words(), candidate.mean_words(), policy)
    {
        penalties.push(penalty);
    }

    if reference.button_consistency() && !candidate.button_consistency() {
        penalties.push(Penalty {
            reason: "inconsistent buttons".into(),
            amount: policy.inconsistent_buttons_penalty,
        });
    }

    if reference.progress_ratio() > policy.progress_reference_min && candidate.progress_ratio() <= 0.0
    {
        penalties.push(Penalty {
            reason: "no progress indicators".into(),
            amount: policy.missing_progress_penalty,
        });
    }

    for deviation in deviations {
        let amount = policy.severity_penalty(deviation.severity);
        if amount > 0.0 {
            penalties.push(Penalty {
                reason: format!("{} ({} severity)", deviation.area, deviation.severity),
                amount,
            });
        }
    }

    for penalty in &penalties {
        debug!(amount = penalty.amount, reason = %penalty.reason, "penalty applied");
    }

    let raw = MAX_SCORE - penalties.iter().map(|p| p.amount).sum::<f64>();
    ScoreCard {
        score: round_to(raw.clamp(MIN_SCORE, MAX_SCORE), 1),
        penalties,
    }
}

/// First matching band only: far too much, too much, then too little text.
fn text_volume_penalty(reference_mean: f64, candidate_mean: f64, policy: &ScoringPolicy) -> Option<Penalty> {
    let describe = |label: &str| format!("{label} ({candidate_mean} vs {reference_mean} words)");

    if candidate_mean > reference_mean * policy.excess_text_ratio {
        Some(Penalty {
            reason: describe("too much text"),
            amount: policy.excess_text_penalty,
        })
    } else if candidate_mean > reference_mean * policy.elevated_text_ratio {
        Some(Penalty {
            reason: describe("elevated text"),
            amount: policy.elevated_text_penalty,
        })
    } else if candidate_mean < reference_mean * policy.sparse_text_ratio {
        Some(Penalty {
            reason: describe("very little text"),
            amount: policy.sparse_text_penalty,
        })
    } else {
        None
    }
}
