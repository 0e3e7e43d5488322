use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::frame::FrameMetrics;
use super::stats::{Summary, round_to};
use crate::error::{EvalError, Result};

/// Patterns tolerated before a design counts as having inconsistent buttons:
/// the dominant one plus a single variant.
const MAX_BUTTON_PATTERNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CognitiveLoad {
    Low,
    Medium,
    High,
}

/// Word-count cut-offs for [`CognitiveLoad`]. Policy, not physics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadThresholds {
    /// Mean words strictly below this is `low`.
    #[serde(default = "default_low_load_below")]
    pub low_load_below: f64,
    /// Mean words at or above this is `high`.
    #[serde(default = "default_high_load_from")]
    pub high_load_from: f64,
}

fn default_low_load_below() -> f64 {
    30.0
}

fn default_high_load_from() -> f64 {
    60.0
}

impl Default for LoadThresholds {
    fn default() -> Self {
        Self {
            low_load_below: default_low_load_below(),
            high_load_from: default_high_load_from(),
        }
    }
}

impl LoadThresholds {
    pub fn categorize(&self, mean_words: f64) -> CognitiveLoad {
        if mean_words < self.low_load_below {
            CognitiveLoad::Low
        } else if mean_words < self.high_load_from {
            CognitiveLoad::Medium
        } else {
            CognitiveLoad::High
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    pub total_frames: usize,
    pub frame_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub avg_words_per_screen: f64,
    pub median_words: f64,
    /// `[min, max]`
    pub word_range: [usize; 2],
    pub word_std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionMetrics {
    pub avg_buttons_per_screen: f64,
    #[serde(default)]
    pub median_buttons: f64,
    #[serde(default)]
    pub button_range: [usize; 2],
    #[serde(default)]
    pub button_std_dev: f64,
    pub button_consistency: bool,
    pub button_usage: BTreeMap<String, usize>,
    pub avg_input_fields: f64,
    /// Fraction of frames with a progress indicator, two decimals.
    pub progress_indicator_usage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UxPatterns {
    pub has_consistent_cta: bool,
    pub uses_progress_indicators: bool,
    pub avg_cognitive_load: CognitiveLoad,
}

/// Statistical summary of a design's frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignProfile {
    pub metadata: ProfileMetadata,
    pub text_metrics: TextMetrics,
    pub interaction_metrics: InteractionMetrics,
    pub ux_patterns: UxPatterns,
}

impl DesignProfile {
    pub fn frame_count(&self) -> usize {
        self.metadata.total_frames
    }

    pub fn mean_words(&self) -> f64 {
        self.text_metrics.avg_words_per_screen
    }

    pub fn button_consistency(&self) -> bool {
        self.interaction_metrics.button_consistency
    }

    pub fn progress_ratio(&self) -> f64 {
        self.interaction_metrics.progress_indicator_usage
    }

    pub fn cognitive_load(&self) -> CognitiveLoad {
        self.ux_patterns.avg_cognitive_load
    }
}

/// Aggregate frames with the default cognitive-load thresholds.
pub fn aggregate(frames: &[FrameMetrics]) -> Result<DesignProfile> {
    aggregate_with(frames, &LoadThresholds::default())
}

#[allow(clippy::cast_precision_loss)]
pub fn aggregate_with(frames: &[FrameMetrics], thresholds: &LoadThresholds) -> Result<DesignProfile> {
    let word_counts: Vec<usize> = frames.iter().map(|f| f.total_words).collect();
    let button_counts: Vec<usize> = frames.iter().map(|f| f.button_count).collect();
    let input_counts: Vec<usize> = frames.iter().map(|f| f.input_fields).collect();

    let (Some(words), Some(buttons), Some(inputs)) = (
        Summary::of(&word_counts),
        Summary::of(&button_counts),
        Summary::of(&input_counts),
    ) else {
        return Err(EvalError::InsufficientData(
            "cannot build a profile from zero frames".into(),
        ));
    };

    let mut button_usage: BTreeMap<String, usize> = BTreeMap::new();
    for name in frames.iter().flat_map(|f| &f.button_names) {
        *button_usage.entry(name.clone()).or_default() += 1;
    }

    let button_consistency = is_button_consistent(frames);
    let progress_frames = frames.iter().filter(|f| f.has_progress).count();
    let progress_ratio = round_to(progress_frames as f64 / frames.len() as f64, 2);

    Ok(DesignProfile {
        metadata: ProfileMetadata {
            total_frames: frames.len(),
            frame_names: frames.iter().map(|f| f.name.clone()).collect(),
        },
        text_metrics: TextMetrics {
            avg_words_per_screen: round_to(words.mean, 1),
            median_words: words.median,
            word_range: [words.min, words.max],
            word_std_dev: round_to(words.std_dev, 1),
        },
        interaction_metrics: InteractionMetrics {
            avg_buttons_per_screen: round_to(buttons.mean, 1),
            median_buttons: buttons.median,
            button_range: [buttons.min, buttons.max],
            button_std_dev: round_to(buttons.std_dev, 1),
            button_consistency,
            button_usage,
            avg_input_fields: round_to(inputs.mean, 1),
            progress_indicator_usage: progress_ratio,
        },
        ux_patterns: UxPatterns {
            has_consistent_cta: button_consistency,
            uses_progress_indicators: progress_frames > 0,
            avg_cognitive_load: thresholds.categorize(words.mean),
        },
    })
}

/// At most [`MAX_BUTTON_PATTERNS`] distinct sorted button-name lists.
pub fn is_button_consistent(frames: &[FrameMetrics]) -> bool {
    let patterns: BTreeSet<Vec<&str>> = frames
        .iter()
        .map(|f| {
            let mut names: Vec<&str> = f.button_names.iter().map(String::as_str).collect();
            names.sort_unstable();
            names
        })
        .collect();
    patterns.len() <= MAX_BUTTON_PATTERNS
}
