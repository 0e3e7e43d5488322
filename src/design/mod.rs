//! Feature extraction and scoring for design documents.
//!
//! Data flows leaf to root: [`walker::extract_frames`] turns a document tree
//! into per-screen [`FrameMetrics`], [`profile::aggregate`] folds those into a
//! [`DesignProfile`], and [`score::score_breakdown`] compares two profiles plus
//! the comparator's deviations into a bounded score.

pub mod classify;
pub mod frame;
pub mod node;
pub mod profile;
pub mod score;
pub mod stats;
pub mod walker;

pub use classify::{NodeRoles, classify};
pub use frame::{FrameMetrics, analyze_frame};
pub use node::{NodeKind, TreeNode};
pub use profile::{CognitiveLoad, DesignProfile, LoadThresholds, aggregate, aggregate_with};
pub use score::{
    Confidence, Deviation, Penalty, ScoreCard, ScoringPolicy, Severity, score, score_breakdown,
};
pub use walker::{extract_frames, has_meaningful_content};
