//! End-to-end evaluation pipeline.
//!
//! fetch (or cache) → walk → aggregate → compare → score. Each stage either
//! returns a complete value or fails the run; nothing is retried here.

pub mod comments;
pub mod report;
pub mod result;
pub mod store;

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::cache::ResultCache;
use crate::design::{
    DesignProfile, FrameMetrics, LoadThresholds, ScoringPolicy, aggregate_with, extract_frames,
    score_breakdown,
};
use crate::error::{EvalError, Result};
use crate::providers::{Comparator, DocumentSource};

pub use result::EvaluationResult;

/// Cache key for one identifier/filter pair.
pub fn cache_key(file_key: &str, prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{file_key}--{prefix}"),
        _ => file_key.to_string(),
    }
}

pub struct Evaluator {
    source: Arc<dyn DocumentSource>,
    comparator: Arc<dyn Comparator>,
    cache: Option<ResultCache>,
    policy: ScoringPolicy,
    thresholds: LoadThresholds,
}

impl Evaluator {
    pub fn new(source: Arc<dyn DocumentSource>, comparator: Arc<dyn Comparator>) -> Self {
        Self {
            source,
            comparator,
            cache: None,
            policy: ScoringPolicy::default(),
            thresholds: LoadThresholds::default(),
        }
    }

    pub fn with_cache(mut self, cache: ResultCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_thresholds(mut self, thresholds: LoadThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Frame metrics for `file_key`, from the cache when `use_cache` is set and
    /// a fresh entry exists, otherwise from the document source. Fresh results
    /// are written back to the cache whenever one is configured.
    pub async fn extract(
        &self,
        file_key: &str,
        prefix: Option<&str>,
        use_cache: bool,
    ) -> Result<Vec<FrameMetrics>> {
        let key = cache_key(file_key, prefix);

        if use_cache
            && let Some(cache) = &self.cache
            && let Some(frames) = cache.get::<Vec<FrameMetrics>>(&key)
        {
            return Ok(frames);
        }

        let root = self.source.fetch_document(file_key).await?;
        let frames = extract_frames(&root, prefix);
        info!(file_key, source = self.source.name(), frames = frames.len(), "frames extracted");

        if let Some(cache) = &self.cache
            && let Err(e) = cache.put(&key, &frames)
        {
            warn!(key = %key, error = %e, "failed to write cache entry");
        }
        Ok(frames)
    }

    pub fn profile(&self, frames: &[FrameMetrics]) -> Result<DesignProfile> {
        aggregate_with(frames, &self.thresholds)
    }

    /// Run the whole pipeline for one candidate.
    pub async fn evaluate(
        &self,
        reference: &DesignProfile,
        file_key: &str,
        prefix: Option<&str>,
        use_cache: bool,
    ) -> Result<EvaluationResult> {
        let frames = self.extract(file_key, prefix, use_cache).await?;
        if frames.is_empty() {
            return Err(EvalError::InsufficientData(format!(
                "no frames with text content found in {file_key}"
            )));
        }

        let candidate = self.profile(&frames)?;
        info!(
            file_key,
            frames = candidate.frame_count(),
            cognitive_load = %candidate.cognitive_load(),
            "candidate profile built"
        );

        let comparison = self.comparator.compare(reference, &candidate).await?;
        info!(
            comparator = self.comparator.name(),
            deviations = comparison.deviations.len(),
            confidence = %comparison.confidence,
            "comparison received"
        );

        let card = score_breakdown(reference, &candidate, &comparison.deviations, &self.policy);
        info!(file_key, score = card.score, penalties = card.penalties.len(), "score computed");

        Ok(EvaluationResult {
            file_key: file_key.to_string(),
            score: card.score,
            penalties: card.penalties,
            deviations: comparison.deviations,
            overall_assessment: comparison.overall_assessment,
            confidence: comparison.confidence,
            candidate_profile: candidate,
            reference_profile: reference.clone(),
            evaluated_at: Utc::now(),
        })
    }
}
