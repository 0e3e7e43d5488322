use std::sync::Arc;

use design_eval::EvalError;
use design_eval::design::{Confidence, DesignProfile, Deviation, Severity, TreeNode};
use design_eval::evaluate::Evaluator;
use design_eval::providers::{BoxFuture, Comparator, Comparison, DocumentSource};

use crate::fixtures::{onboarding_document, uniform_profile};

struct FixtureSource;

impl DocumentSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    fn fetch_document<'a>(
        &'a self,
        _file_key: &'a str,
    ) -> BoxFuture<'a, design_eval::Result<TreeNode>> {
        Box::pin(async { Ok(onboarding_document()) })
    }
}

struct ScriptedComparator {
    deviations: Vec<Deviation>,
}

impl Comparator for ScriptedComparator {
    fn name(&self) -> &str {
        "scripted"
    }

    fn compare<'a>(
        &'a self,
        _reference: &'a DesignProfile,
        _candidate: &'a DesignProfile,
    ) -> BoxFuture<'a, design_eval::Result<Comparison>> {
        let comparison = Comparison {
            deviations: self.deviations.clone(),
            overall_assessment: "Mostly aligned".to_string(),
            confidence: Confidence::Medium,
        };
        Box::pin(async move { Ok(comparison) })
    }
}

struct SilentComparator;

impl Comparator for SilentComparator {
    fn name(&self) -> &str {
        "silent"
    }

    fn compare<'a>(
        &'a self,
        _reference: &'a DesignProfile,
        _candidate: &'a DesignProfile,
    ) -> BoxFuture<'a, design_eval::Result<Comparison>> {
        Box::pin(async { Err(EvalError::Comparator("empty reply".to_string())) })
    }
}

#[tokio::test]
async fn onboarding_candidate_is_scored_with_penalties() {
    // Reference: always shows progress, ~4 words per screen.
    let reference = uniform_profile(4, &[true, true]);
    let evaluator = Evaluator::new(
        Arc::new(FixtureSource),
        Arc::new(ScriptedComparator {
            deviations: vec![Deviation {
                area: "Copy length".to_string(),
                reference_value: "4".to_string(),
                candidate_value: "6".to_string(),
                impact: "Slightly more reading".to_string(),
                severity: Severity::High,
            }],
        }),
    );

    let result = evaluator
        .evaluate(&reference, "CANDIDATE", Some("Onboarding/"), false)
        .await
        .unwrap();

    assert_eq!(result.candidate_profile.frame_count(), 2);
    assert!((result.candidate_profile.progress_ratio() - 1.0).abs() < 1e-9);
    assert_eq!(result.confidence, Confidence::Medium);
    assert_eq!(result.deviations.len(), 1);
    let expected = 10.0 - result.penalties.iter().map(|p| p.amount).sum::<f64>();
    assert!((result.score - expected).abs() < 1e-9);
    assert!(result.penalties.iter().any(|p| p.reason.contains("Copy length")));
}

#[tokio::test]
async fn comparator_without_answer_yields_no_score() {
    let evaluator = Evaluator::new(Arc::new(FixtureSource), Arc::new(SilentComparator));
    let err = evaluator
        .evaluate(&uniform_profile(10, &[false]), "CANDIDATE", None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, EvalError::Comparator(_)));
}

#[tokio::test]
async fn empty_comparison_still_scores() {
    let reference = uniform_profile(6, &[false]);
    let evaluator = Evaluator::new(
        Arc::new(FixtureSource),
        Arc::new(ScriptedComparator {
            deviations: Vec::new(),
        }),
    );
    let result = evaluator
        .evaluate(&reference, "CANDIDATE", None, false)
        .await
        .unwrap();
    assert!(result.deviations.is_empty());
    assert!((0.0..=10.0).contains(&result.score));
}
