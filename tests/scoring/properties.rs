use design_eval::design::{Deviation, Severity, aggregate, extract_frames, has_meaningful_content, score};

use crate::fixtures::{frame, onboarding_document, profile, uniform_profile};

#[test]
fn mean_words_stays_within_range() {
    let samples: [&[usize]; 4] = [&[0], &[3, 3, 3], &[1, 2, 10], &[7, 0, 13, 4, 4]];
    for words in samples {
        let frames: Vec<_> = words
            .iter()
            .map(|&w| frame("F", w, &[], false))
            .collect();
        let p = aggregate(&frames).unwrap();
        let [min, max] = p.text_metrics.word_range;
        assert!(p.mean_words() >= min as f64 && p.mean_words() <= max as f64);
    }
}

#[test]
fn single_frame_has_zero_spread() {
    let p = profile(&[frame("Only", 17, &["Go"], false)]);
    assert!(p.text_metrics.word_std_dev.abs() < f64::EPSILON);
    assert!(p.interaction_metrics.button_std_dev.abs() < f64::EPSILON);
}

#[test]
fn identical_button_sets_are_consistent() {
    let same = profile(&[
        frame("A", 5, &["Next", "Back"], false),
        frame("B", 5, &["Back", "Next"], false),
    ]);
    assert!(same.button_consistency());

    let empty = profile(&[frame("A", 5, &[], false), frame("B", 5, &[], false)]);
    assert!(empty.button_consistency());

    let three = profile(&[
        frame("A", 5, &["Next"], false),
        frame("B", 5, &["Skip"], false),
        frame("C", 5, &[], false),
    ]);
    assert!(!three.button_consistency());
}

#[test]
fn more_high_deviations_never_raise_the_score() {
    let reference = uniform_profile(40, &[true]);
    let candidate = uniform_profile(90, &[false]);

    let mut deviations = Vec::new();
    let mut previous = score(&reference, &candidate, &deviations);
    for i in 0..15 {
        deviations.push(Deviation {
            area: format!("Area {i}"),
            reference_value: String::new(),
            candidate_value: String::new(),
            impact: String::new(),
            severity: Severity::High,
        });
        let next = score(&reference, &candidate, &deviations);
        assert!(next <= previous);
        assert!((0.0..=10.0).contains(&next));
        assert!(((next * 10.0).round() - next * 10.0).abs() < 1e-9);
        previous = next;
    }
    assert!(previous.abs() < f64::EPSILON);
}

#[test]
fn walker_only_returns_frames_with_text() {
    let root = onboarding_document();
    let frames = extract_frames(&root, None);
    assert!(!frames.is_empty());
    assert!(frames.iter().all(|f| f.text_blocks > 0 && f.total_words > 0));
    assert!(has_meaningful_content(&root));
}

#[test]
fn prefix_filter_limits_frames() {
    let frames = extract_frames(&onboarding_document(), Some("Onboarding/"));
    assert_eq!(frames.len(), 2);
    assert!(frames[0].has_progress);
    assert_eq!(frames[1].input_fields, 1);
    assert_eq!(frames[1].button_names, ["Button/Primary"]);
}
