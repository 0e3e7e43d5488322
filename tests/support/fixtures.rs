#![allow(dead_code)]

use design_eval::design::{DesignProfile, FrameMetrics, NodeKind, TreeNode, aggregate};

pub fn frame(name: &str, words: usize, buttons: &[&str], has_progress: bool) -> FrameMetrics {
    FrameMetrics {
        name: name.to_string(),
        text_blocks: usize::from(words > 0),
        total_words: words,
        button_names: buttons.iter().map(ToString::to_string).collect(),
        button_count: buttons.len(),
        has_progress,
        input_fields: 0,
        decorative_images: 0,
    }
}

pub fn profile(frames: &[FrameMetrics]) -> DesignProfile {
    aggregate(frames).expect("non-empty frames")
}

/// Profile whose frames all have `words` words, one "Next" button, and the
/// given progress flags.
pub fn uniform_profile(words: usize, progress: &[bool]) -> DesignProfile {
    let frames: Vec<_> = progress
        .iter()
        .enumerate()
        .map(|(i, &p)| frame(&format!("Screen {i}"), words, &["Next"], p))
        .collect();
    profile(&frames)
}

pub fn words(n: usize) -> String {
    vec!["word"; n].join(" ")
}

/// A small onboarding document: three screens with text, one screen that is
/// only an illustration, and a non-frame group.
pub fn onboarding_document() -> TreeNode {
    TreeNode::new(NodeKind::Document, "Document").with_children(vec![TreeNode::new(
        NodeKind::Canvas,
        "Page 1",
    )
    .with_children(vec![
        TreeNode::frame(
            "Onboarding/Welcome",
            vec![
                TreeNode::text("Title", "Welcome to Acme"),
                TreeNode::text("Body", "Track every order in one place"),
                TreeNode::new(NodeKind::Instance, "Button/Primary")
                    .with_children(vec![TreeNode::text("Label", "Get started")]),
                TreeNode::new(NodeKind::Group, "Progress dots"),
            ],
        ),
        TreeNode::frame(
            "Onboarding/Account",
            vec![
                TreeNode::text("Title", "Create your account"),
                TreeNode::new(NodeKind::Instance, "Email input field"),
                TreeNode::new(NodeKind::Instance, "Button/Primary")
                    .with_children(vec![TreeNode::text("Label", "Continue")]),
                TreeNode::new(NodeKind::Group, "Progress dots"),
            ],
        ),
        TreeNode::frame(
            "Onboarding/Art",
            vec![TreeNode::new(NodeKind::Rectangle, "Illustration-01")],
        ),
        TreeNode::frame(
            "Settings",
            vec![TreeNode::text("Title", "Notification preferences")],
        ),
        TreeNode::new(NodeKind::Group, "Loose notes")
            .with_children(vec![TreeNode::text("Note", "not a frame")]),
    ])])
}
