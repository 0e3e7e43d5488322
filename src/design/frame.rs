use serde::{Deserialize, Serialize};

use super::classify::classify;
use super::node::TreeNode;

/// Structural metrics for one screen of a design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameMetrics {
    #[serde(rename = "frame_name")]
    pub name: String,
    /// Non-empty text blocks only.
    pub text_blocks: usize,
    pub total_words: usize,
    /// Every button-like node in visit order, duplicates kept.
    #[serde(rename = "buttons")]
    pub button_names: Vec<String>,
    pub button_count: usize,
    pub has_progress: bool,
    pub input_fields: usize,
    #[serde(rename = "images")]
    pub decorative_images: usize,
}

/// Counters for a single frame scan. Lives only for the duration of
/// [`analyze_frame`].
#[derive(Debug, Default)]
struct FrameAccumulator<'a> {
    texts: Vec<&'a str>,
    button_names: Vec<String>,
    inputs: usize,
    has_progress: bool,
    decorative_images: usize,
}

impl<'a> FrameAccumulator<'a> {
    fn visit(&mut self, node: &'a TreeNode) {
        let roles = classify(node);

        if roles.is_text
            && let Some(text) = node.text_content()
        {
            self.texts.push(text);
        }
        if roles.is_button {
            self.button_names.push(node.name.clone());
        }
        if roles.is_input {
            self.inputs += 1;
        }
        if roles.is_progress_indicator {
            self.has_progress = true;
        }
        if roles.is_decorative_image {
            self.decorative_images += 1;
        }

        for child in &node.children {
            self.visit(child);
        }
    }

    fn finish(self, name: &str) -> FrameMetrics {
        let total_words = self
            .texts
            .iter()
            .map(|text| text.split_whitespace().count())
            .sum();

        FrameMetrics {
            name: name.to_string(),
            text_blocks: self.texts.len(),
            total_words,
            button_count: self.button_names.len(),
            button_names: self.button_names,
            has_progress: self.has_progress,
            input_fields: self.inputs,
            decorative_images: self.decorative_images,
        }
    }
}

/// Scan the whole subtree under `frame_root` (the root included) and
/// summarize it.
pub fn analyze_frame(frame_root: &TreeNode) -> FrameMetrics {
    let mut acc = FrameAccumulator::default();
    acc.visit(frame_root);
    acc.finish(&frame_root.name)
}
