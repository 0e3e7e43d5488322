use tracing::debug;

use super::frame::{FrameMetrics, analyze_frame};
use super::node::{NodeKind, TreeNode};

/// Walk the document and analyze every qualifying frame, in pre-order.
///
/// A frame qualifies when it is a FRAME below the document root, its name
/// starts with `filter_prefix` (if given), and it holds at least one
/// non-empty TEXT node. Nested frames are reported alongside their parents.
pub fn extract_frames(document_root: &TreeNode, filter_prefix: Option<&str>) -> Vec<FrameMetrics> {
    let mut frames = Vec::new();
    walk(document_root, 0, filter_prefix, &mut frames);
    frames
}

fn walk(node: &TreeNode, depth: usize, filter_prefix: Option<&str>, out: &mut Vec<FrameMetrics>) {
    if qualifies(node, depth, filter_prefix) {
        let metrics = analyze_frame(node);
        debug!(
            frame = %metrics.name,
            words = metrics.total_words,
            buttons = metrics.button_count,
            "frame accepted"
        );
        out.push(metrics);
    }

    for child in &node.children {
        walk(child, depth + 1, filter_prefix, out);
    }
}

fn qualifies(node: &TreeNode, depth: usize, filter_prefix: Option<&str>) -> bool {
    if node.kind != NodeKind::Frame || depth == 0 {
        return false;
    }
    if let Some(prefix) = filter_prefix
        && !node.name.starts_with(prefix)
    {
        return false;
    }
    has_meaningful_content(node)
}

/// Whether the subtree contains at least one non-empty TEXT node.
pub fn has_meaningful_content(node: &TreeNode) -> bool {
    count_text_nodes(node) > 0
}

/// Number of non-empty TEXT nodes in the subtree, root included.
pub fn count_text_nodes(node: &TreeNode) -> usize {
    let own = usize::from(node.text_content().is_some());
    own + node.children.iter().map(count_text_nodes).sum::<usize>()
}
