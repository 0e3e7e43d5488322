use super::node::TreeNode;

const BUTTON_KEYWORDS: [&str; 3] = ["button", "btn", "cta"];
const INPUT_KEYWORDS: [&str; 4] = ["input", "field", "textfield", "textbox"];
const PROGRESS_KEYWORDS: [&str; 5] = ["progress", "stepper", "step", "indicator", "dots"];
const ILLUSTRATION_KEYWORD: &str = "illustration";

/// Semantic roles a single node plays. Roles are independent: a node named
/// "cta-input" is both a button and an input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeRoles {
    pub is_text: bool,
    pub is_button: bool,
    pub is_input: bool,
    pub is_progress_indicator: bool,
    pub is_decorative_image: bool,
}

pub fn classify(node: &TreeNode) -> NodeRoles {
    let name = node.name.to_lowercase();
    let name_has = |keywords: &[&str]| keywords.iter().any(|k| name.contains(k));

    NodeRoles {
        is_text: node.text_content().is_some(),
        is_button: name_has(&BUTTON_KEYWORDS),
        is_input: name_has(&INPUT_KEYWORDS),
        is_progress_indicator: name_has(&PROGRESS_KEYWORDS),
        is_decorative_image: node.kind.is_shape() && name.contains(ILLUSTRATION_KEYWORD),
    }
}
