use serde::{Deserialize, Serialize};

/// Node type tag as reported by the design-file service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Component,
    Instance,
    Text,
    Rectangle,
    Ellipse,
    Vector,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Document => "DOCUMENT",
            Self::Canvas => "CANVAS",
            Self::Frame => "FRAME",
            Self::Group => "GROUP",
            Self::Section => "SECTION",
            Self::Component => "COMPONENT",
            Self::Instance => "INSTANCE",
            Self::Text => "TEXT",
            Self::Rectangle => "RECTANGLE",
            Self::Ellipse => "ELLIPSE",
            Self::Vector => "VECTOR",
            Self::Other(tag) => tag,
        }
    }

    /// Shapes that count as decorative artwork when named as an illustration.
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse | Self::Vector)
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "DOCUMENT" => Self::Document,
            "CANVAS" => Self::Canvas,
            "FRAME" => Self::Frame,
            "GROUP" => Self::Group,
            "SECTION" => Self::Section,
            "COMPONENT" => Self::Component,
            "INSTANCE" => Self::Instance,
            "TEXT" => Self::Text,
            "RECTANGLE" => Self::Rectangle,
            "ELLIPSE" => Self::Ellipse,
            "VECTOR" => Self::Vector,
            _ => Self::Other(tag),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Wire shape of a node. Every field is optional on the wire; defaults are
/// applied once here so the traversal code never sees a missing field.
#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    characters: Option<String>,
    #[serde(default)]
    children: Option<Vec<TreeNode>>,
}

/// One node of a design document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNode")]
pub struct TreeNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    pub characters: String,
    pub children: Vec<TreeNode>,
}

impl From<RawNode> for TreeNode {
    fn from(raw: RawNode) -> Self {
        Self {
            kind: raw.kind.map_or_else(|| NodeKind::Other(String::new()), NodeKind::from),
            name: raw.name.unwrap_or_default(),
            characters: raw.characters.unwrap_or_default(),
            children: raw.children.unwrap_or_default(),
        }
    }
}

impl TreeNode {
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            characters: String::new(),
            children: Vec::new(),
        }
    }

    pub fn frame(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self::new(NodeKind::Frame, name).with_children(children)
    }

    pub fn text(name: impl Into<String>, characters: impl Into<String>) -> Self {
        Self {
            characters: characters.into(),
            ..Self::new(NodeKind::Text, name)
        }
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Trimmed text content when this is a TEXT node with something in it.
    pub fn text_content(&self) -> Option<&str> {
        if self.kind != NodeKind::Text {
            return None;
        }
        let trimmed = self.characters.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
