use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Base,
    Goal,
    Idea,
    Action,
    Risk,
    Resource,
    Placeholder,
    Stakeholder,
    Boundary,
    Group,
}

impl NodeKind {
    pub const ALL: [NodeKind; 10] = [
        NodeKind::Base,
        NodeKind::Goal,
        NodeKind::Idea,
        NodeKind::Action,
        NodeKind::Risk,
        NodeKind::Resource,
        NodeKind::Placeholder,
        NodeKind::Stakeholder,
        NodeKind::Boundary,
        NodeKind::Group,
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "base" => Some(Self::Base),
            "goal" => Some(Self::Goal),
            "idea" => Some(Self::Idea),
            "action" => Some(Self::Action),
            "risk" => Some(Self::Risk),
            "resource" => Some(Self::Resource),
            "placeholder" => Some(Self::Placeholder),
            "stakeholder" => Some(Self::Stakeholder),
            "boundary" => Some(Self::Boundary),
            "group" => Some(Self::Group),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Goal => "goal",
            Self::Idea => "idea",
            Self::Action => "action",
            Self::Risk => "risk",
            Self::Resource => "resource",
            Self::Placeholder => "placeholder",
            Self::Stakeholder => "stakeholder",
            Self::Boundary => "boundary",
            Self::Group => "group",
        }
    }

    /// Group containers carry no process semantics.
    pub fn is_group(self) -> bool {
        self == Self::Group
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeWeight {
    #[default]
    Strong,
    Weak,
    Uncertain,
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle, `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Strict intersection: rectangles that only share an edge do not overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Inclusive containment, a point on the border counts as inside.
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Group title; only meaningful for [`NodeKind::Group`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            width: None,
            height: None,
            x: 0.0,
            y: 0.0,
            title: None,
            color: None,
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Footprint using the measured size when present, the fallback otherwise.
    pub fn size_or(&self, default_width: f32, default_height: f32) -> (f32, f32) {
        (
            self.width.filter(|w| w.is_finite() && *w > 0.0).unwrap_or(default_width),
            self.height.filter(|h| h.is_finite() && *h > 0.0).unwrap_or(default_height),
        )
    }

    pub fn rect_or(&self, default_width: f32, default_height: f32) -> Rect {
        let (width, height) = self.size_or(default_width, default_height);
        Rect::new(self.x, self.y, width, height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub weight: EdgeWeight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: EdgeWeight::Strong,
            label: None,
        }
    }

    pub fn with_weight(mut self, weight: EdgeWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Missing and whitespace-only labels both count as unlabeled.
    pub fn has_label(&self) -> bool {
        self.label
            .as_deref()
            .map(|label| !label.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_tokens_case_insensitively() {
        assert_eq!(NodeKind::from_token("Goal"), Some(NodeKind::Goal));
        assert_eq!(NodeKind::from_token(" stakeholder "), Some(NodeKind::Stakeholder));
        assert_eq!(NodeKind::from_token("widget"), None);
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_token(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn blank_labels_are_unlabeled() {
        assert!(!Edge::new("a", "b").has_label());
        assert!(!Edge::new("a", "b").with_label("   ").has_label());
        assert!(Edge::new("a", "b").with_label("next").has_label());
    }

    #[test]
    fn touching_rects_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(0.0, 10.0, 10.0, 10.0);
        let c = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }

    #[test]
    fn invalid_measured_size_falls_back() {
        let node = Node::new("n", NodeKind::Action).with_size(0.0, f32::NAN);
        assert_eq!(node.size_or(280.0, 120.0), (280.0, 120.0));
        let node = Node::new("n", NodeKind::Action).with_size(300.0, 90.0);
        assert_eq!(node.size_or(280.0, 120.0), (300.0, 90.0));
    }
}
