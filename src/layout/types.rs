use std::collections::BTreeMap;

use crate::ir::{Position, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct NodeLayout {
    pub id: String,
    pub level: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NodeLayout {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GraphLayout {
    pub origin: Position,
    pub nodes: BTreeMap<String, NodeLayout>,
    /// `(source, target)` pairs dropped from the leveling graph to break cycles.
    pub removed_edges: Vec<(String, String)>,
    pub level_count: usize,
    /// Set when the leveling caps stopped the traversal early.
    pub capped: bool,
}

impl GraphLayout {
    pub fn positions(&self) -> BTreeMap<String, Position> {
        self.nodes
            .iter()
            .map(|(id, node)| (id.clone(), node.position()))
            .collect()
    }

    pub fn level(&self, id: &str) -> Option<usize> {
        self.nodes.get(id).map(|node| node.level)
    }

    /// Ids per level, each column in placement order (top to bottom).
    pub fn columns(&self) -> Vec<Vec<String>> {
        let mut columns: Vec<Vec<&NodeLayout>> = vec![Vec::new(); self.level_count];
        for node in self.nodes.values() {
            if let Some(column) = columns.get_mut(node.level) {
                column.push(node);
            }
        }
        columns
            .into_iter()
            .map(|mut column| {
                column.sort_by(|a, b| a.y.total_cmp(&b.y));
                column.into_iter().map(|node| node.id.clone()).collect()
            })
            .collect()
    }

    /// Bounding rectangle of every placed node, `None` when empty.
    pub fn bounds(&self) -> Option<Rect> {
        let mut iter = self.nodes.values();
        let first = iter.next()?.rect();
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.right(), first.bottom());
        for node in iter {
            let rect = node.rect();
            min_x = min_x.min(rect.x);
            min_y = min_y.min(rect.y);
            max_x = max_x.max(rect.right());
            max_y = max_y.max(rect.bottom());
        }
        Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }
}
