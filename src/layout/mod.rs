//! Left-to-right hierarchical layout.
//!
//! Columns come from longest-path levels over a cycle-broken copy of the
//! edges; rows are stacked per column and centered on a shared midline. A
//! final compaction pass pushes any residual same-column overlap downward.

mod ranking;
pub(crate) mod types;
pub use types::*;
use ranking::*;

use crate::config::LayoutConfig;
use crate::ir::{Edge, Node, Position, Rect};
use std::collections::{BTreeMap, HashMap};

/// Positions for every node using the fixed layout policy.
pub fn compute_layout(nodes: &[Node], edges: &[Edge], origin: Position) -> BTreeMap<String, Position> {
    compute_layout_with_config(nodes, edges, origin, &LayoutConfig::default()).positions()
}

/// Lays the graph out and hands each node's new position to `apply`, once per
/// node in input order. The caller owns the mutation.
pub fn apply_layout<F>(
    nodes: &[Node],
    edges: &[Edge],
    origin: Position,
    config: &LayoutConfig,
    mut apply: F,
) -> GraphLayout
where
    F: FnMut(&str, Position),
{
    let layout = compute_layout_with_config(nodes, edges, origin, config);
    let mut seen: Vec<&str> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if seen.contains(&node.id.as_str()) {
            continue;
        }
        seen.push(node.id.as_str());
        if let Some(placed) = layout.nodes.get(&node.id) {
            apply(&node.id, placed.position());
        }
    }
    layout
}

pub fn compute_layout_with_config(
    nodes: &[Node],
    edges: &[Edge],
    origin: Position,
    config: &LayoutConfig,
) -> GraphLayout {
    // duplicate ids collapse onto their first occurrence
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    let mut ordered: Vec<&Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if !index.contains_key(node.id.as_str()) {
            index.insert(node.id.as_str(), ordered.len());
            ordered.push(node);
        }
    }
    if ordered.is_empty() {
        return GraphLayout {
            origin,
            ..Default::default()
        };
    }

    let mut level_graph = LevelGraph::build(&index, edges);
    let removed = break_cycles(&mut level_graph, config.cycle_breaking);
    if !removed.is_empty() {
        tracing::debug!(count = removed.len(), "broke cycles in leveling graph");
    }
    let leveling = assign_levels(&level_graph);
    let levels = fill_unleveled(&leveling.levels);

    let sizes: Vec<(f32, f32)> = ordered
        .iter()
        .map(|node| node.size_or(config.default_node_width, config.default_node_height))
        .collect();
    let offsets = resolve_overlaps(place_columns(&levels, &sizes, config), &sizes, config);

    let level_count = levels.iter().max().map(|max| max + 1).unwrap_or(0);
    let mut placed = BTreeMap::new();
    for (idx, node) in ordered.iter().enumerate() {
        let (x, y) = offsets[idx];
        let (width, height) = sizes[idx];
        placed.insert(
            node.id.clone(),
            NodeLayout {
                id: node.id.clone(),
                level: levels[idx],
                x: origin.x + x,
                y: origin.y + y,
                width,
                height,
            },
        );
    }

    tracing::debug!(
        nodes = placed.len(),
        levels = level_count,
        capped = leveling.capped,
        "computed layout"
    );

    GraphLayout {
        origin,
        nodes: placed,
        removed_edges: removed
            .into_iter()
            .map(|(from, to)| (ordered[from].id.clone(), ordered[to].id.clone()))
            .collect(),
        level_count,
        capped: leveling.capped,
    }
}

/// Offsets from the origin for each node, indexed like `levels`.
fn place_columns(levels: &[usize], sizes: &[(f32, f32)], config: &LayoutConfig) -> Vec<(f32, f32)> {
    let mut buckets: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, &level) in levels.iter().enumerate() {
        buckets.entry(level).or_default().push(idx);
    }

    let column_height = |bucket: &[usize]| -> f32 {
        let heights: f32 = bucket.iter().map(|&idx| sizes[idx].1).sum();
        heights + config.vertical_spacing * bucket.len().saturating_sub(1) as f32
    };
    let tallest = buckets
        .values()
        .map(|bucket| column_height(bucket.as_slice()))
        .fold(0.0f32, f32::max);
    let midline = config.level_padding + tallest * 0.5;

    let mut offsets = vec![(0.0f32, 0.0f32); levels.len()];
    let mut x = config.level_padding;
    for bucket in buckets.values() {
        let mut y = midline - column_height(bucket.as_slice()) * 0.5;
        let mut widest = 0.0f32;
        for &idx in bucket {
            let (width, height) = sizes[idx];
            offsets[idx] = (x, y);
            y += height + config.vertical_spacing;
            widest = widest.max(width);
        }
        x += widest + config.horizontal_spacing;
    }
    offsets
}

/// Walks nodes by `(x, y)` and pushes a node below any earlier node in the
/// same column that it overlaps. Only ever increases y.
fn resolve_overlaps(
    mut offsets: Vec<(f32, f32)>,
    sizes: &[(f32, f32)],
    config: &LayoutConfig,
) -> Vec<(f32, f32)> {
    let mut order: Vec<usize> = (0..offsets.len()).collect();
    order.sort_by(|&a, &b| {
        offsets[a]
            .0
            .total_cmp(&offsets[b].0)
            .then(offsets[a].1.total_cmp(&offsets[b].1))
            .then(a.cmp(&b))
    });

    let same_column = config.horizontal_spacing * 0.5;
    let rect = |offset: (f32, f32), size: (f32, f32)| Rect::new(offset.0, offset.1, size.0, size.1);
    let mut placed: Vec<usize> = Vec::with_capacity(order.len());
    for idx in order {
        // each push lands below a placed node, so this settles within placed.len() rounds
        for _ in 0..=placed.len() {
            let mut moved = false;
            for &other in &placed {
                if (offsets[idx].0 - offsets[other].0).abs() >= same_column {
                    continue;
                }
                if rect(offsets[idx], sizes[idx]).intersects(&rect(offsets[other], sizes[other])) {
                    offsets[idx].1 = offsets[other].1 + sizes[other].1 + config.vertical_spacing;
                    moved = true;
                }
            }
            if !moved {
                break;
            }
        }
        placed.push(idx);
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CycleBreaking, HORIZONTAL_SPACING, VERTICAL_SPACING};
    use crate::ir::NodeKind;

    fn action(id: &str) -> Node {
        Node::new(id, NodeKind::Action)
    }

    #[test]
    fn empty_input_yields_empty_layout() {
        assert!(compute_layout(&[], &[], Position::ORIGIN).is_empty());
        let layout = compute_layout_with_config(&[], &[], Position::ORIGIN, &LayoutConfig::default());
        assert_eq!(layout.bounds(), None);
        assert_eq!(layout.level_count, 0);
    }

    #[test]
    fn fan_out_shares_a_column() {
        let nodes = vec![Node::new("A", NodeKind::Goal), action("B"), action("C")];
        let edges = vec![Edge::new("A", "B"), Edge::new("A", "C")];
        let layout = compute_layout_with_config(&nodes, &edges, Position::ORIGIN, &LayoutConfig::default());

        assert_eq!(layout.level("A"), Some(0));
        assert_eq!(layout.level("B"), Some(1));
        assert_eq!(layout.level("C"), Some(1));

        let a = &layout.nodes["A"];
        let b = &layout.nodes["B"];
        let c = &layout.nodes["C"];
        assert_eq!(b.x, c.x);
        assert_ne!(a.x, b.x);
        assert_eq!(b.x, 50.0 + 280.0 + HORIZONTAL_SPACING);
        assert!((c.y - b.y).abs() >= VERTICAL_SPACING);
        assert_eq!(c.y - b.y, 120.0 + VERTICAL_SPACING);
    }

    #[test]
    fn columns_center_on_shared_midline() {
        let nodes = vec![Node::new("A", NodeKind::Goal), action("B"), action("C")];
        let edges = vec![Edge::new("A", "B"), Edge::new("A", "C")];
        let layout = compute_layout_with_config(&nodes, &edges, Position::ORIGIN, &LayoutConfig::default());

        let a = layout.nodes["A"].rect();
        let b = layout.nodes["B"].rect();
        let c = layout.nodes["C"].rect();
        let column_mid = (b.y + c.bottom()) * 0.5;
        assert_eq!(a.center().y, column_mid);
        assert_eq!(b.y, 50.0);
    }

    #[test]
    fn column_width_follows_widest_node() {
        let nodes = vec![
            action("A"),
            action("B").with_size(500.0, 100.0),
            action("C"),
            action("D"),
        ];
        let edges = vec![Edge::new("A", "B"), Edge::new("A", "C"), Edge::new("C", "D")];
        let layout = compute_layout_with_config(&nodes, &edges, Position::ORIGIN, &LayoutConfig::default());
        let d = &layout.nodes["D"];
        assert_eq!(d.x, 50.0 + (280.0 + 150.0) + (500.0 + 150.0));
    }

    #[test]
    fn origin_offsets_every_position() {
        let nodes = vec![action("A"), action("B")];
        let edges = vec![Edge::new("A", "B")];
        let base = compute_layout(&nodes, &edges, Position::ORIGIN);
        let shifted = compute_layout(&nodes, &edges, Position::new(-300.0, 40.0));
        for (id, pos) in &base {
            assert_eq!(shifted[id].x, pos.x - 300.0);
            assert_eq!(shifted[id].y, pos.y + 40.0);
        }
    }

    #[test]
    fn cycle_terminates_and_reports_removed_edge() {
        let nodes = vec![action("A"), action("B"), action("C")];
        let edges = vec![Edge::new("A", "B"), Edge::new("B", "C"), Edge::new("C", "A")];
        let layout = compute_layout_with_config(&nodes, &edges, Position::ORIGIN, &LayoutConfig::default());
        assert_eq!(layout.nodes.len(), 3);
        assert_eq!(layout.removed_edges, vec![("C".to_string(), "A".to_string())]);
        assert_eq!(layout.level("A"), Some(0));
        assert_eq!(layout.level("B"), Some(1));
        assert_eq!(layout.level("C"), Some(2));
        assert!(!layout.capped);
    }

    #[test]
    fn single_pass_leaves_second_cycle_to_fallback() {
        let config = LayoutConfig {
            cycle_breaking: CycleBreaking::SinglePass,
            ..Default::default()
        };
        let nodes = vec![action("A"), action("B"), action("C"), action("D")];
        let edges = vec![
            Edge::new("A", "B"),
            Edge::new("B", "A"),
            Edge::new("C", "D"),
            Edge::new("D", "C"),
        ];
        let layout = compute_layout_with_config(&nodes, &edges, Position::ORIGIN, &config);
        assert_eq!(layout.removed_edges.len(), 1);
        assert_eq!(layout.level("A"), Some(0));
        assert_eq!(layout.level("B"), Some(1));
        assert_eq!(layout.level("C"), Some(2));
        assert_eq!(layout.level("D"), Some(2));
    }

    #[test]
    fn isolated_node_is_its_own_root() {
        let nodes = vec![action("A"), action("B"), action("lonely")];
        let edges = vec![Edge::new("A", "B")];
        let layout = compute_layout_with_config(&nodes, &edges, Position::ORIGIN, &LayoutConfig::default());
        // an isolated node has in-degree 0, so it is a root like any other
        assert_eq!(layout.level("lonely"), Some(0));
        assert_ne!(layout.nodes["lonely"].y, layout.nodes["A"].y);
    }

    #[test]
    fn dangling_and_duplicate_edges_are_ignored() {
        let nodes = vec![action("A"), action("B")];
        let edges = vec![
            Edge::new("A", "B"),
            Edge::new("A", "B"),
            Edge::new("A", "ghost"),
            Edge::new("ghost", "A"),
        ];
        let layout = compute_layout_with_config(&nodes, &edges, Position::ORIGIN, &LayoutConfig::default());
        assert_eq!(layout.level("A"), Some(0));
        assert_eq!(layout.level("B"), Some(1));
        assert!(layout.removed_edges.is_empty());
    }

    #[test]
    fn duplicate_node_ids_collapse() {
        let nodes = vec![action("A"), action("A"), action("B")];
        let layout = compute_layout(&nodes, &[], Position::ORIGIN);
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn apply_layout_calls_back_once_per_node() {
        let nodes = vec![action("A"), action("B"), action("A")];
        let edges = vec![Edge::new("A", "B")];
        let mut calls = Vec::new();
        let layout = apply_layout(
            &nodes,
            &edges,
            Position::ORIGIN,
            &LayoutConfig::default(),
            |id, pos| calls.push((id.to_string(), pos)),
        );
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "A");
        assert_eq!(calls[1].0, "B");
        assert_eq!(calls[1].1, layout.nodes["B"].position());
    }

    #[test]
    fn overlap_pass_pushes_later_node_down() {
        let config = LayoutConfig::default();
        let sizes = vec![(280.0, 120.0), (280.0, 120.0), (280.0, 120.0)];
        // all three stacked on the same spot, the third one in another column
        let offsets = vec![(50.0, 50.0), (60.0, 50.0), (480.0, 50.0)];
        let resolved = resolve_overlaps(offsets, &sizes, &config);
        assert_eq!(resolved[0], (50.0, 50.0));
        assert_eq!(resolved[1], (60.0, 50.0 + 120.0 + VERTICAL_SPACING));
        assert_eq!(resolved[2], (480.0, 50.0));
    }

    #[test]
    fn overlap_pass_settles_against_several_nodes() {
        let config = LayoutConfig::default();
        let sizes = vec![(280.0, 120.0), (280.0, 120.0), (280.0, 120.0)];
        let offsets = vec![(0.0, 0.0), (0.0, 200.0), (0.0, 100.0)];
        let resolved = resolve_overlaps(offsets, &sizes, &config);
        let rects: Vec<Rect> = resolved
            .iter()
            .zip(&sizes)
            .map(|(o, s)| Rect::new(o.0, o.1, s.0, s.1))
            .collect();
        for i in 0..rects.len() {
            for j in (i + 1)..rects.len() {
                assert!(!rects[i].intersects(&rects[j]), "{i} overlaps {j}");
            }
        }
    }

    #[test]
    fn bounds_cover_all_nodes() {
        let nodes = vec![action("A"), action("B"), action("C")];
        let edges = vec![Edge::new("A", "B"), Edge::new("A", "C")];
        let layout = compute_layout_with_config(&nodes, &edges, Position::ORIGIN, &LayoutConfig::default());
        let bounds = layout.bounds().unwrap();
        for node in layout.nodes.values() {
            assert!(node.x >= bounds.x && node.rect().right() <= bounds.right());
            assert!(node.y >= bounds.y && node.rect().bottom() <= bounds.bottom());
        }
        assert_eq!(layout.columns(), vec![vec!["A".to_string()], vec!["B".to_string(), "C".to_string()]]);
    }
}
