//! Group containment.
//!
//! Membership is spatial: a node belongs to the first group (in input order)
//! whose rectangle contains the node's center. Nothing here is stored; callers
//! recompute after every move or resize.

use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::ir::Node;

/// Maps each group id to the ids of the nodes it contains, in input order.
pub fn assign_groups(nodes: &[Node], config: &LayoutConfig) -> BTreeMap<String, Vec<String>> {
    let groups: Vec<&Node> = nodes.iter().filter(|node| node.kind.is_group()).collect();
    let mut members: BTreeMap<String, Vec<String>> = groups
        .iter()
        .map(|group| (group.id.clone(), Vec::new()))
        .collect();

    for node in nodes.iter().filter(|node| !node.kind.is_group()) {
        let center = node
            .rect_or(config.default_node_width, config.default_node_height)
            .center();
        let owner = groups.iter().find(|group| {
            group
                .rect_or(config.default_node_width, config.default_node_height)
                .contains(center)
        });
        if let Some(group) = owner {
            if let Some(list) = members.get_mut(&group.id) {
                list.push(node.id.clone());
            }
        }
    }

    members
}

/// Group id owning `node_id`, if any.
pub fn owning_group(nodes: &[Node], node_id: &str, config: &LayoutConfig) -> Option<String> {
    assign_groups(nodes, config)
        .into_iter()
        .find(|(_, members)| members.iter().any(|id| id == node_id))
        .map(|(group_id, _)| group_id)
}

/// Moves a group and everything it contains by `(dx, dy)`. Returns the ids
/// that moved, group first.
pub fn translate_members(
    nodes: &mut [Node],
    group_id: &str,
    dx: f32,
    dy: f32,
    config: &LayoutConfig,
) -> Vec<String> {
    let members = assign_groups(nodes, config)
        .remove(group_id)
        .unwrap_or_default();
    let mut moved = Vec::with_capacity(members.len() + 1);
    for node in nodes.iter_mut() {
        if node.id == group_id && node.kind.is_group() {
            node.x += dx;
            node.y += dy;
            moved.insert(0, node.id.clone());
        } else if members.contains(&node.id) {
            node.x += dx;
            node.y += dy;
            moved.push(node.id.clone());
        }
    }
    moved
}
