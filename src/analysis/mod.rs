//! Process-completeness analysis.
//!
//! Scores a graph snapshot against a fixed list of planning heuristics. The
//! result is a pure function of the nodes and edges passed in.

mod rules;
pub(crate) mod types;
pub use types::*;
use rules::*;

use crate::config::AnalysisConfig;
use crate::ir::{Edge, EdgeWeight, Node, NodeKind};
use std::collections::{HashMap, HashSet, VecDeque};

/// Kinds a complete plan is expected to contain.
pub const EXPECTED_KINDS: [NodeKind; 7] = [
    NodeKind::Goal,
    NodeKind::Action,
    NodeKind::Risk,
    NodeKind::Resource,
    NodeKind::Stakeholder,
    NodeKind::Boundary,
    NodeKind::Placeholder,
];

pub fn analyze_process(nodes: &[Node], edges: &[Edge]) -> ProcessAnalysis {
    analyze_process_with_config(nodes, edges, &AnalysisConfig::default())
}

pub fn analyze_process_with_config(
    nodes: &[Node],
    edges: &[Edge],
    config: &AnalysisConfig,
) -> ProcessAnalysis {
    let statistics = collect_statistics(nodes, edges, config);
    let isolated = find_isolated_nodes(nodes, edges);
    let group_count = nodes.iter().filter(|node| node.kind.is_group()).count();

    let ctx = RuleContext {
        stats: &statistics,
        isolated: &isolated,
        group_count,
    };
    let insights = evaluate(&ctx, config);
    let score = score_insights(&insights, config);

    tracing::debug!(
        score,
        insights = insights.len(),
        nodes = statistics.total_nodes,
        "analyzed process"
    );

    ProcessAnalysis {
        score,
        insights,
        statistics,
    }
}

/// 100 minus the per-severity penalty of every insight, clamped to `0..=100`.
pub fn score_insights(insights: &[Insight], config: &AnalysisConfig) -> u8 {
    let penalty: i64 = insights
        .iter()
        .map(|insight| match insight.severity {
            Severity::High => i64::from(config.high_penalty),
            Severity::Medium => i64::from(config.medium_penalty),
            Severity::Low => i64::from(config.low_penalty),
        })
        .sum();
    (100 - penalty).clamp(0, 100) as u8
}

fn collect_statistics(nodes: &[Node], edges: &[Edge], config: &AnalysisConfig) -> Statistics {
    let mut kind_counts = NodeKind::ALL
        .iter()
        .filter(|kind| !kind.is_group())
        .map(|&kind| (kind, 0usize))
        .collect::<std::collections::BTreeMap<_, _>>();
    let mut total_nodes = 0;
    for node in nodes.iter().filter(|node| !node.kind.is_group()) {
        *kind_counts.entry(node.kind).or_insert(0) += 1;
        total_nodes += 1;
    }
    let has = |kind: NodeKind| kind_counts.get(&kind).copied().unwrap_or(0) > 0;
    let missing_kinds = EXPECTED_KINDS
        .iter()
        .copied()
        .filter(|&kind| !has(kind))
        .collect();

    Statistics {
        total_nodes,
        missing_kinds,
        edge_count: edges.len(),
        unlabeled_edges: edges.iter().filter(|edge| !edge.has_label()).count(),
        has_iteration_loop: has_feedback_loop(nodes, edges, config.backward_edge_distance),
        has_graph_cycle: has_graph_cycle(nodes, edges),
        has_risk: has(NodeKind::Risk),
        has_resource: has(NodeKind::Resource),
        has_stakeholder: has(NodeKind::Stakeholder),
        has_boundary: has(NodeKind::Boundary),
        kind_counts,
    }
}

/// True when an edge is reverse-weighted or points more than
/// `backward_distance` to the left of its source. This reads drawn positions,
/// so it can miss cycles drawn left-to-right and flag nodes dragged backward.
pub fn has_feedback_loop(nodes: &[Node], edges: &[Edge], backward_distance: f32) -> bool {
    if edges.iter().any(|edge| edge.weight == EdgeWeight::Reverse) {
        return true;
    }
    let xs: HashMap<&str, f32> = nodes.iter().map(|node| (node.id.as_str(), node.x)).collect();
    edges.iter().any(|edge| {
        match (xs.get(edge.source.as_str()), xs.get(edge.target.as_str())) {
            (Some(&source_x), Some(&target_x)) => target_x < source_x - backward_distance,
            _ => false,
        }
    })
}

/// Topological cycle check over non-group nodes (Kahn's algorithm). Self
/// loops count as cycles.
pub fn has_graph_cycle(nodes: &[Node], edges: &[Edge]) -> bool {
    let ids: HashSet<&str> = nodes
        .iter()
        .filter(|node| !node.kind.is_group())
        .map(|node| node.id.as_str())
        .collect();
    let mut children: HashMap<&str, HashSet<&str>> = HashMap::new();
    for edge in edges {
        let (source, target) = (edge.source.as_str(), edge.target.as_str());
        if ids.contains(source) && ids.contains(target) {
            children.entry(source).or_default().insert(target);
        }
    }
    let mut indeg: HashMap<&str, usize> = ids.iter().map(|&id| (id, 0)).collect();
    for targets in children.values() {
        for target in targets {
            if let Some(deg) = indeg.get_mut(target) {
                *deg += 1;
            }
        }
    }

    let mut queue: VecDeque<&str> = indeg
        .iter()
        .filter(|&(_, &deg)| deg == 0)
        .map(|(&id, _)| id)
        .collect();
    let mut processed = 0usize;
    while let Some(id) = queue.pop_front() {
        processed += 1;
        let Some(targets) = children.get(id) else {
            continue;
        };
        for target in targets {
            if let Some(deg) = indeg.get_mut(target) {
                *deg -= 1;
                if *deg == 0 {
                    queue.push_back(*target);
                }
            }
        }
    }
    processed < ids.len()
}

/// Non-group nodes that never appear as an edge endpoint, in input order.
pub fn find_isolated_nodes(nodes: &[Node], edges: &[Edge]) -> Vec<String> {
    let connected: HashSet<&str> = edges
        .iter()
        .flat_map(|edge| [edge.source.as_str(), edge.target.as_str()])
        .collect();
    nodes
        .iter()
        .filter(|node| !node.kind.is_group() && !connected.contains(node.id.as_str()))
        .map(|node| node.id.clone())
        .collect()
}
