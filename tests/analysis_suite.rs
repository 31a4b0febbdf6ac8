use std::path::Path;

use plangraph::analysis::{InsightCode, Severity};
use plangraph::{Edge, EdgeWeight, Graph, Node, NodeKind, Position, analyze_process, compute_layout, parse_graph};
use pretty_assertions::assert_eq;

fn load_fixture(rel: &str) -> Graph {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(rel);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    parse_graph(&input).expect("parse failed").graph
}

#[test]
fn complete_plan_scores_full_marks() {
    let graph = load_fixture("full_plan.json");
    let analysis = analyze_process(&graph.nodes, &graph.edges);
    assert_eq!(analysis.insights, Vec::new());
    assert_eq!(analysis.score, 100);
    let stats = &analysis.statistics;
    assert_eq!(stats.total_nodes, 10);
    assert!(stats.missing_kinds.is_empty());
    assert!(stats.has_iteration_loop);
    assert!(stats.has_graph_cycle);
    assert!(stats.has_risk && stats.has_resource && stats.has_stakeholder && stats.has_boundary);
}

#[test]
fn empty_snapshot_scores_sixty_five() {
    let graph = load_fixture("empty.json");
    let analysis = analyze_process(&graph.nodes, &graph.edges);
    assert_eq!(analysis.score, 65);
    assert_eq!(analysis.count_by_severity(Severity::High), 1);
    assert_eq!(analysis.count_by_severity(Severity::Medium), 1);
    assert_eq!(analysis.count_by_severity(Severity::Low), 1);
}

#[test]
fn isolated_risk_is_reported_by_id() {
    let graph = load_fixture("sparse_components.json");
    let analysis = analyze_process(&graph.nodes, &graph.edges);
    let isolated = analysis.insight(InsightCode::IsolatedNodes).expect("isolated insight");
    assert_eq!(isolated.affected_nodes, Some(vec!["loner".to_string()]));
    assert!(!analysis.has(InsightCode::MissingRisk));
}

#[test]
fn leftward_drag_counts_as_feedback_until_relaid() {
    // b sits far left of a, so a -> b reads as a backward edge
    let mut nodes = vec![
        Node::new("g", NodeKind::Goal).at(600.0, 0.0),
        Node::new("a", NodeKind::Action).at(900.0, 0.0),
        Node::new("b", NodeKind::Action).at(100.0, 0.0),
    ];
    let edges = vec![
        Edge::new("g", "a").with_label("starts"),
        Edge::new("a", "b").with_label("then"),
    ];
    assert!(analyze_process(&nodes, &edges).statistics.has_iteration_loop);

    let positions = compute_layout(&nodes, &edges, Position::ORIGIN);
    for node in &mut nodes {
        let pos = positions[&node.id];
        node.x = pos.x;
        node.y = pos.y;
    }
    let analysis = analyze_process(&nodes, &edges);
    assert!(!analysis.statistics.has_iteration_loop);
    assert!(!analysis.statistics.has_graph_cycle);
}

#[test]
fn json_output_uses_stable_codes() {
    let nodes = vec![Node::new("a", NodeKind::Action)];
    let edges = vec![Edge::new("a", "a").with_weight(EdgeWeight::Reverse)];
    let analysis = analyze_process(&nodes, &edges);
    let value = serde_json::to_value(&analysis).unwrap();
    assert_eq!(value["insights"][0]["code"], "missing-goal");
    assert_eq!(value["insights"][0]["severity"], "high");
    assert_eq!(value["statistics"]["hasIterationLoop"], true);
    assert_eq!(value["statistics"]["kindCounts"]["action"], 1);
}
