use crate::ir::{Edge, Graph, Node};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid graph snapshot: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("duplicate node id `{0}`")]
    DuplicateNodeId(String),
    #[error("node at index {0} has an empty id")]
    EmptyNodeId(usize),
}

#[derive(Debug, Default)]
pub struct ParseOutput {
    pub graph: Graph,
    /// Edges dropped because an endpoint does not exist.
    pub dangling_edges: Vec<Edge>,
}

/// Parses a `{ nodes, edges }` JSON snapshot and filters it down to a
/// consistent graph.
pub fn parse_graph(input: &str) -> Result<ParseOutput, GraphError> {
    let graph: Graph = serde_json::from_str(input)?;
    build_graph(graph.nodes, graph.edges)
}

/// Validates node ids and drops edges whose endpoints are missing.
pub fn build_graph(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<ParseOutput, GraphError> {
    let mut ids: HashSet<&str> = HashSet::with_capacity(nodes.len());
    for (idx, node) in nodes.iter().enumerate() {
        if node.id.trim().is_empty() {
            return Err(GraphError::EmptyNodeId(idx));
        }
        if !ids.insert(node.id.as_str()) {
            return Err(GraphError::DuplicateNodeId(node.id.clone()));
        }
    }

    let (kept, dangling): (Vec<Edge>, Vec<Edge>) = edges.into_iter().partition(|edge| {
        ids.contains(edge.source.as_str()) && ids.contains(edge.target.as_str())
    });
    for edge in &dangling {
        tracing::warn!(
            source = %edge.source,
            target = %edge.target,
            "dropping edge with missing endpoint"
        );
    }

    Ok(ParseOutput {
        graph: Graph { nodes, edges: kept },
        dangling_edges: dangling,
    })
}
