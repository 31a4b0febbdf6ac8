use std::collections::BTreeMap;

use serde::Serialize;

use crate::ir::NodeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Risk,
    Resource,
    Stakeholder,
    Boundary,
    Data,
    Logic,
    Iteration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Stable identifier for each heuristic, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightCode {
    MissingGoal,
    MissingRisk,
    MissingResource,
    MissingStakeholder,
    MissingBoundary,
    MissingDataPreparation,
    MissingIteration,
    IsolatedNodes,
    UnlabeledEdges,
    SuggestGrouping,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub code: InsightCode,
    pub kind: InsightKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_nodes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Non-group nodes only.
    pub total_nodes: usize,
    pub kind_counts: BTreeMap<NodeKind, usize>,
    pub missing_kinds: Vec<NodeKind>,
    pub edge_count: usize,
    pub unlabeled_edges: usize,
    /// Positional heuristic: a reverse-weighted edge or an edge drawn leftward.
    pub has_iteration_loop: bool,
    /// Topological check, independent of node positions.
    pub has_graph_cycle: bool,
    pub has_risk: bool,
    pub has_resource: bool,
    pub has_stakeholder: bool,
    pub has_boundary: bool,
}

impl Statistics {
    pub fn count(&self, kind: NodeKind) -> usize {
        self.kind_counts.get(&kind).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessAnalysis {
    pub score: u8,
    pub insights: Vec<Insight>,
    pub statistics: Statistics,
}

impl ProcessAnalysis {
    pub fn insight(&self, code: InsightCode) -> Option<&Insight> {
        self.insights.iter().find(|insight| insight.code == code)
    }

    pub fn has(&self, code: InsightCode) -> bool {
        self.insight(code).is_some()
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.insights
            .iter()
            .filter(|insight| insight.severity == severity)
            .count()
    }
}
