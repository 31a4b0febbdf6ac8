use crate::config::AnalysisConfig;
use crate::ir::NodeKind;

use super::types::{Insight, InsightCode, InsightKind, Severity, Statistics};

/// Everything the heuristics look at, gathered once per analysis.
pub(super) struct RuleContext<'a> {
    pub(super) stats: &'a Statistics,
    pub(super) isolated: &'a [String],
    pub(super) group_count: usize,
}

impl RuleContext<'_> {
    fn count(&self, kind: NodeKind) -> usize {
        self.stats.count(kind)
    }

    fn actions(&self) -> usize {
        self.count(NodeKind::Action)
    }

    fn actions_and_goals(&self) -> usize {
        self.count(NodeKind::Action) + self.count(NodeKind::Goal)
    }
}

type Rule = fn(&RuleContext<'_>, &AnalysisConfig) -> Option<Insight>;

/// Evaluation order is part of the output contract.
pub(super) const RULES: [Rule; 10] = [
    missing_goal,
    missing_risk,
    missing_resource,
    missing_stakeholder,
    missing_boundary,
    missing_data_preparation,
    missing_iteration,
    isolated_nodes,
    unlabeled_edges,
    suggest_grouping,
];

pub(super) fn evaluate(ctx: &RuleContext<'_>, config: &AnalysisConfig) -> Vec<Insight> {
    RULES.iter().filter_map(|rule| rule(ctx, config)).collect()
}

fn insight(
    code: InsightCode,
    kind: InsightKind,
    severity: Severity,
    title: impl Into<String>,
    description: impl Into<String>,
    suggestion: impl Into<String>,
) -> Insight {
    Insight {
        code,
        kind,
        severity,
        title: title.into(),
        description: description.into(),
        suggestion: suggestion.into(),
        affected_nodes: None,
    }
}

fn missing_goal(ctx: &RuleContext<'_>, _config: &AnalysisConfig) -> Option<Insight> {
    if ctx.count(NodeKind::Goal) > 0 {
        return None;
    }
    Some(insight(
        InsightCode::MissingGoal,
        InsightKind::Logic,
        Severity::High,
        "Missing core objective",
        "The plan has no goal node, so nothing anchors what the actions are working toward.",
        "Add a goal node that states the outcome this process should achieve.",
    ))
}

fn missing_risk(ctx: &RuleContext<'_>, _config: &AnalysisConfig) -> Option<Insight> {
    if ctx.stats.has_risk {
        return None;
    }
    Some(insight(
        InsightCode::MissingRisk,
        InsightKind::Risk,
        Severity::Medium,
        "Missing risk identification",
        "No risks are captured, so failure modes and blockers are invisible.",
        "Add risk nodes for what could go wrong and connect them to the steps they threaten.",
    ))
}

fn missing_resource(ctx: &RuleContext<'_>, config: &AnalysisConfig) -> Option<Insight> {
    if ctx.stats.has_resource || ctx.actions() <= config.resource_action_threshold {
        return None;
    }
    Some(insight(
        InsightCode::MissingResource,
        InsightKind::Resource,
        Severity::Medium,
        "Missing resource planning",
        format!(
            "There are {} actions but no resources describing the people, budget, or tools they need.",
            ctx.actions()
        ),
        "Add resource nodes and link them to the actions that consume them.",
    ))
}

fn missing_stakeholder(ctx: &RuleContext<'_>, config: &AnalysisConfig) -> Option<Insight> {
    if ctx.stats.has_stakeholder || ctx.actions() <= config.stakeholder_action_threshold {
        return None;
    }
    Some(insight(
        InsightCode::MissingStakeholder,
        InsightKind::Stakeholder,
        Severity::Low,
        "Stakeholders not identified",
        "Nobody is named as owning, approving, or being affected by this work.",
        "Add stakeholder nodes for owners, approvers, and affected parties.",
    ))
}

fn missing_boundary(ctx: &RuleContext<'_>, _config: &AnalysisConfig) -> Option<Insight> {
    if ctx.stats.has_boundary {
        return None;
    }
    Some(insight(
        InsightCode::MissingBoundary,
        InsightKind::Boundary,
        Severity::Low,
        "Missing constraints",
        "No boundary conditions such as deadlines, budgets, or scope limits are stated.",
        "Add boundary nodes for the constraints this process must respect.",
    ))
}

fn missing_data_preparation(ctx: &RuleContext<'_>, config: &AnalysisConfig) -> Option<Insight> {
    if ctx.count(NodeKind::Placeholder) > 0 || ctx.actions_and_goals() <= config.data_prep_threshold {
        return None;
    }
    Some(insight(
        InsightCode::MissingDataPreparation,
        InsightKind::Data,
        Severity::Medium,
        "Missing data-preparation steps",
        "A plan of this size usually depends on inputs that have to be gathered first, but none are modeled.",
        "Add placeholder nodes for the data or inputs that must be prepared before the actions run.",
    ))
}

fn missing_iteration(ctx: &RuleContext<'_>, config: &AnalysisConfig) -> Option<Insight> {
    if ctx.stats.has_iteration_loop || ctx.actions_and_goals() <= config.iteration_threshold {
        return None;
    }
    Some(insight(
        InsightCode::MissingIteration,
        InsightKind::Iteration,
        Severity::Medium,
        "Missing iteration mechanism",
        "The flow only moves forward; there is no feedback path for reviewing results and adjusting.",
        "Add a reverse connection from a review step back to an earlier action.",
    ))
}

fn isolated_nodes(ctx: &RuleContext<'_>, _config: &AnalysisConfig) -> Option<Insight> {
    if ctx.isolated.is_empty() {
        return None;
    }
    let count = ctx.isolated.len();
    let mut found = insight(
        InsightCode::IsolatedNodes,
        InsightKind::Logic,
        Severity::High,
        format!("{count} isolated nodes"),
        format!("{count} nodes have no connections and do not take part in the flow."),
        "Connect each isolated node to the steps it belongs to, or remove it.",
    );
    found.affected_nodes = Some(ctx.isolated.to_vec());
    Some(found)
}

fn unlabeled_edges(ctx: &RuleContext<'_>, config: &AnalysisConfig) -> Option<Insight> {
    let count = ctx.stats.unlabeled_edges;
    if count <= config.unlabeled_edge_threshold {
        return None;
    }
    Some(insight(
        InsightCode::UnlabeledEdges,
        InsightKind::Logic,
        Severity::Medium,
        format!("{count} connections missing labels"),
        format!("{count} connections do not say how the two steps relate."),
        "Label connections with the relation they express, e.g. \"requires\" or \"produces\".",
    ))
}

fn suggest_grouping(ctx: &RuleContext<'_>, config: &AnalysisConfig) -> Option<Insight> {
    if ctx.group_count > 0 || ctx.stats.total_nodes <= config.grouping_node_threshold {
        return None;
    }
    Some(insight(
        InsightCode::SuggestGrouping,
        InsightKind::Logic,
        Severity::Low,
        "Suggest logical grouping",
        format!(
            "{} nodes sit on one flat canvas without any grouping.",
            ctx.stats.total_nodes
        ),
        "Group related nodes into phases or workstreams.",
    ))
}
