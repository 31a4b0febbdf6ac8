use crate::analysis::{ProcessAnalysis, Severity};
use crate::ir::NodeKind;

/// Human-readable report for terminals.
pub fn render_text(analysis: &ProcessAnalysis) -> String {
    let mut out = String::new();
    let stats = &analysis.statistics;
    out.push_str(&format!("Process completeness: {}/100\n", analysis.score));
    out.push_str(&format!(
        "Nodes: {}  Connections: {}  Unlabeled: {}\n",
        stats.total_nodes, stats.edge_count, stats.unlabeled_edges
    ));

    let counts: Vec<String> = stats
        .kind_counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(kind, count)| format!("{}={}", kind.as_str(), count))
        .collect();
    if !counts.is_empty() {
        out.push_str(&format!("Kinds: {}\n", counts.join(", ")));
    }
    if !stats.missing_kinds.is_empty() {
        out.push_str(&format!("Missing: {}\n", kind_list(&stats.missing_kinds)));
    }
    out.push_str(&format!(
        "Iteration loop: {}  Graph cycle: {}\n",
        yes_no(stats.has_iteration_loop),
        yes_no(stats.has_graph_cycle)
    ));

    if analysis.insights.is_empty() {
        out.push_str("\nNo issues found.\n");
        return out;
    }

    out.push('\n');
    for (idx, insight) in analysis.insights.iter().enumerate() {
        out.push_str(&format!(
            "{}. [{}] {}\n",
            idx + 1,
            severity_tag(insight.severity),
            insight.title
        ));
        out.push_str(&format!("   {}\n", insight.description));
        out.push_str(&format!("   -> {}\n", insight.suggestion));
        if let Some(nodes) = &insight.affected_nodes {
            out.push_str(&format!("   nodes: {}\n", nodes.join(", ")));
        }
    }
    out
}

/// Compact block meant to be pasted into a model prompt as context.
pub fn prompt_context(analysis: &ProcessAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&format!("score: {}/100\n", analysis.score));
    out.push_str(&format!("nodes: {}\n", analysis.statistics.total_nodes));
    if !analysis.statistics.missing_kinds.is_empty() {
        out.push_str(&format!(
            "missing kinds: {}\n",
            kind_list(&analysis.statistics.missing_kinds)
        ));
    }
    for insight in &analysis.insights {
        out.push_str(&format!(
            "- ({}) {}: {}",
            insight.severity.as_str(),
            insight.title,
            insight.suggestion
        ));
        if let Some(nodes) = &insight.affected_nodes {
            out.push_str(&format!(" [{}]", nodes.join(", ")));
        }
        out.push('\n');
    }
    out
}

fn kind_list(kinds: &[NodeKind]) -> String {
    kinds
        .iter()
        .map(|kind| kind.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "HIGH",
        Severity::Medium => "MED",
        Severity::Low => "LOW",
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
