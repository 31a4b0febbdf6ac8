use std::collections::{HashMap, VecDeque};

use crate::config::CycleBreaking;
use crate::ir::Edge;

/// Index-based working copy of the graph used only for leveling. Cycle
/// breaking mutates this, never the caller's edge list.
#[derive(Debug, Clone)]
pub(super) struct LevelGraph {
    pub(super) children: Vec<Vec<usize>>,
}

impl LevelGraph {
    /// Parallel edges collapse into one relation; edges with an unknown
    /// endpoint are skipped.
    pub(super) fn build(index: &HashMap<&str, usize>, edges: &[Edge]) -> Self {
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); index.len()];
        for edge in edges {
            let (Some(&from), Some(&to)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) else {
                continue;
            };
            if !children[from].contains(&to) {
                children[from].push(to);
            }
        }
        Self { children }
    }

    pub(super) fn len(&self) -> usize {
        self.children.len()
    }

    pub(super) fn edge_count(&self) -> usize {
        self.children.iter().map(Vec::len).sum()
    }

    fn remove_edge(&mut self, from: usize, to: usize) {
        self.children[from].retain(|&child| child != to);
    }

    fn in_degrees(&self) -> Vec<usize> {
        let mut indeg = vec![0usize; self.len()];
        for list in &self.children {
            for &child in list {
                indeg[child] += 1;
            }
        }
        indeg
    }
}

/// Depth-first search with an explicit recursion stack. Returns the edge that
/// closes the first cycle found: from the cycle's last node back to its start.
pub(super) fn find_back_edge(graph: &LevelGraph) -> Option<(usize, usize)> {
    const UNSEEN: u8 = 0;
    const ON_STACK: u8 = 1;
    const DONE: u8 = 2;

    let mut state = vec![UNSEEN; graph.len()];
    for start in 0..graph.len() {
        if state[start] != UNSEEN {
            continue;
        }
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        state[start] = ON_STACK;
        while let Some(frame) = stack.last_mut() {
            let (node, next_child) = *frame;
            if let Some(&child) = graph.children[node].get(next_child) {
                frame.1 += 1;
                match state[child] {
                    ON_STACK => return Some((node, child)),
                    UNSEEN => {
                        state[child] = ON_STACK;
                        stack.push((child, 0));
                    }
                    _ => {}
                }
            } else {
                state[node] = DONE;
                stack.pop();
            }
        }
    }
    None
}

/// Removes one edge per detected cycle. Returns the removed `(from, to)` pairs
/// in removal order.
pub(super) fn break_cycles(graph: &mut LevelGraph, policy: CycleBreaking) -> Vec<(usize, usize)> {
    let mut removed = Vec::new();
    let max_passes = match policy {
        CycleBreaking::SinglePass => 1,
        // every pass removes an edge, so this bound is never the reason to stop
        CycleBreaking::FixedPoint => graph.edge_count(),
    };
    for _ in 0..max_passes {
        let Some((from, to)) = find_back_edge(graph) else {
            break;
        };
        graph.remove_edge(from, to);
        removed.push((from, to));
    }
    removed
}

#[derive(Debug, Clone, Default)]
pub(super) struct Leveling {
    /// `None` for nodes the traversal never reached.
    pub(super) levels: Vec<Option<usize>>,
    pub(super) capped: bool,
}

/// Longest-path leveling: breadth-first from every in-degree-0 root, raising a
/// child to `parent + 1` whenever that is further right than its current level.
///
/// The traversal stops after `n²` dequeues in total and ignores a node once it
/// has been dequeued more than `n` times, so leftover cycles cannot spin.
pub(super) fn assign_levels(graph: &LevelGraph) -> Leveling {
    let n = graph.len();
    let mut levels: Vec<Option<usize>> = vec![None; n];
    if n == 0 {
        return Leveling::default();
    }

    let indeg = graph.in_degrees();
    let mut queue: VecDeque<usize> = VecDeque::new();
    for (node, &deg) in indeg.iter().enumerate() {
        if deg == 0 {
            levels[node] = Some(0);
            queue.push_back(node);
        }
    }

    let max_iterations = n.saturating_mul(n);
    let mut visits = vec![0usize; n];
    let mut iterations = 0usize;
    let mut capped = false;

    while let Some(node) = queue.pop_front() {
        iterations += 1;
        if iterations > max_iterations {
            tracing::warn!(max_iterations, "leveling iteration cap reached");
            capped = true;
            break;
        }
        visits[node] += 1;
        if visits[node] > n {
            if !capped {
                tracing::warn!(node, "leveling visit cap reached");
            }
            capped = true;
            continue;
        }
        let level = levels[node].unwrap_or(0);
        for &child in &graph.children[node] {
            let next = level + 1;
            if levels[child].is_none_or(|current| next > current) {
                levels[child] = Some(next);
                queue.push_back(child);
            }
        }
    }

    Leveling { levels, capped }
}

/// Unreached nodes share one trailing column after the deepest level.
pub(super) fn fill_unleveled(levels: &[Option<usize>]) -> Vec<usize> {
    let trailing = levels
        .iter()
        .flatten()
        .max()
        .map(|max| max + 1)
        .unwrap_or(0);
    levels
        .iter()
        .map(|level| level.unwrap_or(trailing))
        .collect()
}
