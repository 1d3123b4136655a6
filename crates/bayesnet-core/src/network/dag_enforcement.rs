//! Cycle rejection for parent edges.
//! Every `add_parent` is checked before the edge is inserted.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;

/// Directed graph mirroring parent → child edges. Node weights are network indices.
pub type ParentGraph = DiGraph<usize, ()>;

/// Check whether adding `parent → child` would create a cycle.
///
/// Returns `true` if the edge must be rejected.
pub fn would_create_cycle(graph: &ParentGraph, parent: NodeIndex, child: NodeIndex) -> bool {
    if parent == child {
        return true;
    }
    // parent → child closes a cycle iff child already reaches parent.
    has_path(graph, child, parent)
}

/// DFS reachability: can we reach `to` from `from`?
fn has_path(graph: &ParentGraph, from: NodeIndex, to: NodeIndex) -> bool {
    let mut dfs = Dfs::new(graph, from);
    while let Some(node) = dfs.next(graph) {
        if node == to {
            return true;
        }
    }
    false
}

/// True when the graph has no directed cycle.
pub fn is_acyclic(graph: &ParentGraph) -> bool {
    !petgraph::algo::is_cyclic_directed(graph)
}
