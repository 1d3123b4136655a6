//! Maximum-cardinality search.

use bayesnet_core::errors::InferenceResult;
use bayesnet_core::traits::Cancellable;

use super::AdjacencyMatrix;
use crate::ensure_not_cancelled;

/// A permutation of the nodes plus its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EliminationOrder {
    order: Vec<usize>,
    position: Vec<usize>,
}

impl EliminationOrder {
    /// Nodes in visiting order.
    pub fn nodes(&self) -> &[usize] {
        &self.order
    }

    /// Position of `node` in the order.
    pub fn position(&self, node: usize) -> usize {
        self.position[node]
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Neighbors of the node at position `pos` that sit earlier in the order.
    pub fn lower_neighbors(&self, graph: &AdjacencyMatrix, pos: usize) -> Vec<usize> {
        graph
            .neighbors(self.order[pos])
            .filter(|&m| self.position[m] < pos)
            .collect()
    }
}

/// Order the nodes by maximum-cardinality search.
///
/// Node 0 goes first; each following step picks the unordered node with the
/// most already-ordered neighbors, lowest index on ties. Disconnected
/// components are handled by the same rule (their nodes start at zero
/// ordered neighbors). Polls `cancel` once per step.
pub fn max_cardinality_order(
    graph: &AdjacencyMatrix,
    cancel: &dyn Cancellable,
) -> InferenceResult<EliminationOrder> {
    let n = graph.len();
    let mut order = Vec::with_capacity(n);
    let mut position = vec![usize::MAX; n];
    let mut ordered_neighbors = vec![0usize; n];

    for step in 0..n {
        ensure_not_cancelled(cancel)?;

        let mut best: Option<usize> = None;
        for candidate in 0..n {
            if position[candidate] != usize::MAX {
                continue;
            }
            match best {
                Some(b) if ordered_neighbors[candidate] <= ordered_neighbors[b] => {}
                _ => best = Some(candidate),
            }
        }
        // n > step guarantees an unordered node remains.
        let Some(next) = best else { break };

        position[next] = step;
        order.push(next);
        for neighbor in graph.neighbors(next) {
            if position[neighbor] == usize::MAX {
                ordered_neighbors[neighbor] += 1;
            }
        }
    }

    Ok(EliminationOrder { order, position })
}
