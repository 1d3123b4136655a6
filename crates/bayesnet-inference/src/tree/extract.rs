//! Maximal clique extraction from a triangulated graph.

use bayesnet_core::errors::{InferenceError, InferenceResult};
use bayesnet_core::types::collections::SmallVec8;

use crate::graph::{AdjacencyMatrix, EliminationOrder};

/// Maximal cliques of the chordal `graph`, in order-position order.
///
/// Candidate at position `p` is the node there plus its lower-ordered
/// neighbors; candidates strictly contained in another retained candidate
/// are dropped. Members are sorted ascending. With `check_invariants`, every
/// retained clique is verified to be complete in `graph`.
pub fn extract_cliques(
    graph: &AdjacencyMatrix,
    order: &EliminationOrder,
    check_invariants: bool,
) -> InferenceResult<Vec<SmallVec8<usize>>> {
    let n = order.len();
    let mut candidates: Vec<Option<SmallVec8<usize>>> = Vec::with_capacity(n);
    for pos in 0..n {
        let mut members: SmallVec8<usize> = order.lower_neighbors(graph, pos).into_iter().collect();
        members.push(order.nodes()[pos]);
        members.sort_unstable();
        candidates.push(Some(members));
    }

    let mut in_clique = vec![false; graph.len()];
    for i in 0..n {
        let Some(outer) = candidates[i].clone() else {
            continue;
        };
        for &m in &outer {
            in_clique[m] = true;
        }
        for (j, slot) in candidates.iter_mut().enumerate() {
            if i == j {
                continue;
            }
            let drop = slot
                .as_ref()
                .is_some_and(|inner| inner.len() < outer.len() && inner.iter().all(|&m| in_clique[m]));
            if drop {
                *slot = None;
            }
        }
        for &m in &outer {
            in_clique[m] = false;
        }
    }

    let cliques: Vec<SmallVec8<usize>> = candidates.into_iter().flatten().collect();

    if check_invariants {
        for clique in &cliques {
            for (k, &a) in clique.iter().enumerate() {
                if let Some(&b) = clique[k + 1..].iter().find(|&&b| !graph.connected(a, b)) {
                    return Err(InferenceError::structural(format!(
                        "clique {clique:?} is not complete: {a} and {b} are not adjacent"
                    )));
                }
            }
        }
    }

    Ok(cliques)
}
