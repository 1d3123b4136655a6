//! Fill-in triangulation along an elimination order.

use bayesnet_core::errors::InferenceResult;
use bayesnet_core::traits::Cancellable;

use super::{AdjacencyMatrix, EliminationOrder};
use crate::ensure_not_cancelled;

/// Make `graph` chordal by eliminating nodes from last to first, connecting
/// every pair of lower-ordered neighbors of the eliminated node.
///
/// Returns the number of fill edges added. The order must be recomputed on
/// the filled graph before cliques are extracted.
pub fn fill_in(
    graph: &mut AdjacencyMatrix,
    order: &EliminationOrder,
    cancel: &dyn Cancellable,
) -> InferenceResult<usize> {
    let mut added = 0;
    for pos in (0..order.len()).rev() {
        ensure_not_cancelled(cancel)?;
        let lower = order.lower_neighbors(graph, pos);
        for (k, &a) in lower.iter().enumerate() {
            for &b in &lower[k + 1..] {
                if graph.connect(a, b) {
                    added += 1;
                }
            }
        }
    }
    Ok(added)
}
