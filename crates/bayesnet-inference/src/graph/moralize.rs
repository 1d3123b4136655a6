//! Moral graph construction.

use bayesnet_core::errors::{InferenceError, InferenceResult};
use bayesnet_core::traits::BayesianNetwork;

use super::AdjacencyMatrix;

/// Reject networks the junction tree cannot be built from: no nodes, a node
/// without states, or parent indices that are out of range or self-referential.
pub fn validate_structure(network: &dyn BayesianNetwork) -> InferenceResult<()> {
    let n = network.node_count();
    if n == 0 {
        return Err(InferenceError::InvalidNetwork {
            reason: "network has no nodes".to_string(),
        });
    }
    for node in 0..n {
        if network.cardinality(node) == 0 {
            return Err(InferenceError::InvalidNetwork {
                reason: format!("node '{}' has no states", network.node_name(node)),
            });
        }
        for &parent in network.parents(node) {
            if parent >= n || parent == node {
                return Err(InferenceError::InvalidNetwork {
                    reason: format!(
                        "node '{}' has invalid parent index {parent}",
                        network.node_name(node)
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Build the moral graph: `i - j` iff one is a parent of the other or both
/// are parents of a common child.
pub fn moralize(network: &dyn BayesianNetwork) -> InferenceResult<AdjacencyMatrix> {
    validate_structure(network)?;
    let n = network.node_count();
    let mut graph = AdjacencyMatrix::new(n);
    for child in 0..n {
        let parents = network.parents(child);
        for (k, &parent) in parents.iter().enumerate() {
            graph.connect(parent, child);
            for &other in &parents[k + 1..] {
                graph.connect(parent, other);
            }
        }
    }
    Ok(graph)
}
