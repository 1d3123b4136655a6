//! # bayesnet-inference
//!
//! Exact inference for discrete Bayesian networks. The network is moralized,
//! triangulated along a maximum-cardinality order, and compiled into a
//! junction forest whose cliques carry the CPT potentials. Two-pass
//! sum-product propagation yields per-node marginals; observations are
//! absorbed incrementally.
//!
//! ```text
//! network → moralize → order → fill-in → reorder → cliques → tree → potentials → propagate
//! ```

pub mod calculator;
pub mod evidence;
pub mod graph;
pub mod index;
pub mod propagation;
pub mod summary;
pub mod tree;

pub use calculator::MarginCalculator;
pub use graph::{AdjacencyMatrix, EliminationOrder};
pub use summary::TreeSummary;
pub use tree::{Clique, JunctionTree, PropagationState, Separator};

use bayesnet_core::errors::{InferenceError, InferenceResult};
use bayesnet_core::traits::Cancellable;

/// Unwind with `Interrupted` once cancellation has been requested.
pub(crate) fn ensure_not_cancelled(cancel: &dyn Cancellable) -> InferenceResult<()> {
    if cancel.is_cancelled() {
        return Err(InferenceError::Interrupted);
    }
    Ok(())
}
