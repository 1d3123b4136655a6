//! The junction forest: clique/separator arenas and one-shot construction.

pub mod builder;
pub mod clique;
pub mod extract;
pub mod potentials;

pub use clique::{Clique, Separator};

use bayesnet_core::config::InferenceConfig;
use bayesnet_core::errors::InferenceResult;
use bayesnet_core::traits::{BayesianNetwork, Cancellable};
use tracing::debug;

use crate::graph::{fill_in, max_cardinality_order, AdjacencyMatrix};

/// Where the tree is in the two-pass initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationState {
    Uninitialized,
    UpwardDone,
    Consistent,
}

/// Junction forest over a discrete network.
///
/// Owns every clique and separator in flat arenas; cliques and separators
/// refer to each other by index only. Also owns the per-node margins and
/// the log of absorbed evidence.
#[derive(Debug, Clone)]
pub struct JunctionTree {
    pub(crate) cliques: Vec<Clique>,
    pub(crate) separators: Vec<Separator>,
    pub(crate) roots: Vec<usize>,
    /// node → clique that claimed its CPT.
    pub(crate) owner: Vec<usize>,
    pub(crate) cardinalities: Vec<usize>,
    pub(crate) names: Vec<String>,
    pub(crate) margins: Vec<Vec<f64>>,
    pub(crate) evidence: Vec<(usize, usize)>,
    pub(crate) state: PropagationState,
    pub(crate) fill_edges: usize,
}

impl JunctionTree {
    /// Compile `network` into a junction forest starting from `graph`
    /// (the moral graph, or a complete graph).
    ///
    /// Orders, fills in, reorders on the chordal graph, extracts cliques,
    /// links them, and assigns potentials. Propagation is left to the caller.
    pub fn build(
        network: &dyn BayesianNetwork,
        mut graph: AdjacencyMatrix,
        config: &InferenceConfig,
        cancel: &dyn Cancellable,
    ) -> InferenceResult<Self> {
        let check = config.effective_check_invariants();
        let max_entries = config.effective_max_clique_entries();
        let n = network.node_count();

        let order = max_cardinality_order(&graph, cancel)?;
        let fill_edges = fill_in(&mut graph, &order, cancel)?;
        let order = max_cardinality_order(&graph, cancel)?;
        debug!(nodes = n, fill_edges, "triangulated graph");

        let member_sets = extract::extract_cliques(&graph, &order, check)?;
        let cardinalities: Vec<usize> = (0..n).map(|i| network.cardinality(i)).collect();
        let builder::Forest {
            mut cliques,
            separators,
            roots,
        } = builder::build_forest(&member_sets, &cardinalities, max_entries, check)?;
        debug!(
            cliques = cliques.len(),
            roots = roots.len(),
            largest_table = cliques.iter().map(|c| c.layout.size()).max().unwrap_or(0),
            "assembled junction forest"
        );

        let owner = potentials::assign_potentials(
            &mut cliques,
            network,
            cancel,
            config.effective_cancel_poll_interval(),
        )?;

        Ok(Self {
            cliques,
            separators,
            roots,
            owner,
            margins: cardinalities.iter().map(|&c| vec![0.0; c]).collect(),
            cardinalities,
            names: (0..n).map(|i| network.node_name(i).to_string()).collect(),
            evidence: Vec::new(),
            state: PropagationState::Uninitialized,
            fill_edges,
        })
    }

    pub fn cliques(&self) -> &[Clique] {
        &self.cliques
    }

    pub fn separators(&self) -> &[Separator] {
        &self.separators
    }

    /// One root per connected component of the network.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn state(&self) -> PropagationState {
        self.state
    }

    pub fn node_count(&self) -> usize {
        self.cardinalities.len()
    }

    /// Clique that owns `node`'s CPT and writes its margin.
    pub fn owner_of(&self, node: usize) -> Option<usize> {
        self.owner.get(node).copied()
    }

    /// Fill edges added during triangulation.
    pub fn fill_edges(&self) -> usize {
        self.fill_edges
    }

    /// Observations absorbed since the last full propagation, in call order.
    pub fn evidence(&self) -> &[(usize, usize)] {
        &self.evidence
    }

    /// Per-node margins, indexed by node.
    pub fn margins(&self) -> &[Vec<f64>] {
        &self.margins
    }

    /// Cliques in pre-order (every parent before its children), root by root.
    pub fn preorder(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.cliques.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(c) = stack.pop() {
            out.push(c);
            for &s in self.cliques[c].child_separators.iter().rev() {
                stack.push(self.separators[s].child);
            }
        }
        out
    }
}
