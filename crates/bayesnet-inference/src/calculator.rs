//! MarginCalculator: owns config, cancellation and the built tree; the entry
//! point for computing margins and absorbing evidence.

use std::path::Path;
use std::sync::Arc;

use bayesnet_core::config::{ConfigOverrides, InferenceConfig};
use bayesnet_core::errors::{InferenceError, InferenceResult};
use bayesnet_core::traits::{BayesianNetwork, Cancellable, CancellationToken};
use tracing::{info, instrument};

use crate::graph::{moralize, validate_structure, AdjacencyMatrix};
use crate::summary::TreeSummary;
use crate::tree::potentials::validate_cpts;
use crate::tree::JunctionTree;

/// Exact marginal calculator for discrete Bayesian networks.
///
/// A construction or propagation error drops the current tree, so the next
/// query reports `NotInitialized` until the margins are recomputed. Lookup
/// failures leave the tree intact.
pub struct MarginCalculator {
    config: InferenceConfig,
    cancel: Arc<dyn Cancellable + Send + Sync>,
    tree: Option<JunctionTree>,
}

impl MarginCalculator {
    /// Create a calculator with default settings.
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(config: InferenceConfig) -> Self {
        Self {
            config,
            cancel: Arc::new(CancellationToken::new()),
            tree: None,
        }
    }

    /// Create with configuration resolved from `bayesnet.toml` under `root`,
    /// `BAYESNET_*` environment variables and `overrides`.
    pub fn from_project(root: &Path, overrides: Option<&ConfigOverrides>) -> InferenceResult<Self> {
        let config = InferenceConfig::load(root, overrides)?;
        Ok(Self::with_config(config))
    }

    /// Use `token` as the interruption signal for subsequent builds.
    pub fn with_cancellation(mut self, token: impl Cancellable + Send + Sync + 'static) -> Self {
        self.cancel = Arc::new(token);
        self
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Build the junction tree from the moral graph and propagate.
    #[instrument(skip_all, fields(nodes = network.node_count()))]
    pub fn compute_margins(&mut self, network: &dyn BayesianNetwork) -> InferenceResult<()> {
        self.tree = None;
        validate_network(network, &self.config)?;
        let graph = moralize(network)?;
        self.build(network, graph)
    }

    /// Build from a complete graph (a single clique over every node).
    ///
    /// Ignores conditional independence, so it serves as a reference for
    /// `compute_margins`; both give the same margins.
    #[instrument(skip_all, fields(nodes = network.node_count()))]
    pub fn compute_full_margins(&mut self, network: &dyn BayesianNetwork) -> InferenceResult<()> {
        self.tree = None;
        validate_network(network, &self.config)?;
        let graph = AdjacencyMatrix::complete(network.node_count());
        self.build(network, graph)
    }

    fn build(
        &mut self,
        network: &dyn BayesianNetwork,
        graph: AdjacencyMatrix,
    ) -> InferenceResult<()> {
        let mut tree = JunctionTree::build(network, graph, &self.config, &*self.cancel)?;
        tree.propagate()?;
        info!(
            cliques = tree.cliques().len(),
            roots = tree.roots().len(),
            fill_edges = tree.fill_edges(),
            "computed margins"
        );
        self.tree = Some(tree);
        Ok(())
    }

    /// Absorb the observation `node = value`.
    pub fn set_evidence(&mut self, node: usize, value: usize) -> InferenceResult<()> {
        let tree = self.tree.as_mut().ok_or(InferenceError::NotInitialized)?;
        tree.set_evidence(node, value).map(|_| ())
    }

    /// Forget every observation and return to the prior margins.
    pub fn clear_evidence(&mut self) -> InferenceResult<()> {
        let result = self
            .tree
            .as_mut()
            .ok_or(InferenceError::NotInitialized)?
            .clear_evidence();
        self.discard_on_error(result)
    }

    /// Forget the observation on `node`. Returns `false` if there was none.
    pub fn retract_evidence(&mut self, node: usize) -> InferenceResult<bool> {
        let result = self
            .tree
            .as_mut()
            .ok_or(InferenceError::NotInitialized)?
            .retract_evidence(node);
        self.discard_on_error(result)
    }

    /// Re-run the two propagation passes on the current tree.
    pub fn propagate(&mut self) -> InferenceResult<()> {
        let result = self
            .tree
            .as_mut()
            .ok_or(InferenceError::NotInitialized)?
            .propagate();
        self.discard_on_error(result)
    }

    /// Probability vector of `node`.
    pub fn margin(&self, node: usize) -> InferenceResult<&[f64]> {
        let tree = self.tree.as_ref().ok_or(InferenceError::NotInitialized)?;
        tree.margins()
            .get(node)
            .map(Vec::as_slice)
            .ok_or(InferenceError::NodeNotFound { node })
    }

    /// Margins of all nodes, indexed by node.
    pub fn margins(&self) -> InferenceResult<&[Vec<f64>]> {
        self.tree
            .as_ref()
            .map(JunctionTree::margins)
            .ok_or(InferenceError::NotInitialized)
    }

    pub fn tree(&self) -> Option<&JunctionTree> {
        self.tree.as_ref()
    }

    pub fn is_built(&self) -> bool {
        self.tree.is_some()
    }

    pub fn summary(&self) -> InferenceResult<TreeSummary> {
        self.tree
            .as_ref()
            .map(JunctionTree::summary)
            .ok_or(InferenceError::NotInitialized)
    }

    fn discard_on_error<T>(&mut self, result: InferenceResult<T>) -> InferenceResult<T> {
        if matches!(result, Err(ref e) if !e.is_lookup_failure()) {
            self.tree = None;
        }
        result
    }
}

impl Default for MarginCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Structure first: CPT rows are only read once parent indices are known to be valid.
fn validate_network(
    network: &dyn BayesianNetwork,
    config: &InferenceConfig,
) -> InferenceResult<()> {
    validate_structure(network)?;
    validate_cpts(network, config.effective_cpt_tolerance())
}
