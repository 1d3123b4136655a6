//! The read-only view of a Bayesian network that inference consumes.

/// Discrete Bayesian network as seen by the junction tree builder.
///
/// Nodes are addressed by dense indices `0..node_count()`. Parent
/// configurations are mixed-radix offsets over `parents(node)` in declared
/// order, last parent varying fastest.
pub trait BayesianNetwork {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Number of discrete states of `node`.
    fn cardinality(&self, node: usize) -> usize;

    /// Parent indices of `node`, in CPT order.
    fn parents(&self, node: usize) -> &[usize];

    /// P(node = value | parents = parent_config).
    fn probability(&self, node: usize, parent_config: usize, value: usize) -> f64;

    /// Display name, used only for diagnostics.
    fn node_name(&self, node: usize) -> &str;
}
