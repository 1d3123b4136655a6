//! `DiscreteNetwork`: named nodes, parent lists, and row-major CPTs.

use petgraph::graph::NodeIndex;
use tracing::debug;

use super::dag_enforcement::{self, ParentGraph};
use crate::constants::DEFAULT_CPT_TOLERANCE;
use crate::errors::NetworkError;
use crate::traits::BayesianNetwork;
use crate::types::collections::{FxHashMap, SmallVec4};

/// A single variable of the network.
#[derive(Debug, Clone)]
pub struct NetworkNode {
    pub name: String,
    pub cardinality: usize,
    pub parents: SmallVec4<usize>,
    /// Row-major: row = parent configuration, column = own value.
    pub cpt: Vec<f64>,
}

impl NetworkNode {
    fn uniform_cpt(&mut self, parent_configs: usize) {
        let p = 1.0 / self.cardinality as f64;
        self.cpt = vec![p; parent_configs * self.cardinality];
    }
}

/// A discrete Bayesian network held in memory.
///
/// Nodes get dense indices in insertion order. New nodes and nodes whose
/// parent set changes carry uniform CPT rows until `set_cpt` is called.
#[derive(Debug, Clone, Default)]
pub struct DiscreteNetwork {
    nodes: Vec<NetworkNode>,
    index: FxHashMap<String, usize>,
    dag: ParentGraph,
}

impl DiscreteNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with `cardinality` states and return its index.
    pub fn add_node(&mut self, name: &str, cardinality: usize) -> Result<usize, NetworkError> {
        if self.index.contains_key(name) {
            return Err(NetworkError::DuplicateNode {
                name: name.to_string(),
            });
        }
        if cardinality == 0 {
            return Err(NetworkError::ZeroCardinality {
                name: name.to_string(),
            });
        }
        let id = self.nodes.len();
        let mut node = NetworkNode {
            name: name.to_string(),
            cardinality,
            parents: SmallVec4::new(),
            cpt: Vec::new(),
        };
        node.uniform_cpt(1);
        self.nodes.push(node);
        self.index.insert(name.to_string(), id);
        self.dag.add_node(id);
        Ok(id)
    }

    /// Append `parent` to `child`'s parent list. Resets `child`'s CPT to uniform.
    pub fn add_parent(&mut self, child: usize, parent: usize) -> Result<(), NetworkError> {
        self.check_node(child)?;
        self.check_node(parent)?;
        if self.nodes[child].parents.contains(&parent) {
            return Err(NetworkError::DuplicateParent {
                child: self.nodes[child].name.clone(),
                parent: self.nodes[parent].name.clone(),
            });
        }
        let (p, c) = (NodeIndex::new(parent), NodeIndex::new(child));
        if dag_enforcement::would_create_cycle(&self.dag, p, c) {
            debug!(
                parent = %self.nodes[parent].name,
                child = %self.nodes[child].name,
                "rejected parent edge that would close a cycle"
            );
            return Err(NetworkError::CycleDetected {
                path: format!(
                    "{} -> {} -> ... -> {}",
                    self.nodes[parent].name, self.nodes[child].name, self.nodes[parent].name
                ),
            });
        }
        self.dag.add_edge(p, c, ());
        self.nodes[child].parents.push(parent);
        let configs = self.parent_configurations(child);
        self.nodes[child].uniform_cpt(configs);
        Ok(())
    }

    /// Replace `node`'s CPT, checking shape and that every row sums to 1.
    pub fn set_cpt(&mut self, node: usize, cpt: Vec<f64>) -> Result<(), NetworkError> {
        self.set_cpt_with_tolerance(node, cpt, DEFAULT_CPT_TOLERANCE)
    }

    pub fn set_cpt_with_tolerance(
        &mut self,
        node: usize,
        cpt: Vec<f64>,
        tolerance: f64,
    ) -> Result<(), NetworkError> {
        self.check_node(node)?;
        let card = self.nodes[node].cardinality;
        let expected = self.parent_configurations(node) * card;
        if cpt.len() != expected {
            return Err(NetworkError::CptShape {
                name: self.nodes[node].name.clone(),
                expected,
                actual: cpt.len(),
            });
        }
        for (row, chunk) in cpt.chunks(card).enumerate() {
            let sum: f64 = chunk.iter().sum();
            let negative = chunk.iter().any(|p| *p < 0.0 || !p.is_finite());
            if negative || (sum - 1.0).abs() > tolerance {
                return Err(NetworkError::CptRow {
                    name: self.nodes[node].name.clone(),
                    row,
                    sum,
                });
            }
        }
        self.nodes[node].cpt = cpt;
        Ok(())
    }

    /// Look up a node index by name.
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn node(&self, node: usize) -> Option<&NetworkNode> {
        self.nodes.get(node)
    }

    /// Number of joint configurations of `node`'s parents (1 for a root).
    pub fn parent_configurations(&self, node: usize) -> usize {
        self.nodes[node]
            .parents
            .iter()
            .map(|&p| self.nodes[p].cardinality)
            .product()
    }

    /// True when the parent edges form a DAG. Always holds for networks
    /// built through `add_parent`.
    pub fn is_acyclic(&self) -> bool {
        dag_enforcement::is_acyclic(&self.dag)
    }

    fn check_node(&self, node: usize) -> Result<(), NetworkError> {
        if node >= self.nodes.len() {
            return Err(NetworkError::UnknownNode { node });
        }
        Ok(())
    }
}

impl BayesianNetwork for DiscreteNetwork {
    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn cardinality(&self, node: usize) -> usize {
        self.nodes[node].cardinality
    }

    fn parents(&self, node: usize) -> &[usize] {
        &self.nodes[node].parents
    }

    fn probability(&self, node: usize, parent_config: usize, value: usize) -> f64 {
        let n = &self.nodes[node];
        n.cpt[parent_config * n.cardinality + value]
    }

    fn node_name(&self, node: usize) -> &str {
        &self.nodes[node].name
    }
}
