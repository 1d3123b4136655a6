//! In-memory discrete Bayesian network.

pub mod dag_enforcement;
pub mod discrete;

pub use discrete::{DiscreteNetwork, NetworkNode};
