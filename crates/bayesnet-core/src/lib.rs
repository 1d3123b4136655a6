//! # bayesnet-core
//!
//! Foundation crate for the bayesnet inference workspace.
//! Defines the network model, collaborator traits, errors, config, tracing
//! setup, and constants. The inference crate depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod network;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::InferenceConfig;
pub use errors::{InferenceError, InferenceResult, NetworkError};
pub use network::DiscreteNetwork;
pub use traits::{BayesianNetwork, Cancellable, CancellationToken};
