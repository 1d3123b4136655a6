//! Collaborator traits consumed by the inference engine.

pub mod cancellation;
pub mod network;

pub use cancellation::{Cancellable, CancellationToken};
pub use network::BayesianNetwork;
