//! Errors raised while assembling a discrete network.

use super::error_code::{self, BayesnetErrorCode};

/// Errors that can occur while building a `DiscreteNetwork`.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("node '{name}' already exists")]
    DuplicateNode { name: String },

    #[error("unknown node index {node}")]
    UnknownNode { node: usize },

    #[error("node '{name}' must have at least one state")]
    ZeroCardinality { name: String },

    #[error("cycle detected in network: {path}")]
    CycleDetected { path: String },

    #[error("node '{child}' already has parent '{parent}'")]
    DuplicateParent { child: String, parent: String },

    #[error("CPT for '{name}' has {actual} entries, expected {expected}")]
    CptShape {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("CPT row {row} of '{name}' sums to {sum}, expected 1")]
    CptRow { name: String, row: usize, sum: f64 },
}

impl BayesnetErrorCode for NetworkError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::CycleDetected { .. } => error_code::CYCLE_DETECTED,
            _ => error_code::NETWORK_ERROR,
        }
    }
}
