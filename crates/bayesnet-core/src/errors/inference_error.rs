//! Inference errors: construction, cancellation, and lookup failures.

use super::error_code::{self, BayesnetErrorCode};
use super::ConfigError;

/// Errors raised while building or querying a junction tree.
///
/// `Structural` is an invariant violation during tree construction and is
/// never retried. `Interrupted` is cooperative cancellation; the partially
/// built tree must be discarded. `NotInitialized`, `NodeNotFound` and
/// `InvalidValue` are caller errors (lookup failures) that leave the tree
/// untouched.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("structural error: {details}")]
    Structural { details: String },

    #[error("inference interrupted")]
    Interrupted,

    #[error("junction tree has not been built")]
    NotInitialized,

    #[error("node {node} is not part of the junction tree")]
    NodeNotFound { node: usize },

    #[error("value {value} out of range for node {node} with {cardinality} states")]
    InvalidValue {
        node: usize,
        value: usize,
        cardinality: usize,
    },

    #[error("invalid network: {reason}")]
    InvalidNetwork { reason: String },

    #[error("clique over {members} nodes exceeds the table limit of {limit} entries")]
    CliqueTooLarge { members: usize, limit: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl InferenceError {
    /// Shorthand for a structural invariant violation.
    pub fn structural(details: impl Into<String>) -> Self {
        Self::Structural {
            details: details.into(),
        }
    }

    /// True for caller errors against an unbuilt tree or unknown node/value.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Self::NotInitialized | Self::NodeNotFound { .. } | Self::InvalidValue { .. }
        )
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted)
    }
}

impl BayesnetErrorCode for InferenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Structural { .. } => error_code::STRUCTURAL_ERROR,
            Self::Interrupted => error_code::INTERRUPTED,
            Self::NotInitialized | Self::NodeNotFound { .. } | Self::InvalidValue { .. } => {
                error_code::LOOKUP_FAILURE
            }
            Self::InvalidNetwork { .. } => error_code::INVALID_NETWORK,
            Self::CliqueTooLarge { .. } => error_code::CLIQUE_TOO_LARGE,
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Result alias used throughout the inference crate.
pub type InferenceResult<T> = Result<T, InferenceError>;
