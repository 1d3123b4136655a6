//! Error handling for bayesnet.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod inference_error;
pub mod network_error;

pub use config_error::ConfigError;
pub use error_code::BayesnetErrorCode;
pub use inference_error::{InferenceError, InferenceResult};
pub use network_error::NetworkError;
