//! Configuration system for bayesnet.
//! TOML-based, layered resolution: overrides > env > project file > defaults.

pub mod inference_config;

pub use inference_config::{ConfigOverrides, InferenceConfig};
