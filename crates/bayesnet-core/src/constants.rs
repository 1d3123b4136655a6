//! Shared constants for the bayesnet workspace.

/// Default upper bound on the number of entries in a single clique table (2^24).
pub const DEFAULT_MAX_CLIQUE_ENTRIES: usize = 16_777_216;

/// Default tolerance when checking that a CPT row sums to 1.
pub const DEFAULT_CPT_TOLERANCE: f64 = 1e-6;

/// Default number of table entries enumerated between cancellation polls.
pub const DEFAULT_CANCEL_POLL_INTERVAL: usize = 4096;

/// Invariant checks are off unless explicitly requested.
pub const DEFAULT_CHECK_INVARIANTS: bool = false;

/// Project config file name looked up by `InferenceConfig::load`.
pub const CONFIG_FILE_NAME: &str = "bayesnet.toml";

/// Environment variable read by `init_tracing`.
pub const LOG_ENV_VAR: &str = "BAYESNET_LOG";

/// Filter used when `BAYESNET_LOG` is missing or invalid.
pub const DEFAULT_LOG_FILTER: &str = "bayesnet=info";
