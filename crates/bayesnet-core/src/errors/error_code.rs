//! BayesnetErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// that callers can match on without parsing messages.
pub trait BayesnetErrorCode {
    /// Returns the error code string (e.g., "STRUCTURAL_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const STRUCTURAL_ERROR: &str = "STRUCTURAL_ERROR";
pub const INTERRUPTED: &str = "INTERRUPTED";
pub const LOOKUP_FAILURE: &str = "LOOKUP_FAILURE";
pub const INVALID_NETWORK: &str = "INVALID_NETWORK";
pub const CLIQUE_TOO_LARGE: &str = "CLIQUE_TOO_LARGE";
pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
pub const CYCLE_DETECTED: &str = "CYCLE_DETECTED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
