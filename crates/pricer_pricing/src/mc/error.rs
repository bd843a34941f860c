//! Error types for Monte Carlo configuration.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Configuration error for Monte Carlo pricing.
///
/// Raised when simulation parameters are outside their valid ranges.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Path count outside valid range [1, 10_000_000].
    #[error("Invalid path count {0}: must be in range [1, 10_000_000]")]
    InvalidPathCount(usize),

    /// Step count outside valid range [1, 10_000].
    #[error("Invalid step count {0}: must be in range [1, 10_000]")]
    InvalidStepCount(usize),

    /// Stored path grid `num_paths × (steps + 1)` larger than the allowed
    /// number of values.
    #[error("Path grid of {num_paths} paths x {steps} steps exceeds {limit} stored values")]
    PathGridTooLarge {
        /// Requested path count.
        num_paths: usize,
        /// Requested step count.
        steps: usize,
        /// Maximum number of stored spot values.
        limit: usize,
    },

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::Validation(err.to_string())
    }
}
