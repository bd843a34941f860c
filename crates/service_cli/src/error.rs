//! CLI error types.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `optcache` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Pricing or study failure.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Explicitly requested file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Command line argument has an unusable value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias of CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
