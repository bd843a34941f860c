//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: The error every valuation entry point returns
//! - `DateError`: Errors from date construction and parsing
//!
//! Layer-specific errors further up the stack (instrument validation,
//! Monte Carlo configuration, portfolio bookkeeping) convert into
//! `PricingError` through `From` impls so that `?` flows across crates.

use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `Validation`: Invalid construction arguments (raised eagerly)
/// - `UnsupportedConfiguration`: Structurally valid but unimplemented
///   exercise/method combination
/// - `NotFound`: Asset missing from the market data snapshot
/// - `InvalidInput`: Invalid market data or parameters handed to a model
/// - `NumericalInstability`: Computation produced a non-finite result
/// - `ModelFailure`: Model assumptions violated or internal state unusable
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::NotFound { asset_name: "ACME".to_string() };
/// assert_eq!(format!("{}", err), "Asset not found in market data: ACME");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid construction arguments.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Exercise style and pricing method combination has no engine.
    #[error("Unsupported configuration: {method} pricing is not available for {exercise} exercise")]
    UnsupportedConfiguration {
        /// Exercise style name
        exercise: String,
        /// Pricing method name
        method: String,
    },

    /// Asset missing from the market data snapshot.
    #[error("Asset not found in market data: {asset_name}")]
    NotFound {
        /// Name that was looked up
        asset_name: String,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Model failed to produce valid result.
    #[error("Model failure: {0}")]
    ModelFailure(String),
}

impl PricingError {
    /// Returns true for errors raised while validating construction arguments.
    pub fn is_validation(&self) -> bool {
        matches!(self, PricingError::Validation(_))
    }
}

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

impl From<DateError> for PricingError {
    fn from(err: DateError) -> Self {
        PricingError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_configuration_display() {
        let err = PricingError::UnsupportedConfiguration {
            exercise: "American".to_string(),
            method: "Analytical".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported configuration: Analytical pricing is not available for American exercise"
        );
    }

    #[test]
    fn test_validation_display() {
        let err = PricingError::Validation("unknown pricing method: Nonsense".to_string());
        assert_eq!(
            err.to_string(),
            "Validation error: unknown pricing method: Nonsense"
        );
        assert!(err.is_validation());
    }

    #[test]
    fn test_date_error_converts_to_validation() {
        let err: PricingError = DateError::ParseError("bad".to_string()).into();
        assert_eq!(
            err,
            PricingError::Validation("Date parse error: bad".to_string())
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<PricingError>();
        assert_error::<DateError>();
    }
}
