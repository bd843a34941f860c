//! Portfolio error types.
//!
//! Structured error types for portfolio operations, derived with `thiserror`.

use pricer_core::types::PricingError;
use thiserror::Error;

use super::DealId;

/// Errors that can occur during portfolio operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortfolioError {
    /// Deal not found in portfolio.
    #[error("Deal not found: {0}")]
    DealNotFound(DealId),

    /// Deal quantity is NaN or infinite.
    #[error("Invalid deal quantity: {0}")]
    InvalidQuantity(f64),

    /// Counterparty name is empty.
    #[error("Counterparty name must not be empty")]
    EmptyCounterparty,
}

impl From<PortfolioError> for PricingError {
    fn from(err: PortfolioError) -> Self {
        PricingError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_deal_not_found() {
        let err = PortfolioError::DealNotFound(DealId::new(7));
        assert_eq!(format!("{}", err), "Deal not found: 7");
    }

    #[test]
    fn test_error_display_invalid_quantity() {
        let err = PortfolioError::InvalidQuantity(f64::INFINITY);
        assert_eq!(format!("{}", err), "Invalid deal quantity: inf");
    }

    #[test]
    fn test_error_converts_to_validation() {
        let err: PricingError = PortfolioError::EmptyCounterparty.into();
        assert!(err.is_validation());
    }
}
