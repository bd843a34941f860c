//! Error types for closed-form pricing.

use pricer_core::types::{PricingError, PricingMethod};
use thiserror::Error;

/// Closed-form pricing errors.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidSpot { spot: -1.0 };
/// assert!(format!("{}", err).contains("spot"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Spot must be positive for a lognormal model.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Negative volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// No closed form exists for the exercise style.
    #[error("Unsupported exercise style: {style}")]
    UnsupportedExerciseStyle {
        /// Exercise style name
        style: String,
    },

    /// Formula produced a non-finite value.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidVolatility { .. } | AnalyticalError::InvalidSpot { .. } => {
                PricingError::InvalidInput(err.to_string())
            }
            AnalyticalError::UnsupportedExerciseStyle { style } => {
                PricingError::UnsupportedConfiguration {
                    exercise: style,
                    method: PricingMethod::Analytical.to_string(),
                }
            }
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_spot_to_pricing_error() {
        let pricing_err: PricingError = AnalyticalError::InvalidSpot { spot: -50.0 }.into();
        match pricing_err {
            PricingError::InvalidInput(msg) => assert!(msg.contains("spot")),
            other => panic!("Expected InvalidInput variant, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_exercise_to_pricing_error() {
        let pricing_err: PricingError = AnalyticalError::UnsupportedExerciseStyle {
            style: "Bermudan".to_string(),
        }
        .into();
        assert_eq!(
            pricing_err,
            PricingError::UnsupportedConfiguration {
                exercise: "Bermudan".to_string(),
                method: "ANALYTICAL".to_string(),
            }
        );
    }

    #[test]
    fn test_numerical_instability_to_pricing_error() {
        let pricing_err: PricingError = AnalyticalError::NumericalInstability {
            message: "Overflow".to_string(),
        }
        .into();
        assert!(matches!(
            pricing_err,
            PricingError::NumericalInstability(m) if m.contains("Overflow")
        ));
    }
}
