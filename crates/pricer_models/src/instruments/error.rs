//! Instrument error types.
//!
//! Every variant describes a construction argument that was rejected, so
//! all of them surface as `PricingError::Validation`.

use pricer_core::types::{Date, PricingError};
use thiserror::Error;

/// Instrument construction errors.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Strike must be positive and finite.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Digital cash amount must be positive and finite.
    #[error("Invalid cash amount: {cash}")]
    InvalidCash {
        /// The invalid cash value
        cash: f64,
    },

    /// Empty underlying name.
    #[error("Asset name must not be empty")]
    EmptyAssetName,

    /// Unrecognised option right.
    #[error("Unknown option right '{0}', expected 'call' or 'put'")]
    UnknownRight(String),

    /// Unrecognised payoff kind.
    #[error("Unknown payoff kind '{0}', expected 'vanilla' or 'binary'")]
    UnknownPayoff(String),

    /// Unrecognised exercise style.
    #[error("Unknown exercise style '{0}', expected 'european', 'american' or 'bermudan'")]
    UnknownExercise(String),

    /// Bermudan option without exercise dates.
    #[error("Bermudan exercise requires at least one exercise date")]
    EmptyExerciseSchedule,

    /// Exercise date falls after maturity.
    #[error("Exercise date {date} is after maturity {maturity}")]
    ExerciseAfterMaturity {
        /// Offending exercise date
        date: Date,
        /// Contract maturity
        maturity: Date,
    },

    /// A field required by the chosen facets is absent.
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_is_validation() {
        let errors = vec![
            InstrumentError::InvalidStrike { strike: 0.0 },
            InstrumentError::InvalidCash { cash: -1.0 },
            InstrumentError::EmptyAssetName,
            InstrumentError::UnknownRight("straddle".to_string()),
            InstrumentError::UnknownPayoff("asian".to_string()),
            InstrumentError::UnknownExercise("canary".to_string()),
            InstrumentError::EmptyExerciseSchedule,
            InstrumentError::MissingField("earliest_exercise"),
        ];
        for err in errors {
            let message = err.to_string();
            assert_eq!(PricingError::from(err), PricingError::Validation(message));
        }
    }
}
