//! Market data error types.

use crate::types::PricingError;
use thiserror::Error;

/// Market data snapshot errors.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::NotFound { asset_name: "rfr".to_string() };
/// assert!(format!("{}", err).contains("rfr"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// No record under the requested name.
    #[error("Asset not found in market data: {asset_name}")]
    NotFound {
        /// Name that was looked up
        asset_name: String,
    },

    /// Record exists but holds a different kind of data.
    #[error("Asset {asset_name} holds {found} data, expected {expected}")]
    WrongKind {
        /// Name that was looked up
        asset_name: String,
        /// Kind the caller asked for
        expected: &'static str,
        /// Kind actually stored
        found: &'static str,
    },

    /// Volatility must be finite and non-negative.
    #[error("Invalid volatility for {asset_name}: {volatility}")]
    InvalidVolatility {
        /// Asset the quote belongs to
        asset_name: String,
        /// Offending value
        volatility: f64,
    },

    /// Quote is NaN or infinite.
    #[error("Non-finite {field} for {asset_name}")]
    NonFinite {
        /// Asset the quote belongs to
        asset_name: String,
        /// Field name
        field: &'static str,
    },

    /// Empty asset name.
    #[error("Asset name must not be empty")]
    EmptyName,
}

impl From<MarketDataError> for PricingError {
    fn from(err: MarketDataError) -> Self {
        match err {
            MarketDataError::NotFound { asset_name } => PricingError::NotFound { asset_name },
            other => PricingError::Validation(other.to_string()),
        }
    }
}
