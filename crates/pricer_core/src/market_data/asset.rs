//! Per-asset market data records.
//!
//! A snapshot holds two kinds of record: equity quotes (spot, volatility,
//! continuous dividend yield) and flat interest rates. Records are
//! immutable once built; scenario code derives bumped copies with
//! [`EquityAssetMarketData::with_spot`] instead of mutating in place.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::MarketDataError;

/// Equity quote for a single underlying.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::EquityAssetMarketData;
///
/// let acme = EquityAssetMarketData::new("ACME", 100.0, 0.1).unwrap();
/// assert_eq!(acme.dividend_yield(), 0.0);
///
/// let paying = acme.with_dividend_yield(0.03).unwrap();
/// assert_eq!(paying.dividend_yield(), 0.03);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EquityRecord")]
pub struct EquityAssetMarketData {
    asset_name: String,
    spot: f64,
    volatility: f64,
    dividend_yield: f64,
}

#[derive(Deserialize)]
struct EquityRecord {
    asset_name: String,
    spot: f64,
    volatility: f64,
    #[serde(default)]
    dividend_yield: f64,
}

impl TryFrom<EquityRecord> for EquityAssetMarketData {
    type Error = MarketDataError;

    fn try_from(record: EquityRecord) -> Result<Self, Self::Error> {
        EquityAssetMarketData::new(record.asset_name, record.spot, record.volatility)?
            .with_dividend_yield(record.dividend_yield)
    }
}

impl EquityAssetMarketData {
    /// Creates an equity record with zero dividend yield.
    ///
    /// A negative spot is accepted but logged as a warning. A negative or
    /// non-finite volatility is rejected.
    pub fn new(
        asset_name: impl Into<String>,
        spot: f64,
        volatility: f64,
    ) -> Result<Self, MarketDataError> {
        let asset_name = asset_name.into();
        if asset_name.is_empty() {
            return Err(MarketDataError::EmptyName);
        }
        if !spot.is_finite() {
            return Err(MarketDataError::NonFinite {
                asset_name,
                field: "spot",
            });
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(MarketDataError::InvalidVolatility {
                asset_name,
                volatility,
            });
        }
        if spot < 0.0 {
            warn!(asset = %asset_name, spot, "negative spot in equity market data");
        }
        Ok(Self {
            asset_name,
            spot,
            volatility,
            dividend_yield: 0.0,
        })
    }

    /// Returns a copy with the given continuously compounded dividend yield.
    pub fn with_dividend_yield(mut self, dividend_yield: f64) -> Result<Self, MarketDataError> {
        if !dividend_yield.is_finite() {
            return Err(MarketDataError::NonFinite {
                asset_name: self.asset_name,
                field: "dividend_yield",
            });
        }
        self.dividend_yield = dividend_yield;
        Ok(self)
    }

    /// Returns a copy with a different spot, keeping every other field.
    pub fn with_spot(&self, spot: f64) -> Result<Self, MarketDataError> {
        let bumped = Self::new(self.asset_name.clone(), spot, self.volatility)?;
        Ok(Self {
            dividend_yield: self.dividend_yield,
            ..bumped
        })
    }

    /// Underlying name.
    pub fn asset_name(&self) -> &str {
        &self.asset_name
    }

    /// Spot price.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Black-Scholes volatility.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Continuous dividend yield.
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }
}

/// Flat continuously compounded interest rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RateRecord")]
pub struct InterestRateAssetMarketData {
    asset_name: String,
    interest_rate: f64,
}

#[derive(Deserialize)]
struct RateRecord {
    asset_name: String,
    interest_rate: f64,
}

impl TryFrom<RateRecord> for InterestRateAssetMarketData {
    type Error = MarketDataError;

    fn try_from(record: RateRecord) -> Result<Self, Self::Error> {
        InterestRateAssetMarketData::new(record.asset_name, record.interest_rate)
    }
}

impl InterestRateAssetMarketData {
    /// Creates a rate record. Negative rates are legitimate.
    pub fn new(asset_name: impl Into<String>, interest_rate: f64) -> Result<Self, MarketDataError> {
        let asset_name = asset_name.into();
        if asset_name.is_empty() {
            return Err(MarketDataError::EmptyName);
        }
        if !interest_rate.is_finite() {
            return Err(MarketDataError::NonFinite {
                asset_name,
                field: "interest_rate",
            });
        }
        Ok(Self {
            asset_name,
            interest_rate,
        })
    }

    /// Curve name.
    pub fn asset_name(&self) -> &str {
        &self.asset_name
    }

    /// Rate level.
    pub fn interest_rate(&self) -> f64 {
        self.interest_rate
    }
}

/// A single record in a market data snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssetMarketData {
    /// Equity quote
    Equity(EquityAssetMarketData),
    /// Flat interest rate
    InterestRate(InterestRateAssetMarketData),
}

impl AssetMarketData {
    /// Name the record is stored under.
    pub fn asset_name(&self) -> &str {
        match self {
            AssetMarketData::Equity(e) => e.asset_name(),
            AssetMarketData::InterestRate(r) => r.asset_name(),
        }
    }

    /// Human-readable kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            AssetMarketData::Equity(_) => "equity",
            AssetMarketData::InterestRate(_) => "interest rate",
        }
    }

    /// Equity view of the record, if it is one.
    pub fn as_equity(&self) -> Option<&EquityAssetMarketData> {
        match self {
            AssetMarketData::Equity(e) => Some(e),
            AssetMarketData::InterestRate(_) => None,
        }
    }

    /// Interest rate view of the record, if it is one.
    pub fn as_interest_rate(&self) -> Option<&InterestRateAssetMarketData> {
        match self {
            AssetMarketData::InterestRate(r) => Some(r),
            AssetMarketData::Equity(_) => None,
        }
    }
}

impl From<EquityAssetMarketData> for AssetMarketData {
    fn from(e: EquityAssetMarketData) -> Self {
        AssetMarketData::Equity(e)
    }
}

impl From<InterestRateAssetMarketData> for AssetMarketData {
    fn from(r: InterestRateAssetMarketData) -> Self {
        AssetMarketData::InterestRate(r)
    }
}
