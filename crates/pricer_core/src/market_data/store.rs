//! Named collection of market data records for one valuation scenario.

use std::collections::HashMap;

use tracing::{info, warn};

use super::asset::{AssetMarketData, EquityAssetMarketData, InterestRateAssetMarketData};
use super::error::MarketDataError;
use crate::types::Date;

/// Reserved asset name of the risk-free rate record.
pub const RISK_FREE_RATE_ASSET: &str = "rfr";

/// Market data snapshot keyed by asset name.
///
/// Pricing only ever borrows the store immutably, so a single snapshot can
/// be shared by every instrument (and every thread) of a valuation pass.
/// Scenario loops build a modified copy rather than mutating a store that
/// is being priced against.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{
///     EquityAssetMarketData, InterestRateAssetMarketData, MarketDataStore,
/// };
/// use pricer_core::types::Date;
///
/// let mut market = MarketDataStore::with_scenario_date(Date::from_ymd(2025, 1, 1).unwrap());
/// market.add(EquityAssetMarketData::new("ACME", 100.0, 0.1).unwrap());
/// market.add(InterestRateAssetMarketData::new("rfr", 0.02).unwrap());
///
/// assert_eq!(market.equity("ACME").unwrap().spot(), 100.0);
/// assert_eq!(market.risk_free_rate().unwrap(), 0.02);
/// assert!(market.lookup("MISSING").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketDataStore {
    scenario_date: Option<Date>,
    assets: HashMap<String, AssetMarketData>,
}

impl MarketDataStore {
    /// Creates an empty store valued as of today.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store pinned to a scenario date.
    pub fn with_scenario_date(date: Date) -> Self {
        Self {
            scenario_date: Some(date),
            assets: HashMap::new(),
        }
    }

    /// Scenario date, when pinned.
    pub fn scenario_date(&self) -> Option<Date> {
        self.scenario_date
    }

    /// Pins (or unpins) the scenario date.
    pub fn set_scenario_date(&mut self, date: Option<Date>) {
        self.scenario_date = date;
    }

    /// Date prices are computed as of: the scenario date, else today.
    pub fn valuation_date(&self) -> Date {
        self.scenario_date.unwrap_or_else(Date::today)
    }

    /// Inserts a record, replacing any existing record of the same name.
    ///
    /// Returns the replaced record. Overwrites are logged at info level.
    pub fn add(&mut self, asset: impl Into<AssetMarketData>) -> Option<AssetMarketData> {
        let asset = asset.into();
        let name = asset.asset_name().to_string();
        let previous = self.assets.insert(name, asset);
        if let Some(old) = &previous {
            info!(
                asset = old.asset_name(),
                kind = old.kind(),
                "overwriting existing market data"
            );
        }
        previous
    }

    /// Inserts every record, in order. Later entries win on duplicate names.
    pub fn add_all<I>(&mut self, assets: I)
    where
        I: IntoIterator,
        I::Item: Into<AssetMarketData>,
    {
        for asset in assets {
            self.add(asset);
        }
    }

    /// Builder-style [`add`](Self::add).
    pub fn with_asset(mut self, asset: impl Into<AssetMarketData>) -> Self {
        self.add(asset);
        self
    }

    /// Looks up a record by name.
    pub fn lookup(&self, asset_name: &str) -> Result<&AssetMarketData, MarketDataError> {
        self.assets
            .get(asset_name)
            .ok_or_else(|| MarketDataError::NotFound {
                asset_name: asset_name.to_string(),
            })
    }

    /// Looks up a record by name, logging a warning instead of failing.
    pub fn lookup_or_warn(&self, asset_name: &str) -> Option<&AssetMarketData> {
        let found = self.assets.get(asset_name);
        if found.is_none() {
            warn!(asset = asset_name, "asset not found in market data");
        }
        found
    }

    /// Equity record for `asset_name`.
    pub fn equity(&self, asset_name: &str) -> Result<&EquityAssetMarketData, MarketDataError> {
        let record = self.lookup(asset_name)?;
        record.as_equity().ok_or(MarketDataError::WrongKind {
            asset_name: asset_name.to_string(),
            expected: "equity",
            found: record.kind(),
        })
    }

    /// Interest rate record for `asset_name`.
    pub fn interest_rate(
        &self,
        asset_name: &str,
    ) -> Result<&InterestRateAssetMarketData, MarketDataError> {
        let record = self.lookup(asset_name)?;
        record.as_interest_rate().ok_or(MarketDataError::WrongKind {
            asset_name: asset_name.to_string(),
            expected: "interest rate",
            found: record.kind(),
        })
    }

    /// Level of the reserved [`RISK_FREE_RATE_ASSET`] record.
    pub fn risk_free_rate(&self) -> Result<f64, MarketDataError> {
        Ok(self.interest_rate(RISK_FREE_RATE_ASSET)?.interest_rate())
    }

    /// Whether a record exists under `asset_name`.
    pub fn contains(&self, asset_name: &str) -> bool {
        self.assets.contains_key(asset_name)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Iterates over the records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &AssetMarketData> {
        self.assets.values()
    }
}
