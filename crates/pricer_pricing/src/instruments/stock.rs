//! Equity holding with the same caching discipline as options.

use std::sync::{Mutex, MutexGuard};

use pricer_core::market_data::MarketDataStore;
use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;
use tracing::debug;

use crate::cache::{CachePolicy, CacheStats, StockCacheKey, ValuationCache};

/// `num_shares` units of an equity; worth `num_shares × spot`.
///
/// The share count is part of the cache key because it may change between
/// valuations.
///
/// ```rust
/// use pricer_core::market_data::{EquityAssetMarketData, MarketDataStore};
/// use pricer_pricing::instruments::Stock;
///
/// let market = MarketDataStore::new()
///     .with_asset(EquityAssetMarketData::new("ACME", 100.0, 0.2).unwrap());
/// let mut stock = Stock::new("ACME", 10).unwrap();
/// assert_eq!(stock.price(&market).unwrap(), 1000.0);
/// stock.set_num_shares(100);
/// assert_eq!(stock.price(&market).unwrap(), 10000.0);
/// assert_eq!(stock.cache_stats().misses, 2);
/// ```
#[derive(Debug)]
pub struct Stock {
    asset_name: String,
    num_shares: i64,
    cache: Mutex<ValuationCache<StockCacheKey>>,
}

impl Stock {
    /// Holding of `num_shares` units of `asset_name` with an unbounded cache.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty asset name.
    pub fn new(asset_name: impl Into<String>, num_shares: i64) -> Result<Self, PricingError> {
        Self::with_cache_policy(asset_name, num_shares, CachePolicy::default())
    }

    /// Holding with an explicit cache policy.
    pub fn with_cache_policy(
        asset_name: impl Into<String>,
        num_shares: i64,
        policy: CachePolicy,
    ) -> Result<Self, PricingError> {
        let asset_name = asset_name.into();
        if asset_name.is_empty() {
            return Err(PricingError::Validation(
                "stock asset name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            asset_name,
            num_shares,
            cache: Mutex::new(ValuationCache::new(policy)),
        })
    }

    /// Underlying name.
    pub fn asset_name(&self) -> &str {
        &self.asset_name
    }

    /// Number of shares held.
    pub fn num_shares(&self) -> i64 {
        self.num_shares
    }

    /// Changes the number of shares held.
    pub fn set_num_shares(&mut self, num_shares: i64) {
        self.num_shares = num_shares;
    }

    /// Value of the holding under `market`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the underlying is missing, `Validation` when its
    /// record is not an equity.
    pub fn price(&self, market: &MarketDataStore) -> Result<f64, PricingError> {
        let spot = market.equity(&self.asset_name)?.spot();
        self.price_spot(spot)
    }

    /// Value of the holding at `spot`.
    pub fn price_spot(&self, spot: f64) -> Result<f64, PricingError> {
        let key = StockCacheKey::new(spot, self.num_shares);
        let asset = self.asset_name.as_str();

        let cached = self.lock_cache()?.get(&key);
        if let Some(value) = cached {
            debug!(asset, spot, num_shares = self.num_shares, "fetching price from cache");
            return Ok(value);
        }

        debug!(asset, spot, num_shares = self.num_shares, "computing price");
        let value = self.num_shares as f64 * spot;
        self.lock_cache()?.insert(key, value);
        Ok(value)
    }

    fn lock_cache(&self) -> Result<MutexGuard<'_, ValuationCache<StockCacheKey>>, PricingError> {
        self.cache
            .lock()
            .map_err(|_| PricingError::ModelFailure("valuation cache lock poisoned".to_string()))
    }

    /// Cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        match self.cache.lock() {
            Ok(cache) => cache.stats(),
            Err(poisoned) => poisoned.into_inner().stats(),
        }
    }
}

impl PartialEq for Stock {
    fn eq(&self, other: &Self) -> bool {
        self.asset_name == other.asset_name && self.num_shares == other.num_shares
    }
}

impl Priceable for Stock {
    fn price(&self, market: &MarketDataStore) -> Result<f64, PricingError> {
        Stock::price(self, market)
    }

    fn asset_name(&self) -> Option<&str> {
        Some(&self.asset_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::market_data::{EquityAssetMarketData, InterestRateAssetMarketData};

    fn market() -> MarketDataStore {
        MarketDataStore::new()
            .with_asset(EquityAssetMarketData::new("ACME", 100.0, 0.2).unwrap())
            .with_asset(InterestRateAssetMarketData::new("rfr", 0.05).unwrap())
    }

    #[test]
    fn test_repeat_is_cache_hit() {
        let stock = Stock::new("ACME", 10).unwrap();
        assert_eq!(stock.price(&market()).unwrap(), 1000.0);
        assert_eq!(stock.price(&market()).unwrap(), 1000.0);
        let stats = stock.cache_stats();
        assert_eq!((stats.hits, stats.misses), (1, 1));
    }

    #[test]
    fn test_wrong_kind_is_validation() {
        let stock = Stock::new("rfr", 1).unwrap();
        assert!(stock.price(&market()).unwrap_err().is_validation());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Stock::new("", 1).is_err());
    }

    #[test]
    fn test_short_position() {
        let stock = Stock::new("ACME", -5).unwrap();
        assert_eq!(stock.price_spot(20.0).unwrap(), -100.0);
    }
}
