//! Portfolios of deals.
//!
//! A [`Portfolio`] owns [`Deal`]s keyed by [`DealId`] and prices as the sum
//! of each instrument's price times its quantity.

mod deal;
mod error;
mod ids;

pub use deal::{Deal, UNKNOWN_COUNTERPARTY};
pub use error::PortfolioError;
pub use ids::DealId;

use std::collections::BTreeMap;
use std::sync::Arc;

use pricer_core::market_data::MarketDataStore;
use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;
use pricer_pricing::instruments::Instrument;
use tracing::debug;

/// Collection of deals with stable ids.
///
/// Iteration is in booking order.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pricer_core::market_data::{
///     EquityAssetMarketData, InterestRateAssetMarketData, MarketDataStore,
/// };
/// use pricer_pricing::instruments::{Instrument, Stock};
/// use pricer_risk::portfolio::Portfolio;
///
/// let market = MarketDataStore::new()
///     .with_asset(EquityAssetMarketData::new("ACME", 100.0, 0.2).unwrap())
///     .with_asset(InterestRateAssetMarketData::new("rfr", 0.05).unwrap());
/// let stock: Arc<Instrument> = Arc::new(Stock::new("ACME", 1).unwrap().into());
///
/// let mut portfolio = Portfolio::new();
/// portfolio.create_deal(Arc::clone(&stock), 2.0).unwrap();
/// portfolio.create_deal(stock, -0.5).unwrap();
/// assert_eq!(portfolio.price(&market).unwrap(), 150.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    deals: BTreeMap<DealId, Deal>,
    deal_counter: u64,
}

impl Portfolio {
    /// Creates an empty portfolio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Books `quantity` of `instrument` with an unknown counterparty.
    pub fn create_deal(
        &mut self,
        instrument: Arc<Instrument>,
        quantity: f64,
    ) -> Result<DealId, PortfolioError> {
        Ok(self.add_deal(Deal::new(instrument, quantity)?))
    }

    /// Adds a prebuilt deal and returns its id.
    pub fn add_deal(&mut self, deal: Deal) -> DealId {
        self.deal_counter += 1;
        let id = DealId::new(self.deal_counter);
        debug!(deal = %id, counterparty = deal.counterparty(), "deal added");
        self.deals.insert(id, deal);
        id
    }

    /// Removes and returns a deal.
    pub fn remove_deal(&mut self, id: DealId) -> Result<Deal, PortfolioError> {
        self.deals.remove(&id).ok_or(PortfolioError::DealNotFound(id))
    }

    /// Looks up a deal.
    pub fn deal(&self, id: DealId) -> Result<&Deal, PortfolioError> {
        self.deals.get(&id).ok_or(PortfolioError::DealNotFound(id))
    }

    /// Deals booked against `counterparty`.
    pub fn deals_with_counterparty(&self, counterparty: &str) -> Vec<(DealId, &Deal)> {
        self.iter()
            .filter(|(_, deal)| deal.counterparty() == counterparty)
            .collect()
    }

    /// Deals on a contract equal to `instrument`.
    pub fn deals_on_instrument(&self, instrument: &Instrument) -> Vec<(DealId, &Deal)> {
        self.iter()
            .filter(|(_, deal)| deal.instrument().as_ref() == instrument)
            .collect()
    }

    /// Deals in booking order.
    pub fn iter(&self) -> impl Iterator<Item = (DealId, &Deal)> {
        self.deals.iter().map(|(id, deal)| (*id, deal))
    }

    /// Number of deals.
    pub fn len(&self) -> usize {
        self.deals.len()
    }

    /// True when no deal is booked.
    pub fn is_empty(&self) -> bool {
        self.deals.is_empty()
    }

    /// Sum of every deal's value under `market`.
    pub fn price(&self, market: &MarketDataStore) -> Result<f64, PricingError> {
        self.deals.values().map(|deal| deal.value(market)).sum()
    }
}

impl Priceable for Portfolio {
    fn price(&self, market: &MarketDataStore) -> Result<f64, PricingError> {
        Portfolio::price(self, market)
    }
}
