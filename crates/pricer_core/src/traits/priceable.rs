//! Trait for entities that can be valued against a market data snapshot.

use crate::market_data::MarketDataStore;
use crate::types::PricingError;

/// Trait for entities that can be priced.
///
/// Implementors read whatever they need from the snapshot (spot, volatility,
/// the risk-free rate) and return a present value. Implementations are free
/// to memoise internally, so `price` takes `&self` and repeated calls with an
/// unchanged snapshot must return the same value.
///
/// Dispatch is static: portfolios hold an instrument enum rather than
/// `Box<dyn Priceable>`.
///
/// ```
/// use pricer_core::market_data::{EquityAssetMarketData, MarketDataStore};
/// use pricer_core::traits::Priceable;
/// use pricer_core::types::PricingError;
///
/// struct Cash(f64);
///
/// impl Priceable for Cash {
///     fn price(&self, _market: &MarketDataStore) -> Result<f64, PricingError> {
///         Ok(self.0)
///     }
/// }
///
/// let market = MarketDataStore::new();
/// assert_eq!(Cash(5.0).price(&market).unwrap(), 5.0);
/// ```
pub trait Priceable {
    /// Present value under `market`.
    fn price(&self, market: &MarketDataStore) -> Result<f64, PricingError>;

    /// Name of the underlying asset, when the entity has one.
    fn asset_name(&self) -> Option<&str> {
        None
    }
}

impl<P: Priceable + ?Sized> Priceable for &P {
    fn price(&self, market: &MarketDataStore) -> Result<f64, PricingError> {
        (**self).price(market)
    }

    fn asset_name(&self) -> Option<&str> {
        (**self).asset_name()
    }
}
