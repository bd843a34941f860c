//! Priced instruments.
//!
//! - [`OptionInstrument`]: option terms bound to a resolved engine
//! - [`Stock`]: equity holding
//! - [`Instrument`]: static-dispatch union held by portfolios

mod option;
mod stock;

pub use option::{OptionBuilder, OptionInstrument};
pub use stock::Stock;

use pricer_core::market_data::MarketDataStore;
use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;

/// Any priced instrument.
#[derive(Debug, PartialEq)]
pub enum Instrument {
    /// Option contract.
    Option(OptionInstrument),
    /// Equity holding.
    Stock(Stock),
}

impl Instrument {
    /// Underlying name.
    pub fn asset_name(&self) -> &str {
        match self {
            Instrument::Option(o) => o.terms().asset_name(),
            Instrument::Stock(s) => s.asset_name(),
        }
    }

    /// Value under `market`.
    pub fn price(&self, market: &MarketDataStore) -> Result<f64, PricingError> {
        match self {
            Instrument::Option(o) => o.price(market),
            Instrument::Stock(s) => s.price(market),
        }
    }

    /// Option contract, if this is one.
    pub fn as_option(&self) -> Option<&OptionInstrument> {
        match self {
            Instrument::Option(o) => Some(o),
            Instrument::Stock(_) => None,
        }
    }

    /// Stock holding, if this is one.
    pub fn as_stock(&self) -> Option<&Stock> {
        match self {
            Instrument::Stock(s) => Some(s),
            Instrument::Option(_) => None,
        }
    }
}

impl From<OptionInstrument> for Instrument {
    fn from(option: OptionInstrument) -> Self {
        Instrument::Option(option)
    }
}

impl From<Stock> for Instrument {
    fn from(stock: Stock) -> Self {
        Instrument::Stock(stock)
    }
}

impl Priceable for Instrument {
    fn price(&self, market: &MarketDataStore) -> Result<f64, PricingError> {
        Instrument::price(self, market)
    }

    fn asset_name(&self) -> Option<&str> {
        Some(Instrument::asset_name(self))
    }
}
