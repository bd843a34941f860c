//! A position in one instrument.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use pricer_core::market_data::MarketDataStore;
use pricer_core::traits::Priceable;
use pricer_core::types::PricingError;
use pricer_pricing::instruments::Instrument;

use super::PortfolioError;

/// Counterparty recorded when none is given.
pub const UNKNOWN_COUNTERPARTY: &str = "Unknown";

/// Signed quantity of an instrument booked against a counterparty.
///
/// The instrument is shared through an `Arc`, so several deals (or several
/// portfolios) holding the same contract also share its valuation cache.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use pricer_pricing::instruments::{Instrument, Stock};
/// use pricer_risk::portfolio::Deal;
///
/// let stock: Arc<Instrument> = Arc::new(Stock::new("ACME", 1).unwrap().into());
/// let deal = Deal::new(stock, -0.5).unwrap().with_counterparty("BANK").unwrap();
/// assert_eq!(deal.counterparty(), "BANK");
/// assert_eq!(deal.quantity(), -0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Deal {
    instrument: Arc<Instrument>,
    quantity: f64,
    counterparty: String,
    creation_time: DateTime<Utc>,
}

impl Deal {
    /// Books `quantity` units with an unknown counterparty, stamped now.
    pub fn new(instrument: Arc<Instrument>, quantity: f64) -> Result<Self, PortfolioError> {
        if !quantity.is_finite() {
            return Err(PortfolioError::InvalidQuantity(quantity));
        }
        Ok(Self {
            instrument,
            quantity,
            counterparty: UNKNOWN_COUNTERPARTY.to_string(),
            creation_time: Utc::now(),
        })
    }

    /// Sets the counterparty.
    pub fn with_counterparty(
        mut self,
        counterparty: impl Into<String>,
    ) -> Result<Self, PortfolioError> {
        let counterparty = counterparty.into();
        if counterparty.is_empty() {
            return Err(PortfolioError::EmptyCounterparty);
        }
        self.counterparty = counterparty;
        Ok(self)
    }

    /// Overrides the creation timestamp.
    pub fn with_creation_time(mut self, creation_time: DateTime<Utc>) -> Self {
        self.creation_time = creation_time;
        self
    }

    /// Booked instrument.
    pub fn instrument(&self) -> &Arc<Instrument> {
        &self.instrument
    }

    /// Signed quantity.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Counterparty name.
    pub fn counterparty(&self) -> &str {
        &self.counterparty
    }

    /// Booking timestamp.
    pub fn creation_time(&self) -> DateTime<Utc> {
        self.creation_time
    }

    /// Instrument price times quantity.
    pub fn value(&self, market: &MarketDataStore) -> Result<f64, PricingError> {
        Ok(self.instrument.price(market)? * self.quantity)
    }
}

impl Priceable for Deal {
    fn price(&self, market: &MarketDataStore) -> Result<f64, PricingError> {
        self.value(market)
    }

    fn asset_name(&self) -> Option<&str> {
        Some(self.instrument.asset_name())
    }
}
