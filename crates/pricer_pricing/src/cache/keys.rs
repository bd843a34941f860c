//! Cache keys built from exact valuation inputs.

use pricer_core::types::{Date, PricingMethod};

/// Bit pattern of `x` with `-0.0` folded onto `0.0`.
#[inline]
pub fn canonical_bits(x: f64) -> u64 {
    if x == 0.0 {
        0.0_f64.to_bits()
    } else {
        x.to_bits()
    }
}

/// Inputs of one option valuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OptionCacheKey {
    spot: u64,
    volatility: u64,
    risk_free_rate: u64,
    dividend_yield: u64,
    method: PricingMethod,
    valuation_date: Date,
}

impl OptionCacheKey {
    /// Key of a valuation with the given inputs.
    pub fn new(
        spot: f64,
        volatility: f64,
        risk_free_rate: f64,
        dividend_yield: f64,
        method: PricingMethod,
        valuation_date: Date,
    ) -> Self {
        Self {
            spot: canonical_bits(spot),
            volatility: canonical_bits(volatility),
            risk_free_rate: canonical_bits(risk_free_rate),
            dividend_yield: canonical_bits(dividend_yield),
            method,
            valuation_date,
        }
    }

    /// Spot the key was built from.
    pub fn spot(&self) -> f64 {
        f64::from_bits(self.spot)
    }

    /// Pricing method of the key.
    pub fn method(&self) -> PricingMethod {
        self.method
    }

    /// Valuation date of the key.
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }
}

/// Inputs of one stock holding valuation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StockCacheKey {
    spot: u64,
    num_shares: i64,
}

impl StockCacheKey {
    /// Key of a valuation with the given inputs.
    pub fn new(spot: f64, num_shares: i64) -> Self {
        Self {
            spot: canonical_bits(spot),
            num_shares,
        }
    }

    /// Number of shares in the key.
    pub fn num_shares(&self) -> i64 {
        self.num_shares
    }
}
