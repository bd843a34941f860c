//! Black-Scholes-Merton process description.
//!
//! Geometric Brownian motion under the risk-neutral measure:
//!
//! dS = (r - q)·S·dt + σ·S·dW
//!
//! with flat risk-free rate `r`, continuous dividend yield `q` and constant
//! volatility `σ`. A process description is what an instrument extracts
//! from a market data snapshot before handing off to an engine.

use pricer_core::types::{Date, DayCountConvention, PricingError};

/// Market inputs an engine needs, as of a valuation date.
///
/// # Examples
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::models::ProcessDescription;
///
/// let process = ProcessDescription::new(
///     100.0, 0.1, 0.02, 0.0, Date::from_ymd(2025, 1, 1).unwrap(),
/// ).unwrap();
///
/// let t = process.time_to_expiry(Date::from_ymd(2026, 1, 1).unwrap());
/// assert_eq!(t, 1.0);
/// assert!((process.forward(t) - 100.0 * 0.02_f64.exp()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessDescription {
    spot: f64,
    volatility: f64,
    risk_free_rate: f64,
    dividend_yield: f64,
    valuation_date: Date,
    day_count: DayCountConvention,
}

impl ProcessDescription {
    /// Creates a process description measured with ACT/365.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` when any input is non-finite or the
    /// volatility is negative.
    pub fn new(
        spot: f64,
        volatility: f64,
        risk_free_rate: f64,
        dividend_yield: f64,
        valuation_date: Date,
    ) -> Result<Self, PricingError> {
        for (name, value) in [
            ("spot", spot),
            ("volatility", volatility),
            ("risk-free rate", risk_free_rate),
            ("dividend yield", dividend_yield),
        ] {
            if !value.is_finite() {
                return Err(PricingError::InvalidInput(format!("non-finite {name}: {value}")));
            }
        }
        if volatility < 0.0 {
            return Err(PricingError::InvalidInput(format!("negative volatility: {volatility}")));
        }
        Ok(Self {
            spot,
            volatility,
            risk_free_rate,
            dividend_yield,
            valuation_date,
            day_count: DayCountConvention::ActualActual365,
        })
    }

    /// Replaces the day count used for year fractions.
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Risk-free rate.
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Valuation date.
    #[inline]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Year fraction from the valuation date to `date`. Negative once `date` has passed.
    #[inline]
    pub fn time_to_expiry(&self, date: Date) -> f64 {
        self.day_count
            .year_fraction_dates(self.valuation_date, date)
    }

    /// Risk-free discount factor e^(-rt).
    #[inline]
    pub fn discount_factor(&self, t: f64) -> f64 {
        (-self.risk_free_rate * t).exp()
    }

    /// Dividend discount factor e^(-qt).
    #[inline]
    pub fn dividend_factor(&self, t: f64) -> f64 {
        (-self.dividend_yield * t).exp()
    }

    /// Forward price S·e^((r-q)t).
    #[inline]
    pub fn forward(&self, t: f64) -> f64 {
        self.spot * ((self.risk_free_rate - self.dividend_yield) * t).exp()
    }
}
