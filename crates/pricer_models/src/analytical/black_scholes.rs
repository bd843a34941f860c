//! Black-Scholes-Merton pricing for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//! **Cash-or-nothing**: c·e^(-rT)·N(ωd₂)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//! - ω = +1 for calls, -1 for puts
//!
//! When σ√T vanishes the price collapses to the discounted payoff on the
//! forward, which is also the limit of the formulas above.

use super::distributions::norm_cdf;
use super::error::AnalyticalError;
use crate::instruments::{ExerciseStyle, OptionRight, PayoffKind, StrikedPayoff, TradableOption};
use crate::models::ProcessDescription;

/// Below this total standard deviation the deterministic limit is used.
const MIN_STD_DEV: f64 = 1e-12;

/// Black-Scholes-Merton model with continuous dividend yield.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// assert!((call - 10.450583572185565).abs() < 1e-10);
///
/// // Put-call parity: C - P = S - K·e^(-rT)
/// let put = bs.price_put(100.0, 1.0);
/// assert!((call - put - (100.0 - 100.0 * (-0.05_f64).exp())).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
}

impl BlackScholes {
    /// Creates a model. Spot must be positive and volatility non-negative.
    pub fn new(
        spot: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
    ) -> Result<Self, AnalyticalError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }
        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Model parameterised by a process description.
    pub fn from_process(process: &ProcessDescription) -> Result<Self, AnalyticalError> {
        Self::new(
            process.spot(),
            process.risk_free_rate(),
            process.dividend_yield(),
            process.volatility(),
        )
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

    #[inline]
    fn std_dev(&self, expiry: f64) -> f64 {
        self.volatility * expiry.max(0.0).sqrt()
    }

    /// d₁ for strike and expiry. Requires σ√T > 0.
    #[inline]
    pub fn d1(&self, strike: f64, expiry: f64) -> f64 {
        let std_dev = self.std_dev(expiry);
        let drift = (self.rate - self.dividend_yield) * expiry + 0.5 * std_dev * std_dev;
        ((self.spot / strike).ln() + drift) / std_dev
    }

    /// d₂ = d₁ - σ√T.
    #[inline]
    pub fn d2(&self, strike: f64, expiry: f64) -> f64 {
        self.d1(strike, expiry) - self.std_dev(expiry)
    }

    #[inline]
    fn forward(&self, expiry: f64) -> f64 {
        self.spot * ((self.rate - self.dividend_yield) * expiry).exp()
    }

    /// Vanilla price for either right.
    pub fn price_vanilla(&self, right: OptionRight, strike: f64, expiry: f64) -> f64 {
        if expiry <= 0.0 {
            return PayoffKind::Vanilla.evaluate(right, strike, self.spot);
        }
        let df = (-self.rate * expiry).exp();
        if self.std_dev(expiry) < MIN_STD_DEV {
            return df * PayoffKind::Vanilla.evaluate(right, strike, self.forward(expiry));
        }
        let w = right.sign();
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let dividend_df = (-self.dividend_yield * expiry).exp();
        w * (self.spot * dividend_df * norm_cdf(w * d1) - strike * df * norm_cdf(w * d2))
    }

    /// European call.
    #[inline]
    pub fn price_call(&self, strike: f64, expiry: f64) -> f64 {
        self.price_vanilla(OptionRight::Call, strike, expiry)
    }

    /// European put.
    #[inline]
    pub fn price_put(&self, strike: f64, expiry: f64) -> f64 {
        self.price_vanilla(OptionRight::Put, strike, expiry)
    }

    /// Cash-or-nothing price: pays `cash` at expiry when in the money.
    pub fn price_cash_or_nothing(
        &self,
        right: OptionRight,
        strike: f64,
        cash: f64,
        expiry: f64,
    ) -> f64 {
        let kind = PayoffKind::CashOrNothing { cash };
        if expiry <= 0.0 {
            return kind.evaluate(right, strike, self.spot);
        }
        let df = (-self.rate * expiry).exp();
        if self.std_dev(expiry) < MIN_STD_DEV {
            return df * kind.evaluate(right, strike, self.forward(expiry));
        }
        cash * df * norm_cdf(right.sign() * self.d2(strike, expiry))
    }

    /// Price of a striked payoff.
    pub fn price(&self, payoff: &StrikedPayoff, expiry: f64) -> f64 {
        match payoff.kind() {
            PayoffKind::Vanilla => self.price_vanilla(payoff.right(), payoff.strike(), expiry),
            PayoffKind::CashOrNothing { cash } => {
                self.price_cash_or_nothing(payoff.right(), payoff.strike(), cash, expiry)
            }
        }
    }

    /// Price of a European tradable option.
    ///
    /// # Errors
    /// `UnsupportedExerciseStyle` for early-exercise schedules,
    /// `NumericalInstability` if the result is not finite.
    pub fn price_option(
        &self,
        option: &TradableOption,
        expiry: f64,
    ) -> Result<f64, AnalyticalError> {
        if !matches!(option.exercise(), ExerciseStyle::European) {
            return Err(AnalyticalError::UnsupportedExerciseStyle {
                style: option.exercise().name().to_string(),
            });
        }
        let value = self.price(option.payoff(), expiry);
        if !value.is_finite() {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("non-finite price {value}"),
            });
        }
        Ok(value)
    }

    /// Spot delta of a vanilla option: ω·e^(-qT)·N(ωd₁).
    pub fn delta(&self, right: OptionRight, strike: f64, expiry: f64) -> f64 {
        let w = right.sign();
        if expiry <= 0.0 || self.std_dev(expiry) < MIN_STD_DEV {
            let itm = if expiry <= 0.0 {
                w * (self.spot - strike) > 0.0
            } else {
                w * (self.forward(expiry) - strike) > 0.0
            };
            let dividend_df = (-self.dividend_yield * expiry.max(0.0)).exp();
            return if itm { w * dividend_df } else { 0.0 };
        }
        let dividend_df = (-self.dividend_yield * expiry).exp();
        w * dividend_df * norm_cdf(w * self.d1(strike, expiry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::Date;
    use proptest::prelude::*;

    #[test]
    fn test_reference_prices() {
        let bs = BlackScholes::new(100.0, 0.02, 0.0, 0.1).unwrap();
        assert_relative_eq!(bs.price_call(100.0, 1.0), 5.016_980_606_262_415, epsilon = 1e-9);
        assert_relative_eq!(bs.price_put(100.0, 1.0), 3.036_847_936_937_938_6, epsilon = 1e-9);
        assert_relative_eq!(bs.price_call(120.0, 1.0), 0.238_371_511_532_702_3, epsilon = 1e-9);
        assert_relative_eq!(
            bs.price_cash_or_nothing(OptionRight::Call, 100.0, 1.0, 1.0),
            0.548_536_519_620_299_6,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_dividend_yield_lowers_call() {
        let bs = BlackScholes::new(100.0, 0.05, 0.03, 0.2).unwrap();
        assert_relative_eq!(bs.price_call(100.0, 1.0), 8.652_528_553_942_709, epsilon = 1e-9);
    }

    #[test]
    fn test_binary_call_plus_put_is_discounted_cash() {
        let bs = BlackScholes::new(100.0, 0.03, 0.01, 0.25).unwrap();
        let call = bs.price_cash_or_nothing(OptionRight::Call, 105.0, 2.0, 0.75);
        let put = bs.price_cash_or_nothing(OptionRight::Put, 105.0, 2.0, 0.75);
        assert_relative_eq!(call + put, 2.0 * (-0.03_f64 * 0.75).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_expired_and_zero_vol_limits() {
        let bs = BlackScholes::new(110.0, 0.05, 0.0, 0.2).unwrap();
        assert_eq!(bs.price_call(100.0, 0.0), 10.0);
        assert_eq!(bs.price_put(100.0, -0.1), 0.0);

        let flat = BlackScholes::new(100.0, 0.05, 0.0, 0.0).unwrap();
        let expected = 100.0 - 100.0 * (-0.05_f64).exp();
        assert_relative_eq!(flat.price_call(100.0, 1.0), expected, epsilon = 1e-12);
        assert_eq!(flat.price_put(100.0, 1.0), 0.0);
        assert_relative_eq!(
            flat.price_cash_or_nothing(OptionRight::Call, 100.0, 1.0, 1.0),
            (-0.05_f64).exp()
        );
    }

    #[test]
    fn test_rejects_non_positive_spot() {
        assert_eq!(
            BlackScholes::new(0.0, 0.05, 0.0, 0.2).unwrap_err(),
            AnalyticalError::InvalidSpot { spot: 0.0 }
        );
        assert!(BlackScholes::new(f64::NAN, 0.05, 0.0, 0.2).is_err());
        assert!(BlackScholes::new(100.0, 0.05, 0.0, -0.2).is_err());
    }

    #[test]
    fn test_price_option_rejects_american() {
        use crate::instruments::OptionTerms;
        let terms = OptionTerms::new(
            "ACME",
            100.0,
            Date::from_ymd(2026, 1, 1).unwrap(),
            OptionRight::Put,
            PayoffKind::Vanilla,
            ExerciseStyle::American {
                earliest_exercise: Date::from_ymd(2025, 1, 1).unwrap(),
            },
        )
        .unwrap();
        let bs = BlackScholes::new(100.0, 0.02, 0.0, 0.1).unwrap();
        assert_eq!(
            bs.price_option(&TradableOption::from(&terms), 1.0)
                .unwrap_err(),
            AnalyticalError::UnsupportedExerciseStyle {
                style: "American".to_string()
            }
        );
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let bs = BlackScholes::new(100.0, 0.05, 0.02, 0.2).unwrap();
        let h = 1e-4;
        for right in [OptionRight::Call, OptionRight::Put] {
            let up = BlackScholes::new(100.0 + h, 0.05, 0.02, 0.2).unwrap();
            let down = BlackScholes::new(100.0 - h, 0.05, 0.02, 0.2).unwrap();
            let fd = (up.price_vanilla(right, 100.0, 1.0) - down.price_vanilla(right, 100.0, 1.0))
                / (2.0 * h);
            assert_relative_eq!(bs.delta(right, 100.0, 1.0), fd, epsilon = 1e-6);
        }
    }

    proptest! {
        #[test]
        fn test_put_call_parity(
            spot in 50.0f64..150.0,
            strike in 50.0f64..150.0,
            rate in -0.01f64..0.08,
            div in 0.0f64..0.05,
            vol in 0.05f64..0.6,
            t in 0.05f64..3.0,
        ) {
            let bs = BlackScholes::new(spot, rate, div, vol).unwrap();
            let parity = spot * (-div * t).exp() - strike * (-rate * t).exp();
            let diff = bs.price_call(strike, t) - bs.price_put(strike, t);
            prop_assert!((diff - parity).abs() < 1e-9);
        }
    }
}
