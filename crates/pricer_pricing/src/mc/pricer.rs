//! Monte Carlo pricer for European payoffs.
//!
//! Paths are generated one at a time through a reused increment buffer, so
//! memory stays flat in the number of paths. Every call reseeds from
//! [`McParams::seed`], which makes the estimate a pure function of its
//! inputs.

use pricer_models::instruments::StrikedPayoff;

use super::config::McParams;
use super::error::ConfigError;
use super::paths::GbmParams;
use crate::rng::NormalGenerator;

/// Price estimate with its standard error.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::McEstimate;
///
/// let estimate = McEstimate { price: 10.5, std_error: 0.05 };
/// assert!((estimate.confidence_95() - 0.098).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct McEstimate {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of the mean.
    pub std_error: f64,
}

impl McEstimate {
    /// Mean and standard error of discounted samples.
    pub fn from_samples(samples: &[f64]) -> Self {
        let n = samples.len();
        if n == 0 {
            return Self::default();
        }
        let mean = samples.iter().sum::<f64>() / n as f64;
        let std_error = if n > 1 {
            let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            (var / n as f64).sqrt()
        } else {
            0.0
        };
        Self {
            price: mean,
            std_error,
        }
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

/// Monte Carlo pricing engine for European payoffs.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{OptionRight, PayoffKind, StrikedPayoff};
/// use pricer_pricing::mc::{GbmParams, McParams, MonteCarloPricer};
///
/// let pricer = MonteCarloPricer::new(McParams::default()).unwrap();
/// let payoff = StrikedPayoff::new(OptionRight::Call, PayoffKind::Vanilla, 100.0);
/// let estimate = pricer.price_european(GbmParams::default(), &payoff);
/// assert!((estimate.price - 10.45).abs() < 4.0 * estimate.std_error + 0.1);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MonteCarloPricer {
    params: McParams,
}

impl MonteCarloPricer {
    /// Creates a pricer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parameters are invalid.
    pub fn new(params: McParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Simulation parameters.
    #[inline]
    pub fn params(&self) -> &McParams {
        &self.params
    }

    /// Discounted expected payoff at `gbm.maturity`.
    pub fn price_european(&self, gbm: GbmParams, payoff: &StrikedPayoff) -> McEstimate {
        let n_steps = self.params.steps;
        let (drift_dt, vol_sqrt_dt) = gbm.step_constants(n_steps);
        let discount = (-gbm.rate * gbm.maturity).exp();
        let mut generator = NormalGenerator::new(self.params.rng_kind, n_steps, self.params.seed);
        let mut increments = vec![0.0; n_steps];

        let samples: Vec<f64> = (0..self.params.num_paths)
            .map(|_| {
                generator.fill_path(&mut increments);
                let log_return: f64 = increments
                    .iter()
                    .map(|&z| drift_dt + vol_sqrt_dt * z)
                    .sum();
                discount * payoff.value(gbm.spot * log_return.exp())
            })
            .collect();

        McEstimate::from_samples(&samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RngKind;
    use approx::assert_relative_eq;
    use pricer_models::instruments::{OptionRight, PayoffKind};

    fn call(strike: f64) -> StrikedPayoff {
        StrikedPayoff::new(OptionRight::Call, PayoffKind::Vanilla, strike)
    }

    #[test]
    fn test_rejects_invalid_params() {
        let params = McParams {
            num_paths: 0,
            ..McParams::default()
        };
        assert!(MonteCarloPricer::new(params).is_err());
    }

    #[test]
    fn test_same_seed_same_price() {
        let pricer = MonteCarloPricer::new(McParams::default()).unwrap();
        let a = pricer.price_european(GbmParams::default(), &call(100.0));
        let b = pricer.price_european(GbmParams::default(), &call(100.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_volatility_matches_discounted_forward_payoff() {
        let params = McParams::builder().steps(3).num_paths(10).build().unwrap();
        let pricer = MonteCarloPricer::new(params).unwrap();
        let gbm = GbmParams::new(100.0, 0.05, 0.0, 0.0, 1.0);
        let estimate = pricer.price_european(gbm, &call(100.0));
        let expected = (-0.05_f64).exp() * (100.0 * 0.05_f64.exp() - 100.0);
        assert_relative_eq!(estimate.price, expected, epsilon = 1e-10);
        assert_relative_eq!(estimate.std_error, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_low_discrepancy_close_to_black_scholes() {
        let params = McParams::builder()
            .steps(1)
            .num_paths(20_000)
            .rng_kind(RngKind::LowDiscrepancy)
            .build()
            .unwrap();
        let pricer = MonteCarloPricer::new(params).unwrap();
        let estimate = pricer.price_european(GbmParams::default(), &call(100.0));
        assert_relative_eq!(estimate.price, 10.450583572185565, epsilon = 0.05);
    }

    #[test]
    fn test_low_discrepancy_unbiased_at_default_steps() {
        let params = McParams::builder()
            .num_paths(20_000)
            .rng_kind(RngKind::LowDiscrepancy)
            .build()
            .unwrap();
        assert_eq!(params.steps, McParams::default().steps);
        let pricer = MonteCarloPricer::new(params).unwrap();
        let call = pricer.price_european(GbmParams::default(), &call(100.0));
        assert_relative_eq!(call.price, 10.450583572185565, epsilon = 0.02);
        let put = pricer.price_european(
            GbmParams::default(),
            &StrikedPayoff::new(OptionRight::Put, PayoffKind::Vanilla, 100.0),
        );
        assert_relative_eq!(put.price, 5.573526022256971, epsilon = 0.02);
    }

    #[test]
    fn test_estimate_from_samples() {
        let estimate = McEstimate::from_samples(&[1.0, 2.0, 3.0]);
        assert_relative_eq!(estimate.price, 2.0);
        assert_relative_eq!(estimate.std_error, (1.0_f64 / 3.0).sqrt());
        assert_eq!(McEstimate::from_samples(&[]), McEstimate::default());
    }
}
