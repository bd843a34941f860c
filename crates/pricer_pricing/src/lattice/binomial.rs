//! Cox-Ross-Rubinstein binomial lattice.
//!
//! `u = exp(σ√dt)`, `d = 1/u`, risk-neutral up probability
//! `p = (exp((r - q)dt) - d) / (u - d)`. Backward induction takes the
//! maximum of continuation and immediate payoff at flagged steps.

use pricer_core::types::PricingError;
use pricer_models::instruments::StrikedPayoff;

use crate::mc::{ConfigError, GbmParams};

/// Default number of lattice steps.
pub const DEFAULT_LATTICE_STEPS: usize = 200;

/// Maximum number of lattice steps allowed.
pub const MAX_LATTICE_STEPS: usize = 100_000;

// Below this σ√dt the lattice degenerates; priced on the forward instead.
const MIN_STEP_STD_DEV: f64 = 1e-12;

/// CRR binomial tree.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{OptionRight, PayoffKind, StrikedPayoff};
/// use pricer_pricing::lattice::BinomialTree;
/// use pricer_pricing::mc::GbmParams;
///
/// let tree = BinomialTree::new(200).unwrap();
/// let call = StrikedPayoff::new(OptionRight::Call, PayoffKind::Vanilla, 100.0);
/// let mut flags = vec![false; 201];
/// flags[200] = true;
/// let price = tree.price(GbmParams::default(), &call, &flags).unwrap();
/// assert!((price - 10.4506).abs() < 0.02);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinomialTree {
    steps: usize,
}

impl Default for BinomialTree {
    fn default() -> Self {
        Self {
            steps: DEFAULT_LATTICE_STEPS,
        }
    }
}

impl BinomialTree {
    /// Creates a tree with `steps` time steps.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `steps` is zero or above
    /// [`MAX_LATTICE_STEPS`].
    pub fn new(steps: usize) -> Result<Self, ConfigError> {
        if steps == 0 || steps > MAX_LATTICE_STEPS {
            return Err(ConfigError::InvalidParameter {
                name: "lattice_steps",
                value: format!("{steps} must be in range [1, {MAX_LATTICE_STEPS}]"),
            });
        }
        Ok(Self { steps })
    }

    /// Number of time steps.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Prices `payoff` exercisable at the flagged steps `0..=steps`.
    ///
    /// # Errors
    ///
    /// `NumericalInstability` when the up probability leaves [0, 1], which
    /// happens when the carry per step outgrows the volatility per step.
    pub fn price(
        &self,
        gbm: GbmParams,
        payoff: &StrikedPayoff,
        exercisable: &[bool],
    ) -> Result<f64, PricingError> {
        let n = self.steps;
        let dt = gbm.maturity / n as f64;
        let can_exercise = |step: usize| exercisable.get(step).copied().unwrap_or(false);

        if gbm.volatility * dt.sqrt() < MIN_STEP_STD_DEV {
            return Ok(self.price_deterministic(gbm, payoff, &can_exercise));
        }

        let u = (gbm.volatility * dt.sqrt()).exp();
        let d = 1.0 / u;
        let growth = ((gbm.rate - gbm.dividend_yield) * dt).exp();
        let p = (growth - d) / (u - d);
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(PricingError::NumericalInstability(format!(
                "risk-neutral probability {p} is outside [0, 1]"
            )));
        }
        let disc = (-gbm.rate * dt).exp();
        let disc_p = disc * p;
        let disc_1mp = disc * (1.0 - p);
        let ratio = u / d;

        // values[j] is the node with j up moves.
        let mut values = Vec::with_capacity(n + 1);
        let mut s = gbm.spot * d.powi(n as i32);
        for _ in 0..=n {
            values.push(payoff.value(s));
            s *= ratio;
        }

        for i in (0..n).rev() {
            let exercise_here = can_exercise(i);
            let mut s = gbm.spot * d.powi(i as i32);
            for j in 0..=i {
                let continuation = disc_p.mul_add(values[j + 1], disc_1mp * values[j]);
                values[j] = if exercise_here {
                    continuation.max(payoff.value(s))
                } else {
                    continuation
                };
                s *= ratio;
            }
        }

        Ok(values[0])
    }

    fn price_deterministic(
        &self,
        gbm: GbmParams,
        payoff: &StrikedPayoff,
        can_exercise: &impl Fn(usize) -> bool,
    ) -> f64 {
        let n = self.steps;
        let dt = gbm.maturity / n as f64;
        (0..=n)
            .filter(|&i| can_exercise(i) || i == n)
            .map(|i| {
                let t = i as f64 * dt;
                let forward = gbm.spot * ((gbm.rate - gbm.dividend_yield) * t).exp();
                (-gbm.rate * t).exp() * payoff.value(forward)
            })
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::{OptionRight, PayoffKind};

    fn vanilla(right: OptionRight) -> StrikedPayoff {
        StrikedPayoff::new(right, PayoffKind::Vanilla, 100.0)
    }

    fn european_flags(n: usize) -> Vec<bool> {
        let mut flags = vec![false; n + 1];
        flags[n] = true;
        flags
    }

    #[test]
    fn test_step_count_bounds() {
        assert!(BinomialTree::new(0).is_err());
        assert_eq!(BinomialTree::default().steps(), 200);
        assert!(BinomialTree::new(MAX_LATTICE_STEPS).is_ok());
        let err = BinomialTree::new(MAX_LATTICE_STEPS + 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'lattice_steps': 100001 must be in range [1, 100000]"
        );
        assert!(BinomialTree::new(usize::MAX).is_err());
    }

    #[test]
    fn test_european_put_converges() {
        let tree = BinomialTree::new(500).unwrap();
        let price = tree
            .price(GbmParams::default(), &vanilla(OptionRight::Put), &european_flags(500))
            .unwrap();
        assert_relative_eq!(price, 5.573526022256971, epsilon = 0.01);
    }

    #[test]
    fn test_american_call_without_dividend_equals_european() {
        let tree = BinomialTree::default();
        let gbm = GbmParams::default();
        let american = tree
            .price(gbm, &vanilla(OptionRight::Call), &[true; 201])
            .unwrap();
        let european = tree
            .price(gbm, &vanilla(OptionRight::Call), &european_flags(200))
            .unwrap();
        assert_relative_eq!(american, european, epsilon = 1e-10);
    }

    #[test]
    fn test_american_put_premium() {
        let tree = BinomialTree::default();
        let gbm = GbmParams::default();
        let american = tree.price(gbm, &vanilla(OptionRight::Put), &[true; 201]).unwrap();
        let european = tree
            .price(gbm, &vanilla(OptionRight::Put), &european_flags(200))
            .unwrap();
        assert!(american > european + 0.3);
        assert_relative_eq!(american, 6.09, epsilon = 0.03);
    }

    #[test]
    fn test_zero_volatility_takes_best_exercise_time() {
        let tree = BinomialTree::new(4).unwrap();
        let gbm = GbmParams::new(80.0, 0.05, 0.0, 0.0, 1.0);
        let american = tree.price(gbm, &vanilla(OptionRight::Put), &[true; 5]).unwrap();
        assert_relative_eq!(american, 20.0, epsilon = 1e-12);
        let european = tree
            .price(gbm, &vanilla(OptionRight::Put), &european_flags(4))
            .unwrap();
        let forward = 80.0 * 0.05_f64.exp();
        assert_relative_eq!(european, (-0.05_f64).exp() * (100.0 - forward), epsilon = 1e-12);
    }

    #[test]
    fn test_probability_out_of_range() {
        let tree = BinomialTree::new(1).unwrap();
        let gbm = GbmParams::new(100.0, 2.0, 0.0, 0.01, 1.0);
        let err = tree
            .price(gbm, &vanilla(OptionRight::Call), &european_flags(1))
            .unwrap_err();
        assert!(matches!(err, PricingError::NumericalInstability(_)));
    }
}
