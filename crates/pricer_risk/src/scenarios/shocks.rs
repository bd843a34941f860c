//! Log-normal multiplicative spot shocks.
//!
//! Each shock is `exp(σ·Z)` with `Z ~ N(0, 1)`, i.e. a draw from
//! `LogNormal(0, σ)`. Shocks are strictly positive and a zero volatility
//! yields a vector of ones.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::LogNormal;
use thiserror::Error;

use pricer_core::types::PricingError;

/// Number of shocks drawn when the caller does not choose one.
pub const DEFAULT_NUM_SHOCKS: usize = 780;

/// Shock generation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShockError {
    /// Volatility is negative or not finite.
    #[error("Invalid shock volatility: {0} (must be finite and non-negative)")]
    InvalidVolatility(f64),
}

impl From<ShockError> for PricingError {
    fn from(err: ShockError) -> Self {
        PricingError::Validation(err.to_string())
    }
}

/// Seeded generator of multiplicative shocks.
///
/// # Examples
///
/// ```
/// use pricer_risk::scenarios::ShockGenerator;
///
/// let mut generator = ShockGenerator::new(0.2, 7).unwrap();
/// let shocks = generator.generate(100);
/// assert_eq!(shocks.len(), 100);
/// assert!(shocks.iter().all(|&s| s > 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct ShockGenerator {
    volatility: f64,
    distribution: LogNormal<f64>,
    rng: StdRng,
}

impl ShockGenerator {
    /// Creates a generator with shock volatility `volatility`.
    pub fn new(volatility: f64, seed: u64) -> Result<Self, ShockError> {
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(ShockError::InvalidVolatility(volatility));
        }
        let distribution =
            LogNormal::new(0.0, volatility).map_err(|_| ShockError::InvalidVolatility(volatility))?;
        Ok(Self {
            volatility,
            distribution,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Shock volatility.
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Draws the next `num_shocks` shocks.
    pub fn generate(&mut self, num_shocks: usize) -> Vec<f64> {
        if self.volatility == 0.0 {
            return vec![1.0; num_shocks];
        }
        (&mut self.rng)
            .sample_iter(self.distribution)
            .take(num_shocks)
            .collect()
    }
}

/// Draws `num_shocks` shocks from a freshly seeded generator.
pub fn generate_shocks(
    volatility: f64,
    num_shocks: usize,
    seed: u64,
) -> Result<Vec<f64>, ShockError> {
    Ok(ShockGenerator::new(volatility, seed)?.generate(num_shocks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shocks_are_positive() {
        let shocks = generate_shocks(0.5, DEFAULT_NUM_SHOCKS, 42).unwrap();
        assert_eq!(shocks.len(), DEFAULT_NUM_SHOCKS);
        assert!(shocks.iter().all(|&s| s > 0.0 && s.is_finite()));
    }

    #[test]
    fn test_zero_volatility_gives_ones() {
        assert_eq!(generate_shocks(0.0, 5, 1).unwrap(), vec![1.0; 5]);
    }

    #[test]
    fn test_invalid_volatility() {
        assert_eq!(
            generate_shocks(-0.1, 5, 1).unwrap_err(),
            ShockError::InvalidVolatility(-0.1)
        );
        assert!(ShockGenerator::new(f64::NAN, 1).is_err());
        assert!(PricingError::from(ShockError::InvalidVolatility(-1.0)).is_validation());
    }

    #[test]
    fn test_same_seed_same_shocks() {
        let a = generate_shocks(0.2, 50, 9).unwrap();
        let b = generate_shocks(0.2, 50, 9).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, generate_shocks(0.2, 50, 10).unwrap());
    }

    #[test]
    fn test_log_shocks_have_expected_moments() {
        let shocks = generate_shocks(0.2, 50_000, 3).unwrap();
        let logs: Vec<f64> = shocks.iter().map(|s| s.ln()).collect();
        let n = logs.len() as f64;
        let mean = logs.iter().sum::<f64>() / n;
        let var = logs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        assert!(mean.abs() < 0.01, "mean {mean}");
        assert!((var.sqrt() - 0.2).abs() < 0.01, "std {}", var.sqrt());
    }
}
