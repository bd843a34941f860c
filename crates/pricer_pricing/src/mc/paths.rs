//! Path generation for Monte Carlo simulation.
//!
//! Geometric Brownian Motion is stepped exactly in log space:
//!
//! ```text
//! S(t+dt) = S(t) × exp((r - q - 0.5σ²)dt + σ√dt × Z)
//! ```
//!
//! # Memory Layout
//!
//! Paths are stored in row-major order: `values[path_idx * (n_steps + 1) + step_idx]`
//! where `step_idx = 0` contains the initial spot price.

use pricer_models::models::ProcessDescription;

use super::config::McParams;
use crate::rng::NormalGenerator;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Model
///
/// ```text
/// dS = (r - q) S dt + σ S dW
/// ```
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.05, 0.0, 0.2, 1.0);
/// assert!(params.is_valid());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r), annualised.
    pub rate: f64,
    /// Continuous dividend yield (q), annualised.
    pub dividend_yield: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Time to maturity (T) in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, dividend_yield: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            dividend_yield,
            volatility,
            maturity,
        }
    }

    /// Parameters of `process` simulated out to `maturity` years.
    pub fn from_process(process: &ProcessDescription, maturity: f64) -> Self {
        Self::new(
            process.spot(),
            process.risk_free_rate(),
            process.dividend_yield(),
            process.volatility(),
            maturity,
        )
    }

    /// `true` if all parameters are finite with positive spot and maturity
    /// and non-negative volatility.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.spot > 0.0
            && self.spot.is_finite()
            && self.rate.is_finite()
            && self.dividend_yield.is_finite()
            && self.volatility >= 0.0
            && self.volatility.is_finite()
            && self.maturity > 0.0
            && self.maturity.is_finite()
    }

    /// Per-step log drift and diffusion scale for `n_steps` equal steps.
    #[inline]
    pub fn step_constants(&self, n_steps: usize) -> (f64, f64) {
        let dt = self.maturity / n_steps as f64;
        let drift_dt =
            (self.rate - self.dividend_yield - 0.5 * self.volatility * self.volatility) * dt;
        let vol_sqrt_dt = self.volatility * dt.sqrt();
        (drift_dt, vol_sqrt_dt)
    }
}

impl Default for GbmParams {
    fn default() -> Self {
        Self::new(100.0, 0.05, 0.0, 0.2, 1.0)
    }
}

/// Full set of simulated GBM paths.
#[derive(Clone, Debug)]
pub struct SimulatedPaths {
    n_paths: usize,
    n_steps: usize,
    dt: f64,
    values: Vec<f64>,
}

impl SimulatedPaths {
    /// Simulates `mc.num_paths` paths of `mc.steps` steps each.
    pub fn generate(params: GbmParams, mc: &McParams) -> Self {
        let n_paths = mc.num_paths;
        let n_steps = mc.steps;
        let stride = n_steps + 1;
        let (drift_dt, vol_sqrt_dt) = params.step_constants(n_steps);
        let mut generator = NormalGenerator::new(mc.rng_kind, n_steps, mc.seed);
        let mut increments = vec![0.0; n_steps];
        let mut values = vec![0.0; n_paths * stride];

        for path in values.chunks_exact_mut(stride) {
            generator.fill_path(&mut increments);
            let mut s = params.spot;
            path[0] = s;
            for (slot, &z) in path[1..].iter_mut().zip(&increments) {
                s *= (drift_dt + vol_sqrt_dt * z).exp();
                *slot = s;
            }
        }

        Self {
            n_paths,
            n_steps,
            dt: params.maturity / n_steps as f64,
            values,
        }
    }

    /// Number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Step length in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Spot levels of one path, including the initial spot.
    #[inline]
    pub fn path(&self, path_idx: usize) -> &[f64] {
        let stride = self.n_steps + 1;
        &self.values[path_idx * stride..(path_idx + 1) * stride]
    }

    /// Spot level of `path_idx` at `step_idx`.
    #[inline]
    pub fn value(&self, path_idx: usize, step_idx: usize) -> f64 {
        self.values[path_idx * (self.n_steps + 1) + step_idx]
    }

    /// Terminal spot levels.
    pub fn terminal(&self) -> impl Iterator<Item = f64> + '_ {
        let last = self.n_steps;
        self.values.chunks_exact(self.n_steps + 1).map(move |p| p[last])
    }
}
