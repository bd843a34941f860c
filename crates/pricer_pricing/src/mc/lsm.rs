//! Longstaff-Schwartz least-squares Monte Carlo for early exercise.
//!
//! At each exercisable step the discounted realised cashflows of the
//! in-the-money paths are regressed on the basis `[1, x, x²]` with
//! `x = S / K`. A path exercises when the immediate payoff beats the fitted
//! continuation value. Steps with fewer than three in-the-money paths, or a
//! singular regression, are treated as non-exercisable.

use pricer_models::instruments::StrikedPayoff;

use super::config::McParams;
use super::error::ConfigError;
use super::paths::{GbmParams, SimulatedPaths};
use super::pricer::McEstimate;

const BASIS_SIZE: usize = 3;
const PIVOT_TOLERANCE: f64 = 1e-14;

/// Longstaff-Schwartz pricer.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{OptionRight, PayoffKind, StrikedPayoff};
/// use pricer_pricing::mc::{GbmParams, LongstaffSchwartz, McParams};
///
/// let params = McParams::builder().steps(50).num_paths(5_000).build().unwrap();
/// let lsm = LongstaffSchwartz::new(params).unwrap();
/// let put = StrikedPayoff::new(OptionRight::Put, PayoffKind::Vanilla, 100.0);
/// let exercisable = vec![true; 51];
/// let estimate = lsm.price(GbmParams::default(), &put, &exercisable);
/// assert!(estimate.price > 5.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LongstaffSchwartz {
    params: McParams,
}

impl LongstaffSchwartz {
    /// Creates a pricer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parameters are invalid or the stored path
    /// grid would be too large.
    pub fn new(params: McParams) -> Result<Self, ConfigError> {
        params.validate_stored_paths()?;
        Ok(Self { params })
    }

    /// Simulation parameters.
    #[inline]
    pub fn params(&self) -> &McParams {
        &self.params
    }

    /// Prices `payoff` exercisable at the flagged steps.
    ///
    /// `exercisable` has one flag per grid point `0..=steps`; a short slice
    /// leaves the missing steps non-exercisable. Maturity always pays.
    pub fn price(
        &self,
        gbm: GbmParams,
        payoff: &StrikedPayoff,
        exercisable: &[bool],
    ) -> McEstimate {
        let paths = SimulatedPaths::generate(gbm, &self.params);
        let n_paths = paths.n_paths();
        let n_steps = paths.n_steps();
        let step_discount = (-gbm.rate * paths.dt()).exp();
        let strike = payoff.strike();
        let can_exercise = |step: usize| exercisable.get(step).copied().unwrap_or(false);

        // Cashflow of each path, discounted to the current step.
        let mut values: Vec<f64> = paths.terminal().map(|s| payoff.value(s)).collect();
        let mut itm: Vec<usize> = Vec::with_capacity(n_paths);

        for step in (1..n_steps).rev() {
            for v in values.iter_mut() {
                *v *= step_discount;
            }
            if !can_exercise(step) {
                continue;
            }

            itm.clear();
            itm.extend((0..n_paths).filter(|&i| payoff.value(paths.value(i, step)) > 0.0));
            if itm.len() < BASIS_SIZE {
                continue;
            }

            let mut gram = [[0.0; BASIS_SIZE]; BASIS_SIZE];
            let mut rhs = [0.0; BASIS_SIZE];
            for &i in &itm {
                let phi = basis(paths.value(i, step) / strike);
                for r in 0..BASIS_SIZE {
                    rhs[r] += phi[r] * values[i];
                    for c in 0..BASIS_SIZE {
                        gram[r][c] += phi[r] * phi[c];
                    }
                }
            }
            let Some(beta) = solve_linear_system(gram, rhs) else {
                continue;
            };

            for &i in &itm {
                let s = paths.value(i, step);
                let phi = basis(s / strike);
                let continuation: f64 = phi.iter().zip(&beta).map(|(p, b)| p * b).sum();
                let exercise_value = payoff.value(s);
                if exercise_value > continuation {
                    values[i] = exercise_value;
                }
            }
        }

        for v in values.iter_mut() {
            *v *= step_discount;
        }
        let mut estimate = McEstimate::from_samples(&values);

        if can_exercise(0) {
            let immediate = payoff.value(gbm.spot);
            if immediate > estimate.price {
                estimate = McEstimate {
                    price: immediate,
                    std_error: 0.0,
                };
            }
        }
        estimate
    }
}

#[inline]
fn basis(x: f64) -> [f64; BASIS_SIZE] {
    [1.0, x, x * x]
}

/// Gaussian elimination with partial pivoting. `None` when singular.
fn solve_linear_system(
    mut a: [[f64; BASIS_SIZE]; BASIS_SIZE],
    mut b: [f64; BASIS_SIZE],
) -> Option<[f64; BASIS_SIZE]> {
    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }

    for col in 0..BASIS_SIZE {
        let pivot = (col..BASIS_SIZE).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot][col].abs() <= PIVOT_TOLERANCE * scale {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..BASIS_SIZE {
            let factor = a[row][col] / a[col][col];
            for k in col..BASIS_SIZE {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = [0.0; BASIS_SIZE];
    for row in (0..BASIS_SIZE).rev() {
        let tail: f64 = ((row + 1)..BASIS_SIZE).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}
