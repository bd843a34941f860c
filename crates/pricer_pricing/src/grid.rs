//! Mapping of exercise schedules onto uniform time grids.
//!
//! Both the Longstaff-Schwartz simulation and the binomial lattice step
//! from the valuation date to maturity in `n` equal steps. An exercise
//! grid flags the steps at which the holder may exercise. Maturity is
//! always exercisable.

use pricer_models::instruments::ExerciseStyle;
use pricer_models::models::ProcessDescription;

const GRID_TOLERANCE: f64 = 1e-12;

/// Exercise flags for steps `0..=n_steps` of a grid spanning `maturity`
/// years from the process valuation date.
///
/// - European: maturity only.
/// - American: every step on or after the earliest exercise date.
/// - Bermudan: the step nearest to each future exercise date; dates before
///   the valuation date are dropped.
///
/// Engines call this with step counts already bounded by
/// [`MAX_STEPS`](crate::mc::MAX_STEPS) or
/// [`MAX_LATTICE_STEPS`](crate::lattice::MAX_LATTICE_STEPS).
pub fn exercise_grid(
    process: &ProcessDescription,
    exercise: &ExerciseStyle,
    maturity: f64,
    n_steps: usize,
) -> Vec<bool> {
    let mut flags = vec![false; n_steps + 1];
    flags[n_steps] = true;
    if n_steps == 0 || maturity <= 0.0 {
        return flags;
    }
    let dt = maturity / n_steps as f64;

    match exercise {
        ExerciseStyle::European => {}
        ExerciseStyle::American { earliest_exercise } => {
            let t_earliest = process.time_to_expiry(*earliest_exercise);
            for (i, flag) in flags.iter_mut().enumerate() {
                if i as f64 * dt >= t_earliest - GRID_TOLERANCE {
                    *flag = true;
                }
            }
        }
        ExerciseStyle::Bermudan { exercise_dates } => {
            for date in exercise_dates {
                let t = process.time_to_expiry(*date);
                if t < -GRID_TOLERANCE {
                    continue;
                }
                let idx = ((t / dt).round() as usize).min(n_steps);
                flags[idx] = true;
            }
        }
    }
    flags
}
