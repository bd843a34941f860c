//! Concrete valuation engines.

use pricer_core::types::{PricingError, PricingMethod};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{ExerciseStyle, TradableOption};
use pricer_models::models::ProcessDescription;

use super::ValuationEngine;
use crate::grid::exercise_grid;
use crate::lattice::BinomialTree;
use crate::mc::{ConfigError, GbmParams, LongstaffSchwartz, McEstimate, McParams, MonteCarloPricer};

/// Remaining life of the contract in years, or `None` once it has reached
/// maturity.
fn remaining_life(process: &ProcessDescription, option: &TradableOption) -> Option<f64> {
    let t = process.time_to_expiry(option.maturity());
    (t > 0.0).then_some(t)
}

fn intrinsic(process: &ProcessDescription, option: &TradableOption) -> f64 {
    option.payoff().value(process.spot())
}

fn simulation_params(
    process: &ProcessDescription,
    maturity: f64,
) -> Result<GbmParams, PricingError> {
    let gbm = GbmParams::from_process(process, maturity);
    if !gbm.is_valid() {
        return Err(PricingError::InvalidInput(format!(
            "cannot simulate from spot {} with volatility {}",
            gbm.spot, gbm.volatility
        )));
    }
    Ok(gbm)
}

fn finite(value: f64, engine: &str) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::NumericalInstability(format!(
            "{engine} produced non-finite value {value}"
        )))
    }
}

/// Black-Scholes-Merton closed form for European vanilla and
/// cash-or-nothing payoffs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalyticEuropeanEngine;

impl ValuationEngine for AnalyticEuropeanEngine {
    fn npv(
        &self,
        process: &ProcessDescription,
        option: &TradableOption,
    ) -> Result<f64, PricingError> {
        let Some(t) = remaining_life(process, option) else {
            return Ok(intrinsic(process, option));
        };
        let model = BlackScholes::from_process(process)?;
        Ok(model.price_option(option, t)?)
    }
}

/// Monte Carlo expectation of a European payoff.
#[derive(Clone, Copy, Debug)]
pub struct McEuropeanEngine {
    pricer: MonteCarloPricer,
}

impl McEuropeanEngine {
    /// Creates the engine.
    ///
    /// # Errors
    ///
    /// `ConfigError` for out-of-range simulation parameters.
    pub fn new(params: McParams) -> Result<Self, ConfigError> {
        Ok(Self {
            pricer: MonteCarloPricer::new(params)?,
        })
    }

    /// Simulation parameters.
    pub fn params(&self) -> &McParams {
        self.pricer.params()
    }

    /// Price with its standard error. Expired contracts report zero error.
    pub fn estimate(
        &self,
        process: &ProcessDescription,
        option: &TradableOption,
    ) -> Result<McEstimate, PricingError> {
        if option.exercise().is_early_exercise() {
            return Err(early_exercise_unsupported(option.exercise(), PricingMethod::MonteCarlo));
        }
        let Some(t) = remaining_life(process, option) else {
            return Ok(McEstimate {
                price: intrinsic(process, option),
                std_error: 0.0,
            });
        };
        let gbm = simulation_params(process, t)?;
        Ok(self.pricer.price_european(gbm, option.payoff()))
    }
}

impl ValuationEngine for McEuropeanEngine {
    fn npv(
        &self,
        process: &ProcessDescription,
        option: &TradableOption,
    ) -> Result<f64, PricingError> {
        finite(self.estimate(process, option)?.price, "Monte Carlo")
    }
}

fn early_exercise_unsupported(exercise: &ExerciseStyle, method: PricingMethod) -> PricingError {
    PricingError::UnsupportedConfiguration {
        exercise: exercise.name().to_string(),
        method: method.name().to_string(),
    }
}

/// Least-squares Monte Carlo for American and Bermudan exercise.
#[derive(Clone, Copy, Debug)]
pub struct LongstaffSchwartzEngine {
    lsm: LongstaffSchwartz,
}

impl LongstaffSchwartzEngine {
    /// Creates the engine.
    ///
    /// # Errors
    ///
    /// `ConfigError` for out-of-range simulation parameters.
    pub fn new(params: McParams) -> Result<Self, ConfigError> {
        Ok(Self {
            lsm: LongstaffSchwartz::new(params)?,
        })
    }

    /// Simulation parameters.
    pub fn params(&self) -> &McParams {
        self.lsm.params()
    }

    /// Price with its standard error.
    pub fn estimate(
        &self,
        process: &ProcessDescription,
        option: &TradableOption,
    ) -> Result<McEstimate, PricingError> {
        let Some(t) = remaining_life(process, option) else {
            return Ok(McEstimate {
                price: intrinsic(process, option),
                std_error: 0.0,
            });
        };
        let gbm = simulation_params(process, t)?;
        let flags = exercise_grid(process, option.exercise(), t, self.params().steps);
        Ok(self.lsm.price(gbm, option.payoff(), &flags))
    }
}

impl ValuationEngine for LongstaffSchwartzEngine {
    fn npv(
        &self,
        process: &ProcessDescription,
        option: &TradableOption,
    ) -> Result<f64, PricingError> {
        finite(self.estimate(process, option)?.price, "Longstaff-Schwartz")
    }
}

/// Cox-Ross-Rubinstein lattice for every exercise style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BinomialTreeEngine {
    tree: BinomialTree,
}

impl BinomialTreeEngine {
    /// Creates the engine.
    ///
    /// # Errors
    ///
    /// `ConfigError` when `steps` is zero.
    pub fn new(steps: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            tree: BinomialTree::new(steps)?,
        })
    }

    /// Number of lattice steps.
    pub fn steps(&self) -> usize {
        self.tree.steps()
    }
}

impl ValuationEngine for BinomialTreeEngine {
    fn npv(
        &self,
        process: &ProcessDescription,
        option: &TradableOption,
    ) -> Result<f64, PricingError> {
        let Some(t) = remaining_life(process, option) else {
            return Ok(intrinsic(process, option));
        };
        let gbm = simulation_params(process, t)?;
        let flags = exercise_grid(process, option.exercise(), t, self.tree.steps());
        finite(self.tree.price(gbm, option.payoff(), &flags)?, "binomial tree")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::Date;
    use pricer_models::instruments::{OptionRight, OptionTerms, PayoffKind};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn process(spot: f64, vol: f64, rate: f64) -> ProcessDescription {
        ProcessDescription::new(spot, vol, rate, 0.0, date(2025, 1, 1)).unwrap()
    }

    fn option(right: OptionRight, exercise: ExerciseStyle) -> TradableOption {
        let terms = OptionTerms::new(
            "ACME",
            100.0,
            date(2026, 1, 1),
            right,
            PayoffKind::Vanilla,
            exercise,
        )
        .unwrap();
        TradableOption::from_terms(&terms)
    }

    #[test]
    fn test_analytic_end_to_end_value() {
        let npv = AnalyticEuropeanEngine
            .npv(
                &process(100.0, 0.1, 0.02),
                &option(OptionRight::Call, ExerciseStyle::European),
            )
            .unwrap();
        assert_relative_eq!(npv, 5.016980606262415, epsilon = 1e-10);
    }

    #[test]
    fn test_analytic_rejects_american() {
        let american = option(
            OptionRight::Put,
            ExerciseStyle::American {
                earliest_exercise: date(2025, 1, 1),
            },
        );
        let err = AnalyticEuropeanEngine
            .npv(&process(100.0, 0.2, 0.05), &american)
            .unwrap_err();
        assert!(matches!(err, PricingError::UnsupportedConfiguration { .. }));
    }

    #[test]
    fn test_expired_contract_pays_intrinsic() {
        let expired = ProcessDescription::new(110.0, 0.2, 0.05, 0.0, date(2026, 6, 1)).unwrap();
        let call = option(OptionRight::Call, ExerciseStyle::European);
        assert_eq!(AnalyticEuropeanEngine.npv(&expired, &call).unwrap(), 10.0);
        let mc = McEuropeanEngine::new(McParams::default()).unwrap();
        assert_eq!(mc.npv(&expired, &call).unwrap(), 10.0);
        assert_eq!(BinomialTreeEngine::default().npv(&expired, &call).unwrap(), 10.0);
    }

    #[test]
    fn test_mc_european_rejects_early_exercise() {
        let mc = McEuropeanEngine::new(McParams::default()).unwrap();
        let american = option(
            OptionRight::Put,
            ExerciseStyle::American {
                earliest_exercise: date(2025, 1, 1),
            },
        );
        assert!(mc.npv(&process(100.0, 0.2, 0.05), &american).is_err());
    }

    #[test]
    fn test_simulation_rejects_non_positive_spot() {
        let mc = McEuropeanEngine::new(McParams::default()).unwrap();
        let call = option(OptionRight::Call, ExerciseStyle::European);
        let err = mc.npv(&process(-5.0, 0.2, 0.05), &call).unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn test_binomial_matches_black_scholes() {
        let engine = BinomialTreeEngine::new(400).unwrap();
        let call = option(OptionRight::Call, ExerciseStyle::European);
        let npv = engine.npv(&process(100.0, 0.2, 0.05), &call).unwrap();
        assert_relative_eq!(npv, 10.450583572185565, epsilon = 0.01);
    }
}
