//! Pricing engine dispatch.
//!
//! [`resolve_engine`] maps a pricing method and an exercise style onto one
//! concrete engine. It has no side effects, so the binding is decided once
//! when an instrument is constructed.
//!
//! | Method | European | American / Bermudan |
//! |---|---|---|
//! | Analytical | Black-Scholes-Merton | unsupported |
//! | MonteCarlo | path expectation | Longstaff-Schwartz |
//! | Binomial | CRR lattice | CRR lattice |

mod engines;

pub use engines::{
    AnalyticEuropeanEngine, BinomialTreeEngine, LongstaffSchwartzEngine, McEuropeanEngine,
};

use pricer_core::types::{PricingError, PricingMethod};
use pricer_models::instruments::{ExerciseStyle, TradableOption};
use pricer_models::models::ProcessDescription;

use crate::mc::McParams;

/// Numerical collaborator that values a tradable option under a process.
///
/// Implementations must be deterministic in their inputs: the valuation
/// cache relies on equal inputs producing equal outputs.
pub trait ValuationEngine {
    /// Net present value of `option` under `process`.
    fn npv(
        &self,
        process: &ProcessDescription,
        option: &TradableOption,
    ) -> Result<f64, PricingError>;
}

impl<E: ValuationEngine + ?Sized> ValuationEngine for &E {
    fn npv(
        &self,
        process: &ProcessDescription,
        option: &TradableOption,
    ) -> Result<f64, PricingError> {
        (**self).npv(process, option)
    }
}

/// Engine bound to an instrument at construction.
#[derive(Clone, Copy, Debug)]
pub enum PricingEngine {
    /// Closed form for European payoffs.
    AnalyticEuropean(AnalyticEuropeanEngine),
    /// Monte Carlo for European payoffs.
    McEuropean(McEuropeanEngine),
    /// Least-squares Monte Carlo for early exercise.
    LongstaffSchwartz(LongstaffSchwartzEngine),
    /// Binomial lattice.
    BinomialTree(BinomialTreeEngine),
}

impl PricingEngine {
    /// Short engine name for log events.
    pub fn name(&self) -> &'static str {
        match self {
            PricingEngine::AnalyticEuropean(_) => "analytic-european",
            PricingEngine::McEuropean(_) => "mc-european",
            PricingEngine::LongstaffSchwartz(_) => "longstaff-schwartz",
            PricingEngine::BinomialTree(_) => "binomial-tree",
        }
    }

    /// Pricing method the engine implements.
    pub fn method(&self) -> PricingMethod {
        match self {
            PricingEngine::AnalyticEuropean(_) => PricingMethod::Analytical,
            PricingEngine::McEuropean(_) | PricingEngine::LongstaffSchwartz(_) => {
                PricingMethod::MonteCarlo
            }
            PricingEngine::BinomialTree(_) => PricingMethod::Binomial,
        }
    }
}

impl ValuationEngine for PricingEngine {
    fn npv(
        &self,
        process: &ProcessDescription,
        option: &TradableOption,
    ) -> Result<f64, PricingError> {
        match self {
            PricingEngine::AnalyticEuropean(e) => e.npv(process, option),
            PricingEngine::McEuropean(e) => e.npv(process, option),
            PricingEngine::LongstaffSchwartz(e) => e.npv(process, option),
            PricingEngine::BinomialTree(e) => e.npv(process, option),
        }
    }
}

/// Selects the engine for `method` under `exercise`.
///
/// # Errors
///
/// - `UnsupportedConfiguration` when the exercise style does not admit the
///   method (analytical pricing of early exercise); there is no fallback.
/// - `Validation` for out-of-range Monte Carlo or lattice parameters.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{PricingError, PricingMethod};
/// use pricer_models::instruments::ExerciseStyle;
/// use pricer_pricing::engine::resolve_engine;
/// use pricer_pricing::mc::McParams;
///
/// let engine = resolve_engine(
///     PricingMethod::MonteCarlo,
///     &ExerciseStyle::European,
///     McParams::default(),
///     200,
/// ).unwrap();
/// assert_eq!(engine.name(), "mc-european");
///
/// let american = ExerciseStyle::American {
///     earliest_exercise: pricer_core::types::Date::from_ymd(2025, 1, 1).unwrap(),
/// };
/// let err = resolve_engine(PricingMethod::Analytical, &american, McParams::default(), 200);
/// assert!(matches!(err, Err(PricingError::UnsupportedConfiguration { .. })));
/// ```
pub fn resolve_engine(
    method: PricingMethod,
    exercise: &ExerciseStyle,
    mc_params: McParams,
    lattice_steps: usize,
) -> Result<PricingEngine, PricingError> {
    if !exercise.supports(method) {
        return Err(PricingError::UnsupportedConfiguration {
            exercise: exercise.name().to_string(),
            method: method.name().to_string(),
        });
    }
    let engine = match (method, exercise.is_early_exercise()) {
        (PricingMethod::Analytical, _) => PricingEngine::AnalyticEuropean(AnalyticEuropeanEngine),
        (PricingMethod::MonteCarlo, false) => {
            PricingEngine::McEuropean(McEuropeanEngine::new(mc_params)?)
        }
        (PricingMethod::MonteCarlo, true) => {
            PricingEngine::LongstaffSchwartz(LongstaffSchwartzEngine::new(mc_params)?)
        }
        (PricingMethod::Binomial, _) => {
            PricingEngine::BinomialTree(BinomialTreeEngine::new(lattice_steps)?)
        }
    };
    Ok(engine)
}
