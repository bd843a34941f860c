//! Delta-hedging study comparing front-office and risk-model P&L.
//!
//! The hedged book is one European call against `k` shares of the
//! underlying:
//!
//! ```text
//! PV(S)  = Call(S) - k·S
//! P&L(S) = PV(S) - PV(S0)
//! ```
//!
//! For each hedge ratio `k` in `[0, 1]` the study prices the book across a
//! set of log-normally shocked spots twice: the call once with the
//! closed form (front-office P&L) and once with Monte Carlo (risk-model
//! P&L). The two P&L vectors are then compared with [`pla_stats`].
//!
//! Every ratio reprices the same shared instruments against the same
//! scenario snapshots, so after the first ratio the option legs are served
//! from their valuation caches.

use std::sync::Arc;

use pricer_core::market_data::{
    EquityAssetMarketData, InterestRateAssetMarketData, MarketDataStore, RISK_FREE_RATE_ASSET,
};
use pricer_core::types::{Date, PricingError, PricingMethod};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{ExerciseStyle, OptionRight, OptionTerms, PayoffKind};
use pricer_models::models::ProcessDescription;
use pricer_pricing::cache::CacheStats;
use pricer_pricing::instruments::{Instrument, OptionInstrument, Stock};
use pricer_pricing::mc::McParams;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::pla::{pla_stats, PlaStats, PlaZone};
use crate::portfolio::Portfolio;
use crate::scenarios::{generate_shocks, spot_scenarios};

/// Inputs of a hedging study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HedgeConfig {
    /// Underlying name.
    pub asset_name: String,
    /// Base spot `S0`.
    pub spot: f64,
    /// Underlying volatility, also the shock volatility.
    pub volatility: f64,
    /// Call strike.
    pub strike: f64,
    /// Continuously compounded risk-free rate.
    pub risk_free_rate: f64,
    /// Continuously compounded dividend yield.
    pub dividend_yield: f64,
    /// Date the book is valued as of.
    pub valuation_date: Date,
    /// Call maturity.
    pub maturity: Date,
    /// Number of hedge ratios, evenly spaced over `[0, 1]`.
    pub n_ratios: usize,
    /// Number of shocked scenarios.
    pub n_shocks: usize,
    /// Seed of the shock generator.
    pub seed: u64,
    /// Monte Carlo parameters of the risk-model pricer.
    pub mc: McParams,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        let valuation_date = Date::from_ymd(2025, 1, 1).unwrap_or_else(|_| Date::today());
        Self {
            asset_name: "Asset".to_string(),
            spot: 100.0,
            volatility: 0.2,
            strike: 100.0,
            risk_free_rate: 0.05,
            dividend_yield: 0.0,
            valuation_date,
            maturity: valuation_date.add_days(365),
            n_ratios: 20,
            n_shocks: 100,
            seed: 42,
            mc: McParams {
                steps: 1,
                num_paths: 10_000,
                ..McParams::default()
            },
        }
    }
}

impl HedgeConfig {
    /// Checks the study can run.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.n_ratios == 0 {
            return Err(PricingError::Validation(
                "n_ratios must be at least 1".to_string(),
            ));
        }
        if self.n_shocks < 2 {
            return Err(PricingError::Validation(format!(
                "n_shocks must be at least 2, got {}",
                self.n_shocks
            )));
        }
        if self.maturity <= self.valuation_date {
            return Err(PricingError::Validation(format!(
                "maturity {} must be after valuation date {}",
                self.maturity, self.valuation_date
            )));
        }
        self.mc.validate()?;
        Ok(())
    }

    /// Hedge ratios `linspace(0, 1, n_ratios)`; a single ratio is `0`.
    pub fn hedge_ratios(&self) -> Vec<f64> {
        match self.n_ratios {
            0 => Vec::new(),
            1 => vec![0.0],
            n => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
        }
    }

    /// Unshocked market snapshot.
    pub fn base_market(&self) -> Result<MarketDataStore, PricingError> {
        let equity = EquityAssetMarketData::new(&self.asset_name, self.spot, self.volatility)?
            .with_dividend_yield(self.dividend_yield)?;
        Ok(MarketDataStore::with_scenario_date(self.valuation_date)
            .with_asset(equity)
            .with_asset(InterestRateAssetMarketData::new(
                RISK_FREE_RATE_ASSET,
                self.risk_free_rate,
            )?))
    }

    fn call_terms(&self) -> Result<OptionTerms, PricingError> {
        Ok(OptionTerms::new(
            self.asset_name.as_str(),
            self.strike,
            self.maturity,
            OptionRight::Call,
            PayoffKind::Vanilla,
            ExerciseStyle::European,
        )?)
    }
}

/// PLA result of one hedge ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HedgeRatioResult {
    /// Shares sold per call.
    pub ratio: f64,
    /// Front-office versus risk-model statistics.
    pub stats: PlaStats,
    /// Traffic-light bucket of `stats`.
    pub zone: PlaZone,
}

/// Outcome of [`run_hedge_study`].
#[derive(Debug, Clone, PartialEq)]
pub struct HedgeStudy {
    /// Closed-form call value at `S0`.
    pub analytical_base: f64,
    /// Monte Carlo call value at `S0`.
    pub monte_carlo_base: f64,
    /// Black-Scholes delta of the call at `S0`.
    pub delta: f64,
    /// Shocked spots, one per scenario.
    pub shocked_spots: Vec<f64>,
    /// One row per hedge ratio, in increasing ratio order.
    pub results: Vec<HedgeRatioResult>,
    /// Cache counters of the closed-form call after the study.
    pub analytical_cache: CacheStats,
    /// Cache counters of the Monte Carlo call after the study.
    pub monte_carlo_cache: CacheStats,
}

impl HedgeStudy {
    /// Row with the smallest KS statistic.
    pub fn best_by_ks(&self) -> Option<&HedgeRatioResult> {
        self.results
            .iter()
            .min_by(|a, b| a.stats.ks.total_cmp(&b.stats.ks))
    }

    /// Row with the largest Spearman correlation, ignoring undefined ones.
    pub fn best_by_spearman(&self) -> Option<&HedgeRatioResult> {
        self.results
            .iter()
            .filter(|r| !r.stats.spearman.is_nan())
            .max_by(|a, b| a.stats.spearman.total_cmp(&b.stats.spearman))
    }
}

/// Runs the hedging study.
///
/// # Errors
///
/// `Validation` for an unusable configuration; any pricing failure of a
/// scenario aborts the study.
pub fn run_hedge_study(config: &HedgeConfig) -> Result<HedgeStudy, PricingError> {
    config.validate()?;
    info!(
        asset = %config.asset_name,
        n_ratios = config.n_ratios,
        n_shocks = config.n_shocks,
        "running hedging study"
    );

    let base = config.base_market()?;
    let shocks = generate_shocks(config.volatility, config.n_shocks, config.seed)?;
    let scenarios = spot_scenarios(&base, &config.asset_name, &shocks)?;
    let shocked_spots: Vec<f64> = shocks.iter().map(|s| config.spot * s).collect();

    let terms = config.call_terms()?;
    let analytical = Arc::new(Instrument::from(
        OptionInstrument::builder(terms.clone())
            .pricing_method(PricingMethod::Analytical)
            .build()?,
    ));
    let monte_carlo = Arc::new(Instrument::from(
        OptionInstrument::builder(terms)
            .pricing_method(PricingMethod::MonteCarlo)
            .mc_params(config.mc)
            .build()?,
    ));
    let stock = Arc::new(Instrument::from(Stock::new(config.asset_name.as_str(), 1)?));

    let mut results = Vec::with_capacity(config.n_ratios);
    for ratio in config.hedge_ratios() {
        info!(ratio, "calculating FO and risk P&Ls");
        let fo = hedged_book(&analytical, &stock, ratio)?;
        let risk = hedged_book(&monte_carlo, &stock, ratio)?;
        let fo_pnl = pnl_vector(&fo, &base, &scenarios)?;
        let risk_pnl = pnl_vector(&risk, &base, &scenarios)?;
        let stats = pla_stats(&fo_pnl, &risk_pnl)?;
        debug!(ratio, spearman = stats.spearman, ks = stats.ks, "hedge ratio done");
        results.push(HedgeRatioResult {
            ratio,
            stats,
            zone: stats.zone(),
        });
    }

    let process = ProcessDescription::new(
        config.spot,
        config.volatility,
        config.risk_free_rate,
        config.dividend_yield,
        config.valuation_date,
    )?;
    let delta = BlackScholes::from_process(&process)?.delta(
        OptionRight::Call,
        config.strike,
        process.time_to_expiry(config.maturity),
    );

    Ok(HedgeStudy {
        analytical_base: analytical.price(&base)?,
        monte_carlo_base: monte_carlo.price(&base)?,
        delta,
        shocked_spots,
        results,
        analytical_cache: cache_stats(&analytical),
        monte_carlo_cache: cache_stats(&monte_carlo),
    })
}

/// One call against `ratio` shares.
fn hedged_book(
    option: &Arc<Instrument>,
    stock: &Arc<Instrument>,
    ratio: f64,
) -> Result<Portfolio, PricingError> {
    let mut book = Portfolio::new();
    book.create_deal(Arc::clone(option), 1.0)?;
    book.create_deal(Arc::clone(stock), -ratio)?;
    Ok(book)
}

/// Scenario P&L of `book` relative to `base`, scenarios priced in parallel.
fn pnl_vector(
    book: &Portfolio,
    base: &MarketDataStore,
    scenarios: &[MarketDataStore],
) -> Result<Vec<f64>, PricingError> {
    let base_value = book.price(base)?;
    scenarios
        .par_iter()
        .map(|market| -> Result<f64, PricingError> { Ok(book.price(market)? - base_value) })
        .collect()
}

fn cache_stats(instrument: &Instrument) -> CacheStats {
    instrument
        .as_option()
        .map(OptionInstrument::cache_stats)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hedge_ratios() {
        let mut config = HedgeConfig::default();
        config.n_ratios = 5;
        assert_eq!(config.hedge_ratios(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        config.n_ratios = 1;
        assert_eq!(config.hedge_ratios(), vec![0.0]);
    }

    #[test]
    fn test_default_config_matches_documented_values() {
        let config = HedgeConfig::default();
        assert_eq!((config.spot, config.volatility, config.strike), (100.0, 0.2, 100.0));
        assert_eq!(config.risk_free_rate, 0.05);
        assert_eq!((config.n_ratios, config.n_shocks), (20, 100));
        assert_eq!((config.mc.steps, config.mc.num_paths), (1, 10_000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = HedgeConfig::default();
        config.n_ratios = 0;
        assert!(config.validate().unwrap_err().is_validation());

        let mut config = HedgeConfig::default();
        config.n_shocks = 1;
        assert!(config.validate().is_err());

        let mut config = HedgeConfig::default();
        config.maturity = config.valuation_date;
        assert!(config.validate().is_err());

        let mut config = HedgeConfig::default();
        config.volatility = -0.2;
        assert!(run_hedge_study(&config).unwrap_err().is_validation());
    }

    #[test]
    fn test_base_market() {
        let market = HedgeConfig::default().base_market().unwrap();
        assert_eq!(market.equity("Asset").unwrap().spot(), 100.0);
        assert_eq!(market.risk_free_rate().unwrap(), 0.05);
    }
}
