//! Priced option instrument with a private valuation cache.

use std::sync::{Mutex, MutexGuard};

use pricer_core::market_data::MarketDataStore;
use pricer_core::traits::Priceable;
use pricer_core::types::{Date, PricingError, PricingMethod};
use pricer_models::instruments::{
    ExerciseStyle, OptionRight, OptionSpec, OptionTerms, PayoffKind, TradableOption,
};
use pricer_models::models::ProcessDescription;
use tracing::debug;

use crate::cache::{CachePolicy, CacheStats, OptionCacheKey, ValuationCache};
use crate::engine::{resolve_engine, PricingEngine, ValuationEngine};
use crate::lattice::DEFAULT_LATTICE_STEPS;
use crate::mc::McParams;

/// Option contract bound to a pricing method and engine.
///
/// The engine is resolved once at construction, so an unsupported
/// method/exercise combination never produces an instrument. Each instance
/// memoises its prices per exact input tuple.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::{
///     EquityAssetMarketData, InterestRateAssetMarketData, MarketDataStore,
/// };
/// use pricer_core::types::{Date, PricingMethod};
/// use pricer_pricing::instruments::OptionInstrument;
///
/// let market = MarketDataStore::with_scenario_date(Date::from_ymd(2025, 1, 1).unwrap())
///     .with_asset(EquityAssetMarketData::new("ACME", 100.0, 0.1).unwrap())
///     .with_asset(InterestRateAssetMarketData::new("rfr", 0.02).unwrap());
///
/// let call = OptionInstrument::european_call(
///     "ACME",
///     100.0,
///     Date::from_ymd(2026, 1, 1).unwrap(),
///     PricingMethod::Analytical,
/// )
/// .unwrap();
///
/// let price = call.price(&market).unwrap();
/// assert!((price - 5.016980606262).abs() < 1e-6);
/// assert_eq!(call.price(&market).unwrap(), price);
/// assert_eq!(call.cache_stats().hits, 1);
/// ```
#[derive(Debug)]
pub struct OptionInstrument {
    terms: OptionTerms,
    pricing_method: PricingMethod,
    mc_params: McParams,
    lattice_steps: usize,
    tradable: TradableOption,
    engine: PricingEngine,
    cache: Mutex<ValuationCache<OptionCacheKey>>,
}

/// Builder for [`OptionInstrument`].
#[derive(Debug, Clone)]
pub struct OptionBuilder {
    terms: OptionTerms,
    pricing_method: PricingMethod,
    mc_params: McParams,
    lattice_steps: usize,
    cache_policy: CachePolicy,
}

impl OptionBuilder {
    /// Sets the pricing method (default analytical).
    pub fn pricing_method(mut self, method: PricingMethod) -> Self {
        self.pricing_method = method;
        self
    }

    /// Sets the Monte Carlo parameters.
    pub fn mc_params(mut self, params: McParams) -> Self {
        self.mc_params = params;
        self
    }

    /// Sets the number of binomial lattice steps.
    pub fn lattice_steps(mut self, steps: usize) -> Self {
        self.lattice_steps = steps;
        self
    }

    /// Sets the cache capacity policy.
    pub fn cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// Resolves the engine and builds the instrument.
    ///
    /// # Errors
    ///
    /// `UnsupportedConfiguration` when the exercise style does not admit the
    /// pricing method, `Validation` for out-of-range engine parameters.
    pub fn build(self) -> Result<OptionInstrument, PricingError> {
        let engine = resolve_engine(
            self.pricing_method,
            self.terms.exercise(),
            self.mc_params,
            self.lattice_steps,
        )?;
        Ok(OptionInstrument {
            tradable: TradableOption::from_terms(&self.terms),
            terms: self.terms,
            pricing_method: self.pricing_method,
            mc_params: self.mc_params,
            lattice_steps: self.lattice_steps,
            engine,
            cache: Mutex::new(ValuationCache::new(self.cache_policy)),
        })
    }
}

impl OptionInstrument {
    /// Starts a builder for `terms` with default engine parameters.
    pub fn builder(terms: OptionTerms) -> OptionBuilder {
        OptionBuilder {
            terms,
            pricing_method: PricingMethod::Analytical,
            mc_params: McParams::default(),
            lattice_steps: DEFAULT_LATTICE_STEPS,
            cache_policy: CachePolicy::default(),
        }
    }

    /// Builder seeded from a configuration description.
    ///
    /// # Errors
    ///
    /// `Validation` for an unknown right, payoff kind, exercise style or
    /// pricing method string, or invalid terms.
    pub fn builder_from_spec(spec: &OptionSpec) -> Result<OptionBuilder, PricingError> {
        let terms = spec.terms()?;
        let method = spec.pricing_method()?;
        Ok(Self::builder(terms).pricing_method(method))
    }

    /// Instrument described by `spec`, with default engine parameters.
    pub fn from_spec(spec: &OptionSpec) -> Result<Self, PricingError> {
        Self::builder_from_spec(spec)?.build()
    }

    fn with_facets(
        asset_name: &str,
        strike: f64,
        maturity: Date,
        right: OptionRight,
        payoff: PayoffKind,
        exercise: ExerciseStyle,
        method: PricingMethod,
    ) -> Result<Self, PricingError> {
        let terms = OptionTerms::new(asset_name, strike, maturity, right, payoff, exercise)?;
        Self::builder(terms).pricing_method(method).build()
    }

    /// European vanilla call.
    pub fn european_call(
        asset_name: &str,
        strike: f64,
        maturity: Date,
        method: PricingMethod,
    ) -> Result<Self, PricingError> {
        Self::with_facets(
            asset_name,
            strike,
            maturity,
            OptionRight::Call,
            PayoffKind::Vanilla,
            ExerciseStyle::European,
            method,
        )
    }

    /// European vanilla put.
    pub fn european_put(
        asset_name: &str,
        strike: f64,
        maturity: Date,
        method: PricingMethod,
    ) -> Result<Self, PricingError> {
        Self::with_facets(
            asset_name,
            strike,
            maturity,
            OptionRight::Put,
            PayoffKind::Vanilla,
            ExerciseStyle::European,
            method,
        )
    }

    /// European cash-or-nothing call paying `cash` above the strike.
    pub fn european_binary_call(
        asset_name: &str,
        strike: f64,
        maturity: Date,
        cash: f64,
        method: PricingMethod,
    ) -> Result<Self, PricingError> {
        Self::with_facets(
            asset_name,
            strike,
            maturity,
            OptionRight::Call,
            PayoffKind::cash_or_nothing(cash)?,
            ExerciseStyle::European,
            method,
        )
    }

    /// American vanilla call exercisable from `earliest_exercise`.
    pub fn american_call(
        asset_name: &str,
        strike: f64,
        maturity: Date,
        earliest_exercise: Date,
        method: PricingMethod,
    ) -> Result<Self, PricingError> {
        Self::with_facets(
            asset_name,
            strike,
            maturity,
            OptionRight::Call,
            PayoffKind::Vanilla,
            ExerciseStyle::American { earliest_exercise },
            method,
        )
    }

    /// American vanilla put exercisable from `earliest_exercise`.
    pub fn american_put(
        asset_name: &str,
        strike: f64,
        maturity: Date,
        earliest_exercise: Date,
        method: PricingMethod,
    ) -> Result<Self, PricingError> {
        Self::with_facets(
            asset_name,
            strike,
            maturity,
            OptionRight::Put,
            PayoffKind::Vanilla,
            ExerciseStyle::American { earliest_exercise },
            method,
        )
    }

    /// Bermudan vanilla option exercisable on `exercise_dates`.
    pub fn bermudan(
        asset_name: &str,
        strike: f64,
        maturity: Date,
        right: OptionRight,
        exercise_dates: Vec<Date>,
        method: PricingMethod,
    ) -> Result<Self, PricingError> {
        Self::with_facets(
            asset_name,
            strike,
            maturity,
            right,
            PayoffKind::Vanilla,
            ExerciseStyle::bermudan(exercise_dates)?,
            method,
        )
    }

    /// Contract terms.
    pub fn terms(&self) -> &OptionTerms {
        &self.terms
    }

    /// Pricing method.
    pub fn pricing_method(&self) -> PricingMethod {
        self.pricing_method
    }

    /// Monte Carlo parameters (defaults unless configured).
    pub fn mc_params(&self) -> &McParams {
        &self.mc_params
    }

    /// Binomial lattice steps.
    pub fn lattice_steps(&self) -> usize {
        self.lattice_steps
    }

    /// Engine-facing view of the contract.
    pub fn tradable(&self) -> &TradableOption {
        &self.tradable
    }

    /// Engine resolved at construction.
    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// Prices against `market` with the resolved engine.
    ///
    /// # Errors
    ///
    /// `NotFound` when the underlying or the `"rfr"` record is missing,
    /// `Validation` when a record has the wrong kind, and any engine error.
    pub fn price(&self, market: &MarketDataStore) -> Result<f64, PricingError> {
        self.price_with_engine(market, &self.engine)
    }

    /// Prices against `market` with an injected engine, sharing this
    /// instrument's cache.
    ///
    /// The result is stored under the key of this instrument's own pricing
    /// method, so a later [`price`](Self::price) on the same inputs returns
    /// the injected engine's value. Use a fresh instrument when the two
    /// results must stay apart.
    pub fn price_with_engine<E: ValuationEngine + ?Sized>(
        &self,
        market: &MarketDataStore,
        engine: &E,
    ) -> Result<f64, PricingError> {
        let equity = market.equity(self.terms.asset_name())?;
        let risk_free_rate = market.risk_free_rate()?;
        self.cached_npv(
            engine,
            equity.spot(),
            equity.volatility(),
            risk_free_rate,
            equity.dividend_yield(),
            market.valuation_date(),
        )
    }

    /// Prices from explicit inputs with the resolved engine.
    pub fn price_inputs(
        &self,
        spot: f64,
        volatility: f64,
        risk_free_rate: f64,
        dividend_yield: f64,
        valuation_date: Date,
    ) -> Result<f64, PricingError> {
        self.cached_npv(
            &self.engine,
            spot,
            volatility,
            risk_free_rate,
            dividend_yield,
            valuation_date,
        )
    }

    fn cached_npv<E: ValuationEngine + ?Sized>(
        &self,
        engine: &E,
        spot: f64,
        volatility: f64,
        risk_free_rate: f64,
        dividend_yield: f64,
        valuation_date: Date,
    ) -> Result<f64, PricingError> {
        let key = OptionCacheKey::new(
            spot,
            volatility,
            risk_free_rate,
            dividend_yield,
            self.pricing_method,
            valuation_date,
        );
        let asset = self.terms.asset_name();

        let cached = self.lock_cache()?.get(&key);
        if let Some(value) = cached {
            debug!(asset, spot, volatility, "fetching price from cache");
            return Ok(value);
        }

        debug!(asset, spot, volatility, method = %self.pricing_method, "computing price");
        let process = ProcessDescription::new(
            spot,
            volatility,
            risk_free_rate,
            dividend_yield,
            valuation_date,
        )?;
        // The lock is not held while the engine runs.
        let value = engine.npv(&process, &self.tradable)?;
        self.lock_cache()?.insert(key, value);
        Ok(value)
    }

    fn lock_cache(&self) -> Result<MutexGuard<'_, ValuationCache<OptionCacheKey>>, PricingError> {
        self.cache
            .lock()
            .map_err(|_| PricingError::ModelFailure("valuation cache lock poisoned".to_string()))
    }

    /// Cache counters.
    pub fn cache_stats(&self) -> CacheStats {
        match self.cache.lock() {
            Ok(cache) => cache.stats(),
            Err(poisoned) => poisoned.into_inner().stats(),
        }
    }

    /// Number of cached prices.
    pub fn cache_len(&self) -> usize {
        match self.cache.lock() {
            Ok(cache) => cache.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Drops every cached price.
    pub fn clear_cache(&self) {
        match self.cache.lock() {
            Ok(mut cache) => cache.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

/// Same underlying, strike, maturity and facet combination.
impl PartialEq for OptionInstrument {
    fn eq(&self, other: &Self) -> bool {
        self.terms.same_contract(&other.terms)
    }
}

impl Priceable for OptionInstrument {
    fn price(&self, market: &MarketDataStore) -> Result<f64, PricingError> {
        OptionInstrument::price(self, market)
    }

    fn asset_name(&self) -> Option<&str> {
        Some(self.terms.asset_name())
    }
}
