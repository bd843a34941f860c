//! Caching discipline of priced instruments.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use approx::assert_relative_eq;
use rayon::prelude::*;
use pricer_core::market_data::{
    EquityAssetMarketData, InterestRateAssetMarketData, MarketDataStore,
};
use pricer_core::types::{Date, PricingError, PricingMethod};
use pricer_models::instruments::{OptionSpec, TradableOption};
use pricer_models::models::ProcessDescription;
use pricer_pricing::cache::CachePolicy;
use pricer_pricing::engine::ValuationEngine;
use pricer_pricing::instruments::{Instrument, OptionInstrument, Stock};
use pricer_pricing::rng::RngKind;

/// Engine returning `spot × vol` and counting its invocations.
#[derive(Default)]
struct CountingEngine {
    calls: AtomicUsize,
}

impl CountingEngine {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ValuationEngine for CountingEngine {
    fn npv(
        &self,
        process: &ProcessDescription,
        _option: &TradableOption,
    ) -> Result<f64, PricingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(process.spot() * process.volatility())
    }
}

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn market(spot: f64, vol: f64) -> MarketDataStore {
    MarketDataStore::with_scenario_date(date(2025, 1, 1))
        .with_asset(EquityAssetMarketData::new("ACME", spot, vol).unwrap())
        .with_asset(InterestRateAssetMarketData::new("rfr", 0.02).unwrap())
}

fn call(method: PricingMethod) -> OptionInstrument {
    OptionInstrument::european_call("ACME", 100.0, date(2026, 1, 1), method).unwrap()
}

fn spec(pricing_method: &str) -> OptionSpec {
    OptionSpec {
        asset_name: "ACME".to_string(),
        strike: 100.0,
        maturity: date(2026, 1, 1),
        right: "call".to_string(),
        payoff: "vanilla".to_string(),
        cash: 1.0,
        exercise: "european".to_string(),
        earliest_exercise: None,
        exercise_dates: Vec::new(),
        pricing_method: pricing_method.to_string(),
    }
}

#[test]
fn test_same_inputs_invoke_engine_once() {
    let engine = CountingEngine::default();
    let option = call(PricingMethod::Analytical);
    let snapshot = market(100.0, 0.1);

    let first = option.price_with_engine(&snapshot, &engine).unwrap();
    let second = option.price_with_engine(&snapshot, &engine).unwrap();
    assert_eq!(first, second);
    assert_eq!(engine.calls(), 1);

    option.price_with_engine(&market(100.0, 0.2), &engine).unwrap();
    assert_eq!(engine.calls(), 2);
    assert_eq!(option.cache_len(), 2);
}

#[test]
fn test_scenario_date_is_part_of_the_key() {
    let engine = CountingEngine::default();
    let option = call(PricingMethod::Analytical);
    let mut snapshot = market(100.0, 0.1);
    option.price_with_engine(&snapshot, &engine).unwrap();
    snapshot.set_scenario_date(Some(date(2025, 6, 1)));
    option.price_with_engine(&snapshot, &engine).unwrap();
    assert_eq!(engine.calls(), 2);
}

#[test]
fn test_stock_share_count_changes_are_recomputed() {
    let snapshot = market(100.0, 0.2);
    let mut stock = Stock::new("ACME", 10).unwrap();
    assert_eq!(stock.price(&snapshot).unwrap(), 1000.0);
    stock.set_num_shares(100);
    assert_eq!(stock.price(&snapshot).unwrap(), 10000.0);
    let stats = stock.cache_stats();
    assert_eq!((stats.hits, stats.misses), (0, 2));
}

#[test]
fn test_unknown_pricing_method_fails_before_pricing() {
    let err = OptionInstrument::from_spec(&spec("Nonsense")).unwrap_err();
    assert!(err.is_validation(), "{err}");
    assert!(err.to_string().contains("Nonsense"));
}

#[test]
fn test_unknown_right_fails_validation() {
    let mut bad = spec("ANALYTICAL");
    bad.right = "straddle".to_string();
    assert!(OptionInstrument::from_spec(&bad).unwrap_err().is_validation());
}

#[test]
fn test_american_analytical_is_unsupported() {
    let mut american = spec("ANALYTICAL");
    american.exercise = "american".to_string();
    american.earliest_exercise = Some(date(2025, 1, 1));
    let err = OptionInstrument::from_spec(&american).unwrap_err();
    assert!(matches!(err, PricingError::UnsupportedConfiguration { .. }));
}

#[test]
fn test_american_default_mc_params() {
    let mut american = spec("MONTE_CARLO");
    american.exercise = "american".to_string();
    american.earliest_exercise = Some(date(2025, 1, 1));
    let option = OptionInstrument::from_spec(&american).unwrap();
    let params = option.mc_params();
    assert_eq!(
        (params.steps, params.num_paths, params.rng_kind),
        (100, 10_000, RngKind::PseudoRandom)
    );
}

#[test]
fn test_equality_semantics() {
    assert_eq!(call(PricingMethod::Analytical), call(PricingMethod::MonteCarlo));
    let other_strike =
        OptionInstrument::european_call("ACME", 110.0, date(2026, 1, 1), PricingMethod::Analytical)
            .unwrap();
    assert_ne!(call(PricingMethod::Analytical), other_strike);
    let american = OptionInstrument::american_call(
        "ACME",
        100.0,
        date(2026, 1, 1),
        date(2025, 1, 1),
        PricingMethod::Binomial,
    )
    .unwrap();
    assert_ne!(call(PricingMethod::Binomial), american);
}

#[test]
fn test_end_to_end_black_scholes() {
    let option = call(PricingMethod::Analytical);
    let price = option.price(&market(100.0, 0.1)).unwrap();
    assert_relative_eq!(price, 5.016980606262, epsilon = 1e-6);
}

#[test]
fn test_lru_policy_bounds_the_cache() {
    let engine = CountingEngine::default();
    let option = OptionInstrument::builder_from_spec(&spec("ANALYTICAL"))
        .unwrap()
        .cache_policy(CachePolicy::Lru { capacity: 2 })
        .build()
        .unwrap();

    for spot in [100.0, 101.0, 102.0] {
        option.price_with_engine(&market(spot, 0.1), &engine).unwrap();
    }
    assert_eq!(option.cache_len(), 2);
    assert_eq!(option.cache_stats().evictions, 1);

    // 100 was evicted, 102 is still cached.
    option.price_with_engine(&market(102.0, 0.1), &engine).unwrap();
    assert_eq!(engine.calls(), 3);
    option.price_with_engine(&market(100.0, 0.1), &engine).unwrap();
    assert_eq!(engine.calls(), 4);
}

#[test]
fn test_shared_instrument_across_threads() {
    let option = call(PricingMethod::Analytical);
    let snapshot = market(100.0, 0.1);
    let expected = option.price(&snapshot).unwrap();

    thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..10 {
                    assert_eq!(option.price(&snapshot).unwrap(), expected);
                }
            });
        }
    });
    assert_eq!(option.cache_len(), 1);
    assert_eq!(option.cache_stats().hits, 40);
}

#[test]
fn test_parallel_scenario_pricing_fills_cache_per_snapshot() {
    let option = call(PricingMethod::Analytical);
    let snapshots: Vec<MarketDataStore> =
        (0..8).map(|i| market(90.0 + 2.5 * i as f64, 0.2)).collect();
    let sequential: Vec<f64> = snapshots
        .iter()
        .map(|m| call(PricingMethod::Analytical).price(m).unwrap())
        .collect();

    let requests = 4 * snapshots.len();
    let prices: Vec<f64> = (0..requests)
        .into_par_iter()
        .map(|i| option.price(&snapshots[i % snapshots.len()]))
        .collect::<Result<_, PricingError>>()
        .unwrap();

    for (i, price) in prices.iter().enumerate() {
        assert_eq!(*price, sequential[i % snapshots.len()]);
    }
    // Two workers may both miss the same key before either inserts.
    let stats = option.cache_stats();
    assert_eq!(option.cache_len(), snapshots.len());
    assert_eq!(stats.hits + stats.misses, requests as u64);
    assert!(stats.misses >= snapshots.len() as u64, "{stats:?}");
}

#[test]
fn test_injected_engine_result_serves_later_method_pricing() {
    let engine = CountingEngine::default();
    let option = call(PricingMethod::Analytical);
    let snapshot = market(100.0, 0.1);

    let injected = option.price_with_engine(&snapshot, &engine).unwrap();
    assert_relative_eq!(injected, 10.0);
    assert_eq!(option.price(&snapshot).unwrap(), injected);
    assert_eq!(engine.calls(), 1);
    assert_eq!(option.cache_stats().hits, 1);
}

#[test]
fn test_instrument_enum_dispatch() {
    let snapshot = market(100.0, 0.1);
    let instruments: Vec<Instrument> = vec![
        call(PricingMethod::Analytical).into(),
        Stock::new("ACME", 3).unwrap().into(),
    ];
    let total: f64 = instruments
        .iter()
        .map(|i| i.price(&snapshot).unwrap())
        .sum();
    assert_relative_eq!(total, 300.0 + 5.016980606262415, epsilon = 1e-9);
    assert!(instruments.iter().all(|i| i.asset_name() == "ACME"));
}
