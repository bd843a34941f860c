//! Numerical engines compared against the Black-Scholes-Merton closed form.
//!
//! # Test Categories
//!
//! 1. **Monte Carlo**: European estimate within three standard errors, and
//!    low-discrepancy estimates at the default step count
//! 2. **Lattice**: CRR converges to the closed form as steps grow
//! 3. **Early exercise**: American and Bermudan puts dominate the European

use approx::assert_relative_eq;
use pricer_core::types::{Date, PricingMethod};
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{
    ExerciseStyle, OptionRight, OptionTerms, PayoffKind, TradableOption,
};
use pricer_models::models::ProcessDescription;
use pricer_pricing::engine::{
    resolve_engine, BinomialTreeEngine, LongstaffSchwartzEngine, McEuropeanEngine,
    ValuationEngine,
};
use pricer_pricing::mc::McParams;
use pricer_pricing::rng::RngKind;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

/// S = K = 100, r = 5%, σ = 20%, one year.
fn standard_process() -> ProcessDescription {
    ProcessDescription::new(100.0, 0.2, 0.05, 0.0, date(2025, 1, 1)).unwrap()
}

fn tradable(right: OptionRight, payoff: PayoffKind, exercise: ExerciseStyle) -> TradableOption {
    let terms =
        OptionTerms::new("ACME", 100.0, date(2026, 1, 1), right, payoff, exercise).unwrap();
    TradableOption::from_terms(&terms)
}

fn european(right: OptionRight) -> TradableOption {
    tradable(right, PayoffKind::Vanilla, ExerciseStyle::European)
}

fn american_put() -> TradableOption {
    tradable(
        OptionRight::Put,
        PayoffKind::Vanilla,
        ExerciseStyle::American {
            earliest_exercise: date(2025, 1, 1),
        },
    )
}

// ============================================================================
// Monte Carlo
// ============================================================================

#[test]
fn test_mc_european_call_within_three_standard_errors() {
    let params = McParams::builder()
        .steps(12)
        .num_paths(100_000)
        .seed(2025)
        .build()
        .unwrap();
    let engine = McEuropeanEngine::new(params).unwrap();
    let estimate = engine
        .estimate(&standard_process(), &european(OptionRight::Call))
        .unwrap();
    let analytical = 10.450583572185565;
    assert!(
        (estimate.price - analytical).abs() < 3.0 * estimate.std_error,
        "mc {} ± {} vs {analytical}",
        estimate.price,
        estimate.std_error
    );
}

#[test]
fn test_mc_put_call_parity() {
    let params = McParams::builder()
        .steps(1)
        .num_paths(200_000)
        .seed(9)
        .build()
        .unwrap();
    let engine = McEuropeanEngine::new(params).unwrap();
    let process = standard_process();
    let call = engine.npv(&process, &european(OptionRight::Call)).unwrap();
    let put = engine.npv(&process, &european(OptionRight::Put)).unwrap();
    // Same seed, same paths: C - P = S - K e^{-rT} up to sampling error of the forward.
    let parity = 100.0 - 100.0 * (-0.05_f64).exp();
    assert_relative_eq!(call - put, parity, epsilon = 0.15);
}

#[test]
fn test_mc_binary_call_against_closed_form() {
    let params = McParams::builder()
        .steps(1)
        .num_paths(50_000)
        .rng_kind(RngKind::LowDiscrepancy)
        .build()
        .unwrap();
    let engine = McEuropeanEngine::new(params).unwrap();
    let binary = tradable(
        OptionRight::Call,
        PayoffKind::cash_or_nothing(1.0).unwrap(),
        ExerciseStyle::European,
    );
    let process = standard_process();
    let mc = engine.npv(&process, &binary).unwrap();
    let analytical = BlackScholes::from_process(&process)
        .unwrap()
        .price_option(&binary, 1.0)
        .unwrap();
    assert_relative_eq!(mc, analytical, epsilon = 5e-3);
}

#[test]
fn test_low_discrepancy_european_at_default_steps() {
    let params = McParams::builder()
        .num_paths(20_000)
        .rng_kind(RngKind::LowDiscrepancy)
        .build()
        .unwrap();
    assert_eq!(params.steps, 100);
    let engine = McEuropeanEngine::new(params).unwrap();
    let process = standard_process();
    for right in [OptionRight::Call, OptionRight::Put] {
        let option = european(right);
        let mc = engine.npv(&process, &option).unwrap();
        let analytical = BlackScholes::from_process(&process)
            .unwrap()
            .price_option(&option, 1.0)
            .unwrap();
        assert_relative_eq!(mc, analytical, epsilon = 0.02);
    }
}

// ============================================================================
// Lattice
// ============================================================================

#[test]
fn test_binomial_converges_to_black_scholes() {
    let process = standard_process();
    let put = european(OptionRight::Put);
    let analytical = 5.573526022256971;

    let coarse = BinomialTreeEngine::new(50).unwrap().npv(&process, &put).unwrap();
    let fine = BinomialTreeEngine::new(800).unwrap().npv(&process, &put).unwrap();
    assert!((fine - analytical).abs() < (coarse - analytical).abs());
    assert_relative_eq!(fine, analytical, epsilon = 5e-3);
}

#[test]
fn test_analytical_and_binomial_agree_with_dividend() {
    let process = ProcessDescription::new(100.0, 0.2, 0.05, 0.03, date(2025, 1, 1)).unwrap();
    let call = european(OptionRight::Call);
    let analytical = resolve_engine(
        PricingMethod::Analytical,
        call.exercise(),
        McParams::default(),
        0,
    )
    .unwrap()
    .npv(&process, &call)
    .unwrap();
    assert_relative_eq!(analytical, 8.652528553942709, epsilon = 1e-10);

    let lattice = BinomialTreeEngine::new(1000).unwrap().npv(&process, &call).unwrap();
    assert_relative_eq!(lattice, analytical, epsilon = 5e-3);
}

// ============================================================================
// Early exercise
// ============================================================================

#[test]
fn test_lsm_american_put_above_european() {
    let params = McParams::builder()
        .steps(50)
        .num_paths(20_000)
        .seed(42)
        .build()
        .unwrap();
    let process = standard_process();
    let lsm = LongstaffSchwartzEngine::new(params).unwrap();
    let american = lsm.npv(&process, &american_put()).unwrap();
    let european_put = 5.573526022256971;
    assert!(american > european_put, "american {american}");

    let lattice = BinomialTreeEngine::default().npv(&process, &american_put()).unwrap();
    assert_relative_eq!(american, lattice, epsilon = 0.2);
}

#[test]
fn test_low_discrepancy_lsm_american_put_matches_lattice() {
    let params = McParams::builder()
        .num_paths(20_000)
        .rng_kind(RngKind::LowDiscrepancy)
        .build()
        .unwrap();
    assert_eq!(params.steps, 100);
    let process = standard_process();
    let american = LongstaffSchwartzEngine::new(params)
        .unwrap()
        .npv(&process, &american_put())
        .unwrap();
    let lattice = BinomialTreeEngine::default().npv(&process, &american_put()).unwrap();
    assert!(american > 5.573526022256971, "american {american}");
    assert_relative_eq!(american, lattice, epsilon = 0.1);
}

#[test]
fn test_bermudan_between_european_and_american() {
    let process = standard_process();
    let bermudan = tradable(
        OptionRight::Put,
        PayoffKind::Vanilla,
        ExerciseStyle::bermudan(vec![
            date(2025, 4, 2),
            date(2025, 7, 2),
            date(2025, 10, 1),
        ])
        .unwrap(),
    );
    let tree = BinomialTreeEngine::new(400).unwrap();
    let european = tree.npv(&process, &european(OptionRight::Put)).unwrap();
    let bermudan = tree.npv(&process, &bermudan).unwrap();
    let american = tree.npv(&process, &american_put()).unwrap();
    assert!(european < bermudan, "{european} < {bermudan}");
    assert!(bermudan < american, "{bermudan} < {american}");
}
