//! End-to-end hedging study.

use approx::assert_relative_eq;
use pricer_pricing::mc::McParams;
use pricer_risk::hedging::{run_hedge_study, HedgeConfig};
use pricer_risk::pla::PlaZone;

fn config() -> HedgeConfig {
    HedgeConfig {
        n_ratios: 5,
        n_shocks: 60,
        mc: McParams {
            steps: 1,
            num_paths: 20_000,
            ..McParams::default()
        },
        ..HedgeConfig::default()
    }
}

#[test]
fn test_study_shape_and_base_values() {
    let study = run_hedge_study(&config()).unwrap();
    assert_eq!(study.results.len(), 5);
    assert_eq!(study.shocked_spots.len(), 60);
    assert!(study.shocked_spots.iter().all(|&s| s > 0.0));

    let ratios: Vec<f64> = study.results.iter().map(|r| r.ratio).collect();
    assert_eq!(ratios, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

    // One-year ATM call, r = 5%, σ = 20%.
    assert_relative_eq!(study.analytical_base, 10.450583572185565, epsilon = 1e-9);
    assert_relative_eq!(study.monte_carlo_base, study.analytical_base, epsilon = 0.5);
    assert_relative_eq!(study.delta, 0.6368306511756191, epsilon = 1e-9);
}

#[test]
fn test_unhedged_pnls_agree() {
    let study = run_hedge_study(&config()).unwrap();
    // Both pricers are monotone in spot, so the unhedged P&Ls rank identically.
    let unhedged = study.results[0].stats;
    assert_relative_eq!(unhedged.spearman, 1.0, epsilon = 1e-12);
    assert!(unhedged.ks < 0.2, "{unhedged:?}");
    for row in &study.results {
        assert!((0.0..=1.0).contains(&row.stats.ks));
        assert_eq!(row.zone, row.stats.zone());
    }
    assert_eq!(study.results[0].zone, PlaZone::classify(1.0, unhedged.ks));
}

#[test]
fn test_later_ratios_hit_the_caches() {
    let study = run_hedge_study(&config()).unwrap();
    // Base plus one miss per scenario; every further lookup is a hit.
    assert_eq!(study.analytical_cache.misses, 61);
    assert_eq!(study.monte_carlo_cache.misses, 61);
    assert!(study.analytical_cache.hits >= 4 * 61);
}

#[test]
fn test_study_is_reproducible() {
    let a = run_hedge_study(&config()).unwrap();
    let b = run_hedge_study(&config()).unwrap();
    assert_eq!(a.shocked_spots, b.shocked_spots);
    assert_eq!(a.results, b.results);
    assert!(a.best_by_ks().is_some());
    assert!(a.best_by_spearman().is_some());
}
