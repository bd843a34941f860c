//! Integration tests for market data snapshots.
//!
//! Exercises the public paths a pricing layer uses: building a snapshot,
//! reading typed records back, and the error mapping into `PricingError`.

use pricer_core::market_data::{
    AssetMarketData, EquityAssetMarketData, InterestRateAssetMarketData, MarketDataStore,
    RISK_FREE_RATE_ASSET,
};
use pricer_core::types::{Date, PricingError};

fn snapshot() -> MarketDataStore {
    let mut market = MarketDataStore::with_scenario_date(Date::from_ymd(2025, 1, 1).unwrap());
    let rfr = InterestRateAssetMarketData::new(RISK_FREE_RATE_ASSET, 0.02).unwrap();
    market.add_all(vec![
        AssetMarketData::from(EquityAssetMarketData::new("ACME", 100.0, 0.1).unwrap()),
        AssetMarketData::from(rfr),
    ]);
    market
}

#[test]
fn test_snapshot_reads_back_typed_records() {
    let market = snapshot();
    let acme = market.equity("ACME").unwrap();
    assert_eq!(acme.spot(), 100.0);
    assert_eq!(acme.volatility(), 0.1);
    assert_eq!(acme.dividend_yield(), 0.0);
    assert_eq!(market.risk_free_rate().unwrap(), 0.02);
    assert!(market.contains("rfr"));
    assert_eq!(market.iter().count(), 2);
}

#[test]
fn test_missing_asset_propagates_as_not_found() {
    fn spot_of(market: &MarketDataStore, name: &str) -> Result<f64, PricingError> {
        Ok(market.equity(name)?.spot())
    }

    let market = snapshot();
    assert_eq!(
        spot_of(&market, "OTHER"),
        Err(PricingError::NotFound {
            asset_name: "OTHER".to_string()
        })
    );
}

#[test]
fn test_snapshot_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MarketDataStore>();

    let market = snapshot();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| market.equity("ACME").unwrap().spot()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 100.0);
        }
    });
}

#[test]
fn test_bumped_copy_leaves_original_untouched() {
    let base = snapshot();
    let mut shocked = base.clone();
    let bumped = base.equity("ACME").unwrap().with_spot(110.0).unwrap();
    shocked.add(bumped);

    assert_eq!(base.equity("ACME").unwrap().spot(), 100.0);
    assert_eq!(shocked.equity("ACME").unwrap().spot(), 110.0);
    assert_eq!(shocked.scenario_date(), base.scenario_date());
}
