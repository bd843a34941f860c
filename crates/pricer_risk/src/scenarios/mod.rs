//! Spot scenarios derived from a base market snapshot.
//!
//! A scenario set is one bumped copy of the base snapshot per shock, with the
//! named equity's spot multiplied by the shock. The base store is never
//! mutated.

mod shocks;

pub use shocks::{generate_shocks, ShockError, ShockGenerator, DEFAULT_NUM_SHOCKS};

use pricer_core::market_data::MarketDataStore;
use pricer_core::types::PricingError;
use tracing::debug;

/// Builds one market snapshot per shock with `asset_name`'s spot scaled.
///
/// # Errors
///
/// `NotFound` when the base snapshot has no equity record of that name, and
/// `Validation` when a shocked spot is rejected by the record.
pub fn spot_scenarios(
    base: &MarketDataStore,
    asset_name: &str,
    shocks: &[f64],
) -> Result<Vec<MarketDataStore>, PricingError> {
    let equity = base.equity(asset_name)?;
    debug!(asset = asset_name, count = shocks.len(), "building spot scenarios");
    shocks
        .iter()
        .map(|shock| -> Result<MarketDataStore, PricingError> {
            let mut scenario = base.clone();
            scenario.add(equity.with_spot(equity.spot() * shock)?);
            Ok(scenario)
        })
        .collect()
}
