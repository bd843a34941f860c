//! Market data snapshots.
//!
//! This module provides:
//! - `asset`: Equity and interest rate records and the `AssetMarketData` enum
//! - `store`: `MarketDataStore`, the name-keyed snapshot instruments price against
//! - `error`: `MarketDataError`

pub mod asset;
pub mod error;
pub mod store;

pub use asset::{AssetMarketData, EquityAssetMarketData, InterestRateAssetMarketData};
pub use error::MarketDataError;
pub use store::{MarketDataStore, RISK_FREE_RATE_ASSET};
