//! # pricer_core: Foundation for option valuation
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Market data snapshots: `MarketDataStore`, `AssetMarketData` (`market_data`)
//! - Time types: `Date`, `DayCountConvention` (`types::time`)
//! - The pricing method selector: `PricingMethod` (`types::method`)
//! - Error types: `PricingError`, `DateError` (`types::error`)
//! - The `Priceable` trait (`traits`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Configuration deserialisation
//! - tracing: Structured log events (no subscriber is installed here)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::{
//!     EquityAssetMarketData, InterestRateAssetMarketData, MarketDataStore,
//! };
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let valuation = Date::from_ymd(2025, 1, 1).unwrap();
//! let maturity = Date::from_ymd(2026, 1, 1).unwrap();
//! let t = DayCountConvention::ActualActual365.year_fraction_dates(valuation, maturity);
//! assert_eq!(t, 1.0);
//!
//! let market = MarketDataStore::with_scenario_date(valuation)
//!     .with_asset(EquityAssetMarketData::new("ACME", 100.0, 0.1).unwrap())
//!     .with_asset(InterestRateAssetMarketData::new("rfr", 0.02).unwrap());
//! assert_eq!(market.len(), 2);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod traits;
pub mod types;
