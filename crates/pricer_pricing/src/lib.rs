//! # Pricer Pricing (Layer 3: Engines and Instruments)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns option terms and market data into prices:
//! - Random number generation: seeded PRNG and scrambled Halton sequences on a
//!   Brownian bridge (`rng`)
//! - Monte Carlo kernels: European expectation and Longstaff-Schwartz (`mc`)
//! - Cox-Ross-Rubinstein lattice (`lattice`)
//! - Engine dispatch from pricing method and exercise style (`engine`)
//! - Per-instrument valuation caching (`cache`)
//! - Priced `OptionInstrument`, `Stock` and `Instrument` (`instruments`)
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::{
//!     EquityAssetMarketData, InterestRateAssetMarketData, MarketDataStore,
//! };
//! use pricer_core::types::{Date, PricingMethod};
//! use pricer_pricing::instruments::OptionInstrument;
//!
//! let market = MarketDataStore::with_scenario_date(Date::from_ymd(2025, 1, 1).unwrap())
//!     .with_asset(EquityAssetMarketData::new("ACME", 100.0, 0.2).unwrap())
//!     .with_asset(InterestRateAssetMarketData::new("rfr", 0.05).unwrap());
//!
//! let put = OptionInstrument::american_put(
//!     "ACME",
//!     100.0,
//!     Date::from_ymd(2026, 1, 1).unwrap(),
//!     Date::from_ymd(2025, 1, 1).unwrap(),
//!     PricingMethod::Binomial,
//! )
//! .unwrap();
//!
//! let price = put.price(&market).unwrap();
//! assert!(price > 5.57); // above the European value
//! ```
//!
//! ## Concurrency
//!
//! Instruments are `Send + Sync`. Each owns its cache behind a mutex that is
//! released while an engine runs, so concurrent callers never block on a
//! computation; two threads racing on the same new inputs may both compute.

#![warn(missing_docs)]

pub mod cache;
pub mod engine;
pub mod grid;
pub mod instruments;
pub mod lattice;
pub mod mc;
pub mod rng;
