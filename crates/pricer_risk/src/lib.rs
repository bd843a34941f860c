//! # Pricer Risk (L4: Application)
//!
//! Scenario revaluation on top of the cached instruments of `pricer_pricing`.
//!
//! This crate provides:
//! - Log-normal spot shocks and bumped market snapshots (`scenarios`)
//! - Portfolios of deals with an aggregate price (`portfolio`)
//! - P&L attribution statistics: Spearman correlation and KS (`pla`)
//! - A delta-hedging study comparing closed-form and Monte Carlo P&L
//!   (`hedging`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  scenarios/ - shocks, spot scenarios    │
//! │  portfolio/ - Deal, DealId, Portfolio   │
//! │  pla/       - Spearman, KS, zones       │
//! │  hedging/   - hedge ratio sweep         │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  engines + per-instrument caches        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Performance
//!
//! Scenario snapshots are priced in parallel with Rayon. Instruments are
//! shared through `Arc`, so repeated sweeps over the same snapshots are
//! served from the instruments' caches.
//!
//! ## Example
//!
//! ```
//! use pricer_risk::hedging::{run_hedge_study, HedgeConfig};
//!
//! let config = HedgeConfig {
//!     n_ratios: 3,
//!     n_shocks: 20,
//!     ..HedgeConfig::default()
//! };
//! let study = run_hedge_study(&config).unwrap();
//! assert_eq!(study.results.len(), 3);
//! assert!(study.delta > 0.0 && study.delta < 1.0);
//! ```

#![warn(missing_docs)]

pub mod hedging;
pub mod pla;
pub mod portfolio;
pub mod scenarios;
