//! Monte Carlo pricing kernels.
//!
//! # Architecture
//!
//! ```text
//! McParams            (steps, paths, rng kind, seed)
//! ├── GbmParams       (spot, rate, dividend, vol, maturity)
//! ├── NormalGenerator (pseudo-random or bridged Halton increments)
//! ├── MonteCarloPricer   European payoffs
//! └── LongstaffSchwartz  early exercise on a flagged grid
//! ```
//!
//! ```rust
//! use pricer_models::instruments::{OptionRight, PayoffKind, StrikedPayoff};
//! use pricer_pricing::mc::{GbmParams, McParams, MonteCarloPricer};
//!
//! let pricer = MonteCarloPricer::new(McParams::default()).unwrap();
//! let call = StrikedPayoff::new(OptionRight::Call, PayoffKind::Vanilla, 100.0);
//! let put = StrikedPayoff::new(OptionRight::Put, PayoffKind::Vanilla, 100.0);
//!
//! let c = pricer.price_european(GbmParams::default(), &call);
//! let p = pricer.price_european(GbmParams::default(), &put);
//! assert!(c.price > p.price);
//! ```

mod config;
mod error;
mod lsm;
mod paths;
mod pricer;

pub use config::{
    McParams, McParamsBuilder, DEFAULT_NUM_PATHS, DEFAULT_SEED, DEFAULT_STEPS, MAX_PATHS,
    MAX_STEPS, MAX_STORED_PATH_VALUES,
};
pub use error::ConfigError;
pub use lsm::LongstaffSchwartz;
pub use paths::{GbmParams, SimulatedPaths};
pub use pricer::{McEstimate, MonteCarloPricer};
