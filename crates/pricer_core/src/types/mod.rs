//! Core time, method and error types.
//!
//! This module provides:
//! - `time`: `Date` and `DayCountConvention` for maturities and valuation dates
//! - `method`: `PricingMethod`, the algorithm family selector
//! - `error`: `PricingError` and `DateError`
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod error;
pub mod method;
pub mod time;

pub use error::{DateError, PricingError};
pub use method::PricingMethod;
pub use time::{Date, DayCountConvention};
