//! Closed-form pricing formulas for European options.
//!
//! This module provides:
//! - Black-Scholes-Merton prices for vanilla and cash-or-nothing payoffs
//! - Spot delta for vanilla payoffs
//! - Standard normal CDF/PDF

pub mod black_scholes;
pub mod distributions;
pub mod error;

pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
