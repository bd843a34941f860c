//! # Pricer Models (L2: Business Logic)
//!
//! Option contracts, process descriptions and closed-form formulas.
//!
//! This crate provides:
//! - Option terms composed from right, payoff kind and exercise style facets
//! - The engine-facing `TradableOption` view built once per contract
//! - `ProcessDescription`: spot, volatility, rates and valuation date
//! - Black-Scholes-Merton formulas for validation and analytical pricing
//!
//! ## Design Principles
//!
//! - **Facet composition** instead of a type per option variant
//! - **Eager validation**: invalid terms never produce a value
//! - **Enum-based dispatch** for static dispatch

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
pub mod models;
