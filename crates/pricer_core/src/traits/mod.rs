//! Core traits for priceable instruments.
//!
//! All traits are designed for static dispatch (enum-based).

pub mod priceable;

pub use priceable::Priceable;
