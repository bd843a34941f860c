//! Stochastic process descriptions consumed by pricing engines.

mod process;

pub use process::ProcessDescription;
