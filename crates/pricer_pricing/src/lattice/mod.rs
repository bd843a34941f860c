//! Lattice methods.

mod binomial;

pub use binomial::{BinomialTree, DEFAULT_LATTICE_STEPS, MAX_LATTICE_STEPS};
