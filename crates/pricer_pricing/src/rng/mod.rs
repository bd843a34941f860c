//! # Random Number Generation
//!
//! Normal variate sources for Monte Carlo path construction.
//!
//! - [`PricerRng`]: seeded pseudo-random generator (`StdRng` + Ziggurat normals)
//! - [`HaltonSequence`]: low-discrepancy points, mapped to normals through the
//!   inverse normal CDF
//! - [`BrownianBridge`]: orders those normals so the first coordinates build
//!   the terminal and midpoint levels of each path
//! - [`NormalGenerator`]: the per-path source selected by [`RngKind`]
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{NormalGenerator, RngKind};
//!
//! let mut gen = NormalGenerator::new(RngKind::LowDiscrepancy, 4, 42);
//! let mut increments = [0.0; 4];
//! gen.fill_path(&mut increments);
//! assert!(increments.iter().all(|z| z.is_finite()));
//! ```

mod bridge;
mod halton;
mod prng;

pub use bridge::BrownianBridge;
pub use halton::{
    permuted_radical_inverse, radical_inverse, HaltonSequence, LowDiscrepancySequence,
};
pub use prng::PricerRng;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt;

/// Source of the normal increments driving simulated paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RngKind {
    /// Seeded pseudo-random normals.
    #[default]
    PseudoRandom,
    /// Scrambled Halton points transformed by the inverse normal CDF and
    /// assembled along a Brownian bridge.
    #[serde(alias = "low_discrepancy", alias = "halton")]
    LowDiscrepancy,
}

impl RngKind {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            RngKind::PseudoRandom => "pseudorandom",
            RngKind::LowDiscrepancy => "lowdiscrepancy",
        }
    }
}

impl fmt::Display for RngKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Keeps inverse_cdf away from its infinite endpoints.
const UNIFORM_CLAMP: f64 = 1e-12;

/// Bridge coordinates drawn from the scrambled Halton sequence. Later
/// coordinates, which carry little of the path variance, are padded with
/// pseudo-random normals.
pub const MAX_QUASI_DIMENSIONS: usize = 512;

/// Per-path normal increment generator.
///
/// Each call to [`fill_path`](Self::fill_path) yields the increments for one
/// path. The low-discrepancy variant consumes one scrambled Halton point per
/// path and builds the path's increments from it with a Brownian bridge.
pub enum NormalGenerator {
    /// Pseudo-random stream.
    Pseudo(PricerRng),
    /// Halton stream with the standard normal used for the transform.
    LowDiscrepancy {
        /// Point sequence.
        sequence: HaltonSequence,
        /// Path construction from the transformed coordinates.
        bridge: BrownianBridge,
        /// Standard normal distribution.
        normal: Normal,
        /// Pseudo-random source for coordinates past the Halton dimension.
        padding: PricerRng,
        /// Normals of the current point, in bridge order.
        draws: Vec<f64>,
    },
}

impl NormalGenerator {
    /// Creates a generator of the given kind for paths with `dimension`
    /// increments. For the low-discrepancy kind the seed picks the digit
    /// scrambling.
    pub fn new(kind: RngKind, dimension: usize, seed: u64) -> Self {
        match kind {
            RngKind::PseudoRandom => NormalGenerator::Pseudo(PricerRng::from_seed(seed)),
            RngKind::LowDiscrepancy => {
                let bridge = BrownianBridge::new(dimension);
                let quasi = bridge.n_steps().min(MAX_QUASI_DIMENSIONS);
                NormalGenerator::LowDiscrepancy {
                    sequence: HaltonSequence::scrambled(quasi, seed),
                    draws: vec![0.0; bridge.n_steps()],
                    bridge,
                    normal: Normal::standard(),
                    padding: PricerRng::from_seed(seed),
                }
            }
        }
    }

    /// Fills `increments` with the standard normal draws of the next path.
    ///
    /// For the low-discrepancy kind `increments` must hold the `dimension`
    /// given at construction.
    pub fn fill_path(&mut self, increments: &mut [f64]) {
        match self {
            NormalGenerator::Pseudo(rng) => rng.fill_normal(increments),
            NormalGenerator::LowDiscrepancy {
                sequence,
                bridge,
                normal,
                padding,
                draws,
            } => {
                let quasi = sequence.dimension();
                for (z, &u) in draws.iter_mut().zip(sequence.next_point()) {
                    let u = u.clamp(UNIFORM_CLAMP, 1.0 - UNIFORM_CLAMP);
                    *z = normal.inverse_cdf(u);
                }
                if draws.len() > quasi {
                    padding.fill_normal(&mut draws[quasi..]);
                }
                bridge.transform(draws, increments);
            }
        }
    }
}
