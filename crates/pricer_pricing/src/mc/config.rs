//! Monte Carlo simulation parameters.
//!
//! [`McParams`] carries the number of time steps and paths, the normal
//! increment source and the seed. It is part of an instrument's
//! configuration, so it deserialises from TOML with every field optional.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::rng::RngKind;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Maximum number of spot values held when every path is stored
/// (`num_paths × (steps + 1)`), as early-exercise pricing does.
pub const MAX_STORED_PATH_VALUES: usize = 100_000_000;

/// Default number of time steps.
pub const DEFAULT_STEPS: usize = 100;

/// Default number of paths.
pub const DEFAULT_NUM_PATHS: usize = 10_000;

/// Default seed.
pub const DEFAULT_SEED: u64 = 42;

/// Monte Carlo simulation parameters.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::McParams;
/// use pricer_pricing::rng::RngKind;
///
/// let params = McParams::builder()
///     .steps(252)
///     .num_paths(50_000)
///     .rng_kind(RngKind::LowDiscrepancy)
///     .build()
///     .expect("valid parameters");
///
/// assert_eq!(params.steps, 252);
/// assert_eq!(McParams::default().num_paths, 10_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct McParams {
    /// Number of time steps per path.
    pub steps: usize,
    /// Number of simulated paths.
    pub num_paths: usize,
    /// Normal increment source.
    pub rng_kind: RngKind,
    /// Seed for the pseudo-random source.
    pub seed: u64,
}

impl Default for McParams {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            num_paths: DEFAULT_NUM_PATHS,
            rng_kind: RngKind::PseudoRandom,
            seed: DEFAULT_SEED,
        }
    }
}

impl McParams {
    /// Creates a new parameter builder starting from the defaults.
    #[inline]
    pub fn builder() -> McParamsBuilder {
        McParamsBuilder::default()
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `num_paths` is 0 or greater than 10,000,000
    /// - `steps` is 0 or greater than 10,000
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_paths == 0 || self.num_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.num_paths));
        }
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.steps));
        }
        Ok(())
    }

    /// Validates the parameters for a run that keeps the whole path grid in
    /// memory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if [`validate`](Self::validate) fails or the grid
    /// holds more than [`MAX_STORED_PATH_VALUES`] values.
    pub fn validate_stored_paths(&self) -> Result<(), ConfigError> {
        self.validate()?;
        let values = self
            .steps
            .checked_add(1)
            .and_then(|stride| stride.checked_mul(self.num_paths));
        match values {
            Some(values) if values <= MAX_STORED_PATH_VALUES => Ok(()),
            _ => Err(ConfigError::PathGridTooLarge {
                num_paths: self.num_paths,
                steps: self.steps,
                limit: MAX_STORED_PATH_VALUES,
            }),
        }
    }
}

/// Builder for [`McParams`] with validation at build time.
#[derive(Clone, Debug, Default)]
pub struct McParamsBuilder {
    params: McParams,
}

impl McParamsBuilder {
    /// Sets the number of time steps per path.
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.params.steps = steps;
        self
    }

    /// Sets the number of simulated paths.
    #[inline]
    pub fn num_paths(mut self, num_paths: usize) -> Self {
        self.params.num_paths = num_paths;
        self
    }

    /// Sets the normal increment source.
    #[inline]
    pub fn rng_kind(mut self, rng_kind: RngKind) -> Self {
        self.params.rng_kind = rng_kind;
        self
    }

    /// Sets the seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }

    /// Builds and validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build(self) -> Result<McParams, ConfigError> {
        self.params.validate()?;
        Ok(self.params)
    }
}
