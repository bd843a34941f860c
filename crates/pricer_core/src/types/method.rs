//! Pricing method selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::PricingError;

/// Algorithm family used to value an instrument.
///
/// Parsing is case-insensitive and accepts the upper snake case spelling
/// used in configuration files (`"ANALYTICAL"`, `"MONTE_CARLO"`,
/// `"BINOMIAL"`). Anything else is a `PricingError::Validation`.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingMethod;
///
/// let method: PricingMethod = "MONTE_CARLO".parse().unwrap();
/// assert_eq!(method, PricingMethod::MonteCarlo);
/// assert!("Nonsense".parse::<PricingMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingMethod {
    /// Closed-form valuation
    Analytical,
    /// Simulation of the underlying
    MonteCarlo,
    /// Recombining lattice
    Binomial,
}

impl PricingMethod {
    /// Every method, in declaration order.
    pub const ALL: [PricingMethod; 3] = [
        PricingMethod::Analytical,
        PricingMethod::MonteCarlo,
        PricingMethod::Binomial,
    ];

    /// Configuration spelling of the method.
    pub fn name(&self) -> &'static str {
        match self {
            PricingMethod::Analytical => "ANALYTICAL",
            PricingMethod::MonteCarlo => "MONTE_CARLO",
            PricingMethod::Binomial => "BINOMIAL",
        }
    }
}

impl FromStr for PricingMethod {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "ANALYTICAL" => Ok(PricingMethod::Analytical),
            "MONTE_CARLO" | "MONTECARLO" | "MC" => Ok(PricingMethod::MonteCarlo),
            "BINOMIAL" | "LATTICE" => Ok(PricingMethod::Binomial),
            _ => Err(PricingError::Validation(format!(
                "unknown pricing method '{}', expected one of ANALYTICAL, MONTE_CARLO, BINOMIAL",
                s
            ))),
        }
    }
}

impl TryFrom<String> for PricingMethod {
    type Error = PricingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for PricingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
