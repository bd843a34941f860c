//! String-typed option description for configuration files.
//!
//! Every string field is parsed eagerly by [`OptionSpec::terms`] and
//! [`OptionSpec::pricing_method`]; an unrecognised value is a validation
//! error raised before any pricing happens.

use pricer_core::types::{Date, PricingError, PricingMethod};
use serde::{Deserialize, Serialize};

use super::error::InstrumentError;
use super::exercise::ExerciseStyle;
use super::payoff::{OptionRight, PayoffKind};
use super::terms::OptionTerms;

fn default_payoff() -> String {
    "vanilla".to_string()
}

fn default_cash() -> f64 {
    1.0
}

fn default_exercise() -> String {
    "european".to_string()
}

fn default_method() -> String {
    PricingMethod::Analytical.name().to_string()
}

/// Option description as written in TOML.
///
/// ```toml
/// asset_name = "ACME"
/// strike = 100.0
/// maturity = "2026-01-01"
/// right = "call"
/// payoff = "vanilla"
/// exercise = "american"
/// earliest_exercise = "2025-01-01"
/// pricing_method = "MONTE_CARLO"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Underlying name
    pub asset_name: String,
    /// Strike price
    pub strike: f64,
    /// Expiry date
    pub maturity: Date,
    /// `"call"` or `"put"`
    pub right: String,
    /// `"vanilla"` or `"binary"`
    #[serde(default = "default_payoff")]
    pub payoff: String,
    /// Amount paid by a binary payoff
    #[serde(default = "default_cash")]
    pub cash: f64,
    /// `"european"`, `"american"` or `"bermudan"`
    #[serde(default = "default_exercise")]
    pub exercise: String,
    /// First exercise date of an American option
    #[serde(default)]
    pub earliest_exercise: Option<Date>,
    /// Exercise dates of a Bermudan option
    #[serde(default)]
    pub exercise_dates: Vec<Date>,
    /// `"ANALYTICAL"`, `"MONTE_CARLO"` or `"BINOMIAL"`
    #[serde(default = "default_method")]
    pub pricing_method: String,
}

impl OptionSpec {
    /// Parses the facet strings and validates the resulting terms.
    pub fn terms(&self) -> Result<OptionTerms, InstrumentError> {
        let right: OptionRight = self.right.parse()?;
        let payoff = PayoffKind::from_name(&self.payoff, self.cash)?;
        let exercise = match self.exercise.trim().to_lowercase().as_str() {
            "european" => ExerciseStyle::European,
            "american" => ExerciseStyle::American {
                earliest_exercise: self
                    .earliest_exercise
                    .ok_or(InstrumentError::MissingField("earliest_exercise"))?,
            },
            "bermudan" => ExerciseStyle::bermudan(self.exercise_dates.clone())?,
            _ => return Err(InstrumentError::UnknownExercise(self.exercise.clone())),
        };
        OptionTerms::new(
            self.asset_name.clone(),
            self.strike,
            self.maturity,
            right,
            payoff,
            exercise,
        )
    }

    /// Parses the pricing method string.
    pub fn pricing_method(&self) -> Result<PricingMethod, PricingError> {
        self.pricing_method.parse()
    }
}
