//! Engine-facing view of an option contract.
//!
//! `TradableOption` is built once per instrument from its terms and then
//! handed to every engine evaluation; only the process description varies
//! from call to call.

use pricer_core::types::Date;

use super::exercise::ExerciseStyle;
use super::payoff::{OptionRight, PayoffKind};
use super::terms::OptionTerms;

/// Payoff with its strike attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikedPayoff {
    right: OptionRight,
    kind: PayoffKind,
    strike: f64,
}

impl StrikedPayoff {
    /// Assembles a payoff; arguments are assumed validated by [`OptionTerms`].
    pub fn new(right: OptionRight, kind: PayoffKind, strike: f64) -> Self {
        Self {
            right,
            kind,
            strike,
        }
    }

    /// Call or put.
    #[inline]
    pub fn right(&self) -> OptionRight {
        self.right
    }

    /// Payoff shape.
    #[inline]
    pub fn kind(&self) -> PayoffKind {
        self.kind
    }

    /// Strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Exercise value at `spot`.
    #[inline]
    pub fn value(&self, spot: f64) -> f64 {
        self.kind.evaluate(self.right, self.strike, spot)
    }
}

/// Payoff plus exercise schedule, ready for an engine.
#[derive(Debug, Clone, PartialEq)]
pub struct TradableOption {
    payoff: StrikedPayoff,
    exercise: ExerciseStyle,
    maturity: Date,
}

impl TradableOption {
    /// Builds the engine view of `terms`.
    pub fn from_terms(terms: &OptionTerms) -> Self {
        Self {
            payoff: StrikedPayoff::new(terms.right(), terms.payoff(), terms.strike()),
            exercise: terms.exercise().clone(),
            maturity: terms.maturity(),
        }
    }

    /// Striked payoff.
    pub fn payoff(&self) -> &StrikedPayoff {
        &self.payoff
    }

    /// Exercise schedule.
    pub fn exercise(&self) -> &ExerciseStyle {
        &self.exercise
    }

    /// Expiry date.
    pub fn maturity(&self) -> Date {
        self.maturity
    }
}

impl From<&OptionTerms> for TradableOption {
    fn from(terms: &OptionTerms) -> Self {
        Self::from_terms(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_terms_copies_facets() {
        let maturity = Date::from_ymd(2026, 1, 1).unwrap();
        let terms = OptionTerms::new(
            "ACME",
            95.0,
            maturity,
            OptionRight::Put,
            PayoffKind::Vanilla,
            ExerciseStyle::European,
        )
        .unwrap();
        let tradable = TradableOption::from(&terms);
        assert_eq!(tradable.payoff().strike(), 95.0);
        assert_eq!(tradable.payoff().right(), OptionRight::Put);
        assert_eq!(tradable.payoff().value(90.0), 5.0);
        assert_eq!(tradable.maturity(), maturity);
        assert_eq!(tradable.exercise(), &ExerciseStyle::European);
    }
}
