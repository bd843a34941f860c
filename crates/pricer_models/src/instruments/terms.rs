//! Contract terms shared by every option variant.

use pricer_core::types::Date;

use super::error::InstrumentError;
use super::exercise::{ExerciseKind, ExerciseStyle};
use super::payoff::{OptionRight, PayoffKind, PayoffTag};

/// Facet combination of an option, without any dates or amounts.
///
/// Two options with the same terms and the same variant are the same
/// contract for equality purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionVariant {
    /// Call or put
    pub right: OptionRight,
    /// Payoff shape
    pub payoff: PayoffTag,
    /// Exercise style
    pub exercise: ExerciseKind,
}

/// Validated option contract terms.
///
/// # Examples
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{ExerciseStyle, OptionRight, OptionTerms, PayoffKind};
///
/// let terms = OptionTerms::new(
///     "ACME",
///     100.0,
///     Date::from_ymd(2026, 1, 1).unwrap(),
///     OptionRight::Call,
///     PayoffKind::Vanilla,
///     ExerciseStyle::European,
/// )
/// .unwrap();
/// assert_eq!(terms.strike(), 100.0);
///
/// let invalid = OptionTerms::new(
///     "ACME",
///     -1.0,
///     Date::from_ymd(2026, 1, 1).unwrap(),
///     OptionRight::Call,
///     PayoffKind::Vanilla,
///     ExerciseStyle::European,
/// );
/// assert!(invalid.is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptionTerms {
    asset_name: String,
    strike: f64,
    maturity: Date,
    right: OptionRight,
    payoff: PayoffKind,
    exercise: ExerciseStyle,
}

impl OptionTerms {
    /// Validates and assembles contract terms.
    pub fn new(
        asset_name: impl Into<String>,
        strike: f64,
        maturity: Date,
        right: OptionRight,
        payoff: PayoffKind,
        exercise: ExerciseStyle,
    ) -> Result<Self, InstrumentError> {
        let asset_name = asset_name.into();
        if asset_name.is_empty() {
            return Err(InstrumentError::EmptyAssetName);
        }
        if !strike.is_finite() || strike <= 0.0 {
            return Err(InstrumentError::InvalidStrike { strike });
        }
        if let PayoffKind::CashOrNothing { cash } = payoff {
            PayoffKind::cash_or_nothing(cash)?;
        }
        exercise.validate_against(maturity)?;
        Ok(Self {
            asset_name,
            strike,
            maturity,
            right,
            payoff,
            exercise,
        })
    }

    /// Underlying name.
    pub fn asset_name(&self) -> &str {
        &self.asset_name
    }

    /// Strike price.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Expiry date.
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Call or put.
    pub fn right(&self) -> OptionRight {
        self.right
    }

    /// Payoff kind.
    pub fn payoff(&self) -> PayoffKind {
        self.payoff
    }

    /// Exercise style.
    pub fn exercise(&self) -> &ExerciseStyle {
        &self.exercise
    }

    /// Facet combination.
    pub fn variant(&self) -> OptionVariant {
        OptionVariant {
            right: self.right,
            payoff: self.payoff.tag(),
            exercise: self.exercise.kind(),
        }
    }

    /// Same contract: asset, strike and maturity match and the variant is the same.
    pub fn same_contract(&self, other: &OptionTerms) -> bool {
        self.asset_name == other.asset_name
            && self.strike == other.strike
            && self.maturity == other.maturity
            && self.variant() == other.variant()
    }
}
