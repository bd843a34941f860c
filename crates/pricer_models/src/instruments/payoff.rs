//! Option right and payoff kind facets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionRight {
    /// Right to buy
    Call,
    /// Right to sell
    Put,
}

impl OptionRight {
    /// +1 for calls, -1 for puts.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            OptionRight::Call => 1.0,
            OptionRight::Put => -1.0,
        }
    }

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            OptionRight::Call => "call",
            OptionRight::Put => "put",
        }
    }
}

impl FromStr for OptionRight {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionRight::Call),
            "put" => Ok(OptionRight::Put),
            _ => Err(InstrumentError::UnknownRight(s.to_string())),
        }
    }
}

impl fmt::Display for OptionRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payoff shape at exercise.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionRight, PayoffKind};
///
/// let vanilla = PayoffKind::Vanilla;
/// assert_eq!(vanilla.evaluate(OptionRight::Call, 100.0, 110.0), 10.0);
///
/// let binary = PayoffKind::cash_or_nothing(1.0).unwrap();
/// assert_eq!(binary.evaluate(OptionRight::Call, 100.0, 110.0), 1.0);
/// assert_eq!(binary.evaluate(OptionRight::Put, 100.0, 110.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayoffKind {
    /// max(ω(S - K), 0)
    #[default]
    Vanilla,
    /// `cash` when ω(S - K) > 0, else 0
    CashOrNothing {
        /// Amount paid when in the money
        cash: f64,
    },
}

/// Fieldless discriminant of [`PayoffKind`], used for variant equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayoffTag {
    /// Vanilla payoff
    Vanilla,
    /// Cash-or-nothing payoff
    CashOrNothing,
}

impl PayoffKind {
    /// Cash-or-nothing payoff with a validated cash amount.
    pub fn cash_or_nothing(cash: f64) -> Result<Self, InstrumentError> {
        if !cash.is_finite() || cash <= 0.0 {
            return Err(InstrumentError::InvalidCash { cash });
        }
        Ok(PayoffKind::CashOrNothing { cash })
    }

    /// Parses a payoff name. `"binary"` pays `cash`; `cash` is ignored for vanilla.
    pub fn from_name(name: &str, cash: f64) -> Result<Self, InstrumentError> {
        match name.trim().to_lowercase().as_str() {
            "vanilla" => Ok(PayoffKind::Vanilla),
            "binary" | "digital" | "cash_or_nothing" => Self::cash_or_nothing(cash),
            _ => Err(InstrumentError::UnknownPayoff(name.to_string())),
        }
    }

    /// Discriminant without the cash amount.
    pub fn tag(&self) -> PayoffTag {
        match self {
            PayoffKind::Vanilla => PayoffTag::Vanilla,
            PayoffKind::CashOrNothing { .. } => PayoffTag::CashOrNothing,
        }
    }

    /// Payoff at exercise for spot `spot`.
    #[inline]
    pub fn evaluate(&self, right: OptionRight, strike: f64, spot: f64) -> f64 {
        let moneyness = right.sign() * (spot - strike);
        match self {
            PayoffKind::Vanilla => moneyness.max(0.0),
            PayoffKind::CashOrNothing { cash } => {
                if moneyness > 0.0 {
                    *cash
                } else {
                    0.0
                }
            }
        }
    }

    /// Lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            PayoffKind::Vanilla => "vanilla",
            PayoffKind::CashOrNothing { .. } => "binary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_parsing() {
        assert_eq!("call".parse::<OptionRight>().unwrap(), OptionRight::Call);
        assert_eq!("PUT".parse::<OptionRight>().unwrap(), OptionRight::Put);
        assert_eq!(
            "straddle".parse::<OptionRight>().unwrap_err(),
            InstrumentError::UnknownRight("straddle".to_string())
        );
    }

    #[test]
    fn test_vanilla_put_payoff() {
        let p = PayoffKind::Vanilla;
        assert_eq!(p.evaluate(OptionRight::Put, 100.0, 90.0), 10.0);
        assert_eq!(p.evaluate(OptionRight::Put, 100.0, 110.0), 0.0);
    }

    #[test]
    fn test_binary_at_the_money_pays_nothing() {
        let p = PayoffKind::cash_or_nothing(5.0).unwrap();
        assert_eq!(p.evaluate(OptionRight::Call, 100.0, 100.0), 0.0);
        assert_eq!(p.evaluate(OptionRight::Put, 100.0, 99.0), 5.0);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            PayoffKind::from_name("binary", 1.0).unwrap(),
            PayoffKind::CashOrNothing { cash: 1.0 }
        );
        assert_eq!(
            PayoffKind::from_name("Vanilla", 0.0).unwrap(),
            PayoffKind::Vanilla
        );
        assert!(matches!(
            PayoffKind::from_name("asian", 1.0),
            Err(InstrumentError::UnknownPayoff(_))
        ));
        assert!(matches!(
            PayoffKind::from_name("binary", 0.0),
            Err(InstrumentError::InvalidCash { .. })
        ));
    }

    #[test]
    fn test_tag_ignores_cash() {
        let a = PayoffKind::cash_or_nothing(1.0).unwrap();
        let b = PayoffKind::cash_or_nothing(2.0).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.tag(), b.tag());
    }
}
