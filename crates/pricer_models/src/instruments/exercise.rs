//! Exercise style facet and the pricing methods each style admits.

use pricer_core::types::{Date, PricingMethod};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::InstrumentError;

/// When the holder may exercise.
///
/// # Examples
/// ```
/// use pricer_core::types::{Date, PricingMethod};
/// use pricer_models::instruments::ExerciseStyle;
///
/// let american = ExerciseStyle::American {
///     earliest_exercise: Date::from_ymd(2025, 1, 1).unwrap(),
/// };
/// assert!(!american.supports(PricingMethod::Analytical));
/// assert!(american.supports(PricingMethod::MonteCarlo));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum ExerciseStyle {
    /// Exercise at maturity only
    European,
    /// Exercise on any date from `earliest_exercise` up to maturity
    American {
        /// First date exercise is allowed
        earliest_exercise: Date,
    },
    /// Exercise on a discrete set of dates
    Bermudan {
        /// Ascending, de-duplicated exercise dates
        exercise_dates: Vec<Date>,
    },
}

/// Fieldless discriminant of [`ExerciseStyle`], used for variant equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseKind {
    /// European
    European,
    /// American
    American,
    /// Bermudan
    Bermudan,
}

const EUROPEAN_METHODS: &[PricingMethod] = &[
    PricingMethod::Analytical,
    PricingMethod::MonteCarlo,
    PricingMethod::Binomial,
];

const EARLY_EXERCISE_METHODS: &[PricingMethod] =
    &[PricingMethod::MonteCarlo, PricingMethod::Binomial];

impl ExerciseStyle {
    /// Bermudan style from an arbitrary list of dates. Sorts and de-duplicates.
    pub fn bermudan(mut exercise_dates: Vec<Date>) -> Result<Self, InstrumentError> {
        if exercise_dates.is_empty() {
            return Err(InstrumentError::EmptyExerciseSchedule);
        }
        exercise_dates.sort();
        exercise_dates.dedup();
        Ok(ExerciseStyle::Bermudan { exercise_dates })
    }

    /// Methods an engine exists for under this style.
    pub fn valid_pricing_methods(&self) -> &'static [PricingMethod] {
        match self {
            ExerciseStyle::European => EUROPEAN_METHODS,
            ExerciseStyle::American { .. } | ExerciseStyle::Bermudan { .. } => {
                EARLY_EXERCISE_METHODS
            }
        }
    }

    /// Whether `method` is in [`valid_pricing_methods`](Self::valid_pricing_methods).
    pub fn supports(&self, method: PricingMethod) -> bool {
        self.valid_pricing_methods().contains(&method)
    }

    /// True for styles that allow exercise before maturity.
    pub fn is_early_exercise(&self) -> bool {
        !matches!(self, ExerciseStyle::European)
    }

    /// Discriminant without dates.
    pub fn kind(&self) -> ExerciseKind {
        match self {
            ExerciseStyle::European => ExerciseKind::European,
            ExerciseStyle::American { .. } => ExerciseKind::American,
            ExerciseStyle::Bermudan { .. } => ExerciseKind::Bermudan,
        }
    }

    /// Title-case name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ExerciseStyle::European => "European",
            ExerciseStyle::American { .. } => "American",
            ExerciseStyle::Bermudan { .. } => "Bermudan",
        }
    }

    /// Checks that the schedule is non-empty and no exercise date falls after `maturity`.
    pub fn validate_against(&self, maturity: Date) -> Result<(), InstrumentError> {
        if matches!(self, ExerciseStyle::Bermudan { exercise_dates } if exercise_dates.is_empty()) {
            return Err(InstrumentError::EmptyExerciseSchedule);
        }
        let late = match self {
            ExerciseStyle::European => None,
            ExerciseStyle::American { earliest_exercise } => {
                Some(*earliest_exercise).filter(|d| *d > maturity)
            }
            ExerciseStyle::Bermudan { exercise_dates } => {
                exercise_dates.iter().copied().find(|d| *d > maturity)
            }
        };
        match late {
            Some(date) => Err(InstrumentError::ExerciseAfterMaturity { date, maturity }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_valid_methods() {
        assert_eq!(
            ExerciseStyle::European.valid_pricing_methods(),
            &PricingMethod::ALL
        );
        let bermudan = ExerciseStyle::bermudan(vec![d(2025, 6, 1)]).unwrap();
        assert!(!bermudan.supports(PricingMethod::Analytical));
        assert!(bermudan.supports(PricingMethod::Binomial));
    }

    #[test]
    fn test_bermudan_sorts_and_dedups() {
        let style =
            ExerciseStyle::bermudan(vec![d(2025, 9, 1), d(2025, 3, 1), d(2025, 9, 1)]).unwrap();
        assert_eq!(
            style,
            ExerciseStyle::Bermudan {
                exercise_dates: vec![d(2025, 3, 1), d(2025, 9, 1)]
            }
        );
        assert_eq!(
            ExerciseStyle::bermudan(vec![]).unwrap_err(),
            InstrumentError::EmptyExerciseSchedule
        );
    }

    #[test]
    fn test_exercise_after_maturity_rejected() {
        let style = ExerciseStyle::American {
            earliest_exercise: d(2027, 1, 1),
        };
        assert_eq!(
            style.validate_against(d(2026, 1, 1)).unwrap_err(),
            InstrumentError::ExerciseAfterMaturity {
                date: d(2027, 1, 1),
                maturity: d(2026, 1, 1)
            }
        );
        assert!(ExerciseStyle::European
            .validate_against(d(2026, 1, 1))
            .is_ok());
    }

    #[test]
    fn test_kind_ignores_dates() {
        let a = ExerciseStyle::American {
            earliest_exercise: d(2025, 1, 1),
        };
        let b = ExerciseStyle::American {
            earliest_exercise: d(2025, 2, 1),
        };
        assert_ne!(a, b);
        assert_eq!(a.kind(), b.kind());
        assert!(a.is_early_exercise());
        assert!(!ExerciseStyle::European.is_early_exercise());
    }
}
