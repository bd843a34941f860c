//! Option contract definitions.
//!
//! An option is the composition of three independent facets instead of a
//! class per combination:
//! - [`OptionRight`]: call or put
//! - [`PayoffKind`]: vanilla or cash-or-nothing
//! - [`ExerciseStyle`]: European, American or Bermudan
//!
//! [`OptionTerms`] validates the combination together with the underlying,
//! strike and maturity. [`TradableOption`] is the engine-facing view built
//! once from the terms. [`OptionSpec`] is the string-typed form read from
//! configuration.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{Date, PricingMethod};
//! use pricer_models::instruments::{
//!     ExerciseStyle, OptionRight, OptionTerms, PayoffKind, TradableOption,
//! };
//!
//! let terms = OptionTerms::new(
//!     "ACME",
//!     100.0,
//!     Date::from_ymd(2026, 1, 1).unwrap(),
//!     OptionRight::Call,
//!     PayoffKind::cash_or_nothing(1.0).unwrap(),
//!     ExerciseStyle::European,
//! )
//! .unwrap();
//! assert!(terms.exercise().supports(PricingMethod::Analytical));
//!
//! let tradable = TradableOption::from(&terms);
//! assert_eq!(tradable.payoff().value(101.0), 1.0);
//! ```

mod error;
mod exercise;
mod payoff;
mod spec;
mod terms;
mod tradable;

pub use error::InstrumentError;
pub use exercise::{ExerciseKind, ExerciseStyle};
pub use payoff::{OptionRight, PayoffKind, PayoffTag};
pub use spec::OptionSpec;
pub use terms::{OptionTerms, OptionVariant};
pub use tradable::{StrikedPayoff, TradableOption};
