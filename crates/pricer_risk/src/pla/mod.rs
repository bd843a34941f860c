//! P&L attribution (PLA) statistics.
//!
//! Compares a front-office ("hypothetical") P&L vector with a risk-model
//! ("risk-theoretical") one:
//!
//! - Spearman rank correlation, ties ranked by their average position
//! - Two-sample Kolmogorov-Smirnov statistic, the largest gap between the
//!   two empirical distribution functions
//!
//! [`PlaZone`] buckets a result with the FRTB thresholds: green needs a
//! correlation above 0.80 and a KS below 0.09, red is a correlation below
//! 0.70 or a KS above 0.12.

use std::fmt;

use pricer_core::types::PricingError;
use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics, RankTieBreaker, Statistics};
use thiserror::Error;
use tracing::info;

/// Invalid PLA inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaError {
    /// One of the P&L vectors has no observation.
    #[error("PLA inputs must not be empty")]
    Empty,

    /// Rank correlation needs paired observations.
    #[error("PLA inputs differ in length: {hypothetical} vs {risk_theoretical}")]
    LengthMismatch {
        /// Length of the front-office vector.
        hypothetical: usize,
        /// Length of the risk-model vector.
        risk_theoretical: usize,
    },

    /// NaN or infinite observation.
    #[error("PLA inputs must be finite")]
    NonFinite,
}

impl From<PlaError> for PricingError {
    fn from(err: PlaError) -> Self {
        PricingError::Validation(err.to_string())
    }
}

/// Regulatory traffic-light bucket of a PLA result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaZone {
    /// Correlation > 0.80 and KS < 0.09.
    Green,
    /// Neither green nor red.
    Amber,
    /// Correlation < 0.70 (or undefined) or KS > 0.12.
    Red,
}

impl PlaZone {
    /// Classifies a (Spearman, KS) pair.
    pub fn classify(spearman: f64, ks: f64) -> Self {
        if spearman.is_nan() || spearman < 0.70 || ks > 0.12 {
            PlaZone::Red
        } else if spearman > 0.80 && ks < 0.09 {
            PlaZone::Green
        } else {
            PlaZone::Amber
        }
    }
}

impl fmt::Display for PlaZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaZone::Green => "green",
            PlaZone::Amber => "amber",
            PlaZone::Red => "red",
        };
        f.write_str(name)
    }
}

/// Spearman correlation and KS statistic of a P&L pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlaStats {
    /// Spearman rank correlation; NaN when either vector is constant.
    pub spearman: f64,
    /// Two-sample Kolmogorov-Smirnov statistic in [0, 1].
    pub ks: f64,
}

impl PlaStats {
    /// Traffic-light bucket.
    pub fn zone(&self) -> PlaZone {
        PlaZone::classify(self.spearman, self.ks)
    }
}

/// Computes the PLA statistics of two paired P&L vectors.
///
/// # Examples
///
/// ```
/// use pricer_risk::pla::pla_stats;
///
/// let pnl = [1.0, -2.0, 0.5, 3.0];
/// let stats = pla_stats(&pnl, &pnl).unwrap();
/// assert_eq!((stats.spearman, stats.ks), (1.0, 0.0));
/// ```
pub fn pla_stats(hypothetical: &[f64], risk_theoretical: &[f64]) -> Result<PlaStats, PlaError> {
    info!(
        hypothetical = hypothetical.len(),
        risk_theoretical = risk_theoretical.len(),
        "calculating PLA statistics"
    );
    Ok(PlaStats {
        spearman: spearman_correlation(hypothetical, risk_theoretical)?,
        ks: ks_statistic(hypothetical, risk_theoretical)?,
    })
}

/// Spearman rank correlation of paired samples.
pub fn spearman_correlation(x: &[f64], y: &[f64]) -> Result<f64, PlaError> {
    check_sample(x)?;
    check_sample(y)?;
    if x.len() != y.len() {
        return Err(PlaError::LengthMismatch {
            hypothetical: x.len(),
            risk_theoretical: y.len(),
        });
    }
    if x.len() < 2 {
        return Ok(f64::NAN);
    }
    let rx = Data::new(x.to_vec()).ranks(RankTieBreaker::Average);
    let ry = Data::new(y.to_vec()).ranks(RankTieBreaker::Average);
    let denominator = rx.iter().std_dev() * ry.iter().std_dev();
    if denominator == 0.0 {
        return Ok(f64::NAN);
    }
    Ok(rx.iter().covariance(ry.iter()) / denominator)
}

/// Two-sample Kolmogorov-Smirnov statistic.
///
/// Samples may differ in length.
pub fn ks_statistic(x: &[f64], y: &[f64]) -> Result<f64, PlaError> {
    check_sample(x)?;
    check_sample(y)?;
    let a = sorted(x);
    let b = sorted(y);
    let (n, m) = (a.len() as f64, b.len() as f64);

    let (mut i, mut j) = (0, 0);
    let mut statistic: f64 = 0.0;
    while i < a.len() && j < b.len() {
        let level = a[i].min(b[j]);
        while i < a.len() && a[i] <= level {
            i += 1;
        }
        while j < b.len() && b[j] <= level {
            j += 1;
        }
        statistic = statistic.max((i as f64 / n - j as f64 / m).abs());
    }
    Ok(statistic)
}

fn check_sample(sample: &[f64]) -> Result<(), PlaError> {
    if sample.is_empty() {
        return Err(PlaError::Empty);
    }
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(PlaError::NonFinite);
    }
    Ok(())
}

fn sorted(sample: &[f64]) -> Vec<f64> {
    let mut values = sample.to_vec();
    values.sort_by(f64::total_cmp);
    values
}
