//! Hedge command implementation
//!
//! Runs the delta-hedging study and prints one line per hedge ratio.

use std::fmt::Write;

use pricer_risk::hedging::{run_hedge_study, HedgeConfig, HedgeStudy};
use tracing::info;

use super::OutputFormat;
use crate::config::AppConfig;
use crate::Result;

/// Command line overrides of the `[hedge]` section.
#[derive(Debug, Clone, Copy, Default)]
pub struct HedgeOverrides {
    pub n_ratios: Option<usize>,
    pub n_shocks: Option<usize>,
    pub seed: Option<u64>,
}

impl HedgeOverrides {
    fn apply(&self, mut config: HedgeConfig) -> HedgeConfig {
        if let Some(n) = self.n_ratios {
            config.n_ratios = n;
        }
        if let Some(n) = self.n_shocks {
            config.n_shocks = n;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config
    }
}

/// Renders the per-ratio rows followed by a summary.
pub fn render(study: &HedgeStudy, format: OutputFormat) -> String {
    let mut out = String::new();
    match format {
        OutputFormat::Table => {
            let _ = writeln!(out, "{:>8} {:>10} {:>8} {:>6}", "ratio", "spearman", "ks", "zone");
            for row in &study.results {
                let _ = writeln!(
                    out,
                    "{:>8.4} {:>10.6} {:>8.4} {:>6}",
                    row.ratio, row.stats.spearman, row.stats.ks, row.zone
                );
            }
            let _ = writeln!(
                out,
                "\nbase call: analytical {:.6}, monte carlo {:.6}; delta {:.4}",
                study.analytical_base, study.monte_carlo_base, study.delta
            );
            if let Some(best) = study.best_by_ks() {
                let (ratio, ks) = (best.ratio, best.stats.ks);
                let _ = writeln!(out, "lowest KS at ratio {ratio:.4} ({ks:.4})");
            }
            let _ = write!(
                out,
                "cache hit rate: analytical {:.1}%, monte carlo {:.1}%",
                100.0 * study.analytical_cache.hit_rate(),
                100.0 * study.monte_carlo_cache.hit_rate()
            );
        }
        OutputFormat::Csv => {
            let _ = write!(out, "ratio,spearman,ks,zone");
            for row in &study.results {
                let _ = write!(
                    out,
                    "\n{},{},{},{}",
                    row.ratio, row.stats.spearman, row.stats.ks, row.zone
                );
            }
        }
    }
    out
}

/// Run the hedge command
pub fn run(config: &AppConfig, overrides: HedgeOverrides, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let hedge = overrides.apply(config.hedge.clone());
    info!(
        spot = hedge.spot,
        strike = hedge.strike,
        volatility = hedge.volatility,
        "Starting hedging study..."
    );
    let study = run_hedge_study(&hedge)?;
    println!("{}", render(&study, format));
    info!("Hedging study complete");
    Ok(())
}
