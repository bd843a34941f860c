//! Price command implementation
//!
//! Prices the configured option against the configured market snapshot.

use pricer_core::types::PricingMethod;
use pricer_pricing::instruments::OptionInstrument;
use tracing::info;

use super::OutputFormat;
use crate::config::AppConfig;
use crate::{CliError, Result};

/// One priced option.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceReport {
    pub asset_name: String,
    pub exercise: String,
    pub method: PricingMethod,
    pub engine: &'static str,
    pub price: f64,
}

/// Prices `config.option`, optionally forcing a pricing method.
pub fn price(config: &AppConfig, method: Option<PricingMethod>) -> Result<PriceReport> {
    let spec = config.option.as_ref().ok_or_else(|| {
        CliError::InvalidArgument("no [option] section in the configuration".to_string())
    })?;
    let mut builder = OptionInstrument::builder_from_spec(spec)?
        .mc_params(config.mc)
        .lattice_steps(config.lattice_steps)
        .cache_policy(config.cache);
    if let Some(method) = method {
        builder = builder.pricing_method(method);
    }
    let option = builder.build()?;
    let market = config.market.to_store();

    info!(
        asset = spec.asset_name.as_str(),
        method = option.pricing_method().name(),
        engine = option.engine().name(),
        valuation_date = %market.valuation_date(),
        "pricing option"
    );
    let price = option.price(&market)?;

    Ok(PriceReport {
        asset_name: spec.asset_name.clone(),
        exercise: option.terms().exercise().name().to_string(),
        method: option.pricing_method(),
        engine: option.engine().name(),
        price,
    })
}

/// Renders a report.
pub fn render(report: &PriceReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Table => format!(
            "{:<10} {:<10} {:<12} {:<20} {:>14}\n{:<10} {:<10} {:<12} {:<20} {:>14.6}",
            "asset",
            "exercise",
            "method",
            "engine",
            "price",
            report.asset_name,
            report.exercise,
            report.method.name(),
            report.engine,
            report.price
        ),
        OutputFormat::Csv => format!(
            "asset,exercise,method,engine,price\n{},{},{},{},{}",
            report.asset_name,
            report.exercise,
            report.method.name(),
            report.engine,
            report.price
        ),
    }
}

/// Run the price command
pub fn run(config: &AppConfig, method: Option<&str>, format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let method = method.map(str::parse::<PricingMethod>).transpose()?;
    let report = price(config, method)?;
    println!("{}", render(&report, format));
    info!("Pricing complete");
    Ok(())
}
