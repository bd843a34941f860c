//! optcache - option valuation with per-instrument caching
//!
//! # Commands
//!
//! - `optcache price` - Price the configured option against the configured
//!   market snapshot
//! - `optcache hedge` - Run the delta-hedging study and print PLA statistics
//!   per hedge ratio
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires configuration and
//! logging to the pricing (L3) and risk (L4) layers.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

/// Config file read when `--config` is not given.
const DEFAULT_CONFIG: &str = "optcache.toml";

/// Option valuation and hedging CLI
#[derive(Parser)]
#[command(name = "optcache")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to optcache.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the configured option
    Price {
        /// Override the pricing method (ANALYTICAL, MONTE_CARLO, BINOMIAL)
        #[arg(short, long)]
        method: Option<String>,

        /// Output format (table, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Run the hedging study
    Hedge {
        /// Number of hedge ratios
        #[arg(long)]
        n_ratios: Option<usize>,

        /// Number of shocked scenarios
        #[arg(long)]
        n_shocks: Option<usize>,

        /// Shock generator seed
        #[arg(long)]
        seed: Option<u64>,

        /// Output format (table, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        Some(path) => path.clone(),
        None => PathBuf::from(DEFAULT_CONFIG),
    };
    let config = config::load(&path)?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_filter_str()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    info!(
        config = %path.display(),
        from_file = path.exists(),
        "configuration loaded"
    );

    match cli.command {
        Commands::Price { method, format } => {
            commands::price::run(&config, method.as_deref(), &format)
        }
        Commands::Hedge {
            n_ratios,
            n_shocks,
            seed,
            format,
        } => commands::hedge::run(
            &config,
            commands::hedge::HedgeOverrides {
                n_ratios,
                n_shocks,
                seed,
            },
            &format,
        ),
    }
}
