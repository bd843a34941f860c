//! CLI configuration management
//!
//! Priority (highest to lowest):
//! 1. Environment variables (`OPTCACHE_LOG_LEVEL`, `OPTCACHE_NUM_PATHS`,
//!    `OPTCACHE_SEED`)
//! 2. TOML config file
//! 3. Default values
//!
//! ```toml
//! log_level = "debug"
//! lattice_steps = 400
//!
//! [market]
//! scenario_date = "2025-01-01"
//!
//! [[market.assets]]
//! kind = "equity"
//! asset_name = "ACME"
//! spot = 100.0
//! volatility = 0.2
//!
//! [[market.assets]]
//! kind = "interest_rate"
//! asset_name = "rfr"
//! interest_rate = 0.05
//!
//! [option]
//! asset_name = "ACME"
//! strike = 100.0
//! maturity = "2026-01-01"
//! right = "put"
//! exercise = "american"
//! earliest_exercise = "2025-01-01"
//! pricing_method = "BINOMIAL"
//!
//! [mc]
//! num_paths = 50000
//!
//! [cache]
//! policy = "lru"
//! capacity = 1024
//!
//! [hedge]
//! n_ratios = 10
//! ```

use std::path::Path;
use std::str::FromStr;

use pricer_core::market_data::{AssetMarketData, MarketDataStore};
use pricer_core::types::{Date, PricingMethod};
use pricer_models::instruments::OptionSpec;
use pricer_pricing::cache::CachePolicy;
use pricer_pricing::lattice::{BinomialTree, DEFAULT_LATTICE_STEPS};
use pricer_pricing::mc::McParams;
use pricer_risk::hedging::HedgeConfig;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding `log_level`.
pub const ENV_LOG_LEVEL: &str = "OPTCACHE_LOG_LEVEL";
/// Environment variable overriding the Monte Carlo path count.
pub const ENV_NUM_PATHS: &str = "OPTCACHE_NUM_PATHS";
/// Environment variable overriding the Monte Carlo seed.
pub const ENV_SEED: &str = "OPTCACHE_SEED";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {name}={value}")]
    EnvError { name: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Log levels accepted by `log_level`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn default_lattice_steps() -> usize {
    DEFAULT_LATTICE_STEPS
}

/// `[market]` section: records loaded into the snapshot.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarketConfig {
    /// Valuation date; today when absent.
    pub scenario_date: Option<Date>,
    /// Equity and rate records.
    pub assets: Vec<AssetMarketData>,
}

impl MarketConfig {
    /// Builds the market snapshot.
    pub fn to_store(&self) -> MarketDataStore {
        let mut store = match self.scenario_date {
            Some(date) => MarketDataStore::with_scenario_date(date),
            None => MarketDataStore::new(),
        };
        store.add_all(self.assets.iter().cloned());
        store
    }
}

/// Full `optcache` configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Log level used when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Market snapshot of the `price` command
    pub market: MarketConfig,
    /// Option priced by the `price` command
    pub option: Option<OptionSpec>,
    /// Monte Carlo parameters of the `price` command
    pub mc: McParams,
    /// Lattice depth of the `price` command
    #[serde(default = "default_lattice_steps")]
    pub lattice_steps: usize,
    /// Cache policy of the priced option
    pub cache: CachePolicy,
    /// Hedging study inputs of the `hedge` command
    pub hedge: HedgeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            market: MarketConfig::default(),
            option: None,
            mc: McParams::default(),
            lattice_steps: DEFAULT_LATTICE_STEPS,
            cache: CachePolicy::default(),
            hedge: HedgeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parses a TOML document and validates it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// The path count and seed apply to both the `price` and `hedge`
    /// Monte Carlo parameters.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(value) = lookup(ENV_NUM_PATHS) {
            let num_paths = value.trim().parse().map_err(|_| ConfigError::EnvError {
                name: ENV_NUM_PATHS,
                value: value.clone(),
            })?;
            self.mc.num_paths = num_paths;
            self.hedge.mc.num_paths = num_paths;
        }
        if let Some(value) = lookup(ENV_SEED) {
            let seed = value.trim().parse().map_err(|_| ConfigError::EnvError {
                name: ENV_SEED,
                value: value.clone(),
            })?;
            self.mc.seed = seed;
            self.hedge.mc.seed = seed;
        }
        self.validate()
    }

    /// Applies overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mc
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("[mc] {}", e)))?;
        BinomialTree::new(self.lattice_steps).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if let Some(option) = &self.option {
            let terms = option
                .terms()
                .map_err(|e| ConfigError::Invalid(format!("[option] {}", e)))?;
            let method = option
                .pricing_method()
                .map_err(|e| ConfigError::Invalid(format!("[option] {}", e)))?;
            if method == PricingMethod::MonteCarlo && terms.exercise().is_early_exercise() {
                self.mc
                    .validate_stored_paths()
                    .map_err(|e| ConfigError::Invalid(format!("[mc] {}", e)))?;
            }
        }
        self.hedge
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("[hedge] {}", e)))?;
        Ok(())
    }
}

/// Loads the configuration for `path`.
///
/// A missing file at the default location yields defaults; a missing file
/// that was asked for explicitly is an error reported by the caller.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let mut config = if path.exists() {
        AppConfig::from_file(path)?
    } else {
        AppConfig::default()
    };
    config.apply_env()?;
    Ok(config)
}
