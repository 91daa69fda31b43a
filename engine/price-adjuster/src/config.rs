//! Configuration for the Price Adjustment Engine

use crate::error::Result;
use crate::tables::{PricingTables, TablesConfig};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Environment variable naming an optional configuration file
pub const CONFIG_PATH_ENV: &str = "PRICE_ADJUSTER_CONFIG";

/// Prefix for environment overrides, e.g. `PRICE_ADJUSTER__TABLES__...`
pub const ENV_PREFIX: &str = "PRICE_ADJUSTER";

/// Configuration for the Price Adjustment Engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjusterConfig {
    /// Lookup tables used by the calculators
    pub tables: TablesConfig,
}

impl AdjusterConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading price adjuster configuration from: {:?}", path);

        let config: AdjusterConfig = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    ///
    /// Uses the file named by `PRICE_ADJUSTER_CONFIG` when set, defaults otherwise.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(&path).with_context(|| {
                format!("failed to load price adjuster configuration from {path}")
            }),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.tables.validate()
    }

    /// Build the immutable runtime tables
    pub fn pricing_tables(&self) -> Result<PricingTables> {
        PricingTables::from_config(self.tables.clone())
    }

    /// Render the configuration as TOML, e.g. to seed a config file
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
