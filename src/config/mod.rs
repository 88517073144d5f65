use crate::core::{PricingError, Result};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub mod fiscal;
pub mod reference_api;

pub use fiscal::{DiscountPolicy, FiscalConfig, IgtfPolicy};
pub use reference_api::ReferenceApiConfig;

/// Key/value source used while loading configuration
pub(crate) type Lookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Main configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub fiscal: FiscalConfig,
    #[serde(default)]
    pub reference_api: ReferenceApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            env: "development".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(&|key: &str| env::var(key).ok())
    }

    /// Load configuration from a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| PricingError::configuration(format!("Invalid YAML configuration: {}", e)))
    }

    pub(crate) fn from_lookup(lookup: &Lookup<'_>) -> Result<Self> {
        Ok(Config {
            app: AppConfig {
                env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            },
            logging: LoggingConfig {
                level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                format: parse_or(lookup, "LOG_FORMAT", LogFormat::Pretty)?,
            },
            fiscal: FiscalConfig::from_lookup(lookup)?,
            reference_api: ReferenceApiConfig::from_lookup(lookup)?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.fiscal.validate()?;
        self.reference_api.validate()?;

        Ok(())
    }
}

/// Parse `key` with `FromStr`, falling back to `default` when unset
pub(crate) fn parse_or<T: FromStr>(lookup: &Lookup<'_>, key: &str, default: T) -> Result<T> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| PricingError::configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}
