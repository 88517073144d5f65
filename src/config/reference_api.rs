use serde::Deserialize;
use std::time::Duration;

use crate::core::{PricingError, Result};

use super::{parse_or, Lookup};

/// Reference-price (exchange rate) API client settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceApiConfig {
    /// Unset disables REF pricing; sessions fall back to legacy totals
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_max_retries() -> u32 {
    2
}

impl Default for ReferenceApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl ReferenceApiConfig {
    pub(crate) fn from_lookup(lookup: &Lookup<'_>) -> Result<Self> {
        Ok(ReferenceApiConfig {
            base_url: lookup("REFERENCE_API_BASE_URL").filter(|v| !v.trim().is_empty()),
            api_key: lookup("REFERENCE_API_KEY").filter(|v| !v.trim().is_empty()),
            timeout_secs: parse_or(lookup, "REFERENCE_API_TIMEOUT_SECS", default_timeout_secs())?,
            max_retries: parse_or(lookup, "REFERENCE_API_MAX_RETRIES", default_max_retries())?,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(PricingError::configuration(
                "Reference API timeout must be greater than 0",
            ));
        }

        if let Some(url) = &self.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(PricingError::configuration(format!(
                    "Reference API base URL must be http(s): {}",
                    url
                )));
            }
        }

        Ok(())
    }
}
