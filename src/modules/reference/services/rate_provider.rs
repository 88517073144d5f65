use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::core::{PricingError, Result};
use crate::modules::reference::models::ExchangeRate;

/// Source of daily reference exchange rates
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Rate in force on `date`; fails with `ExchangeRateUnavailable`
    async fn rate_for(&self, date: NaiveDate) -> Result<ExchangeRate>;

    /// Provider name for logs
    fn name(&self) -> &str;
}

/// In-memory provider, used offline and in tests.
///
/// Returns the latest rate published on or before the requested date.
#[derive(Debug, Default)]
pub struct StaticRateProvider {
    rates: RwLock<BTreeMap<NaiveDate, ExchangeRate>>,
}

impl StaticRateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(rate: ExchangeRate) -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(rate.rate_date, rate);
        Self {
            rates: RwLock::new(rates),
        }
    }

    pub async fn publish(&self, rate: ExchangeRate) {
        self.rates.write().await.insert(rate.rate_date, rate);
    }
}

#[async_trait]
impl ExchangeRateProvider for StaticRateProvider {
    async fn rate_for(&self, date: NaiveDate) -> Result<ExchangeRate> {
        self.rates
            .read()
            .await
            .range(..=date)
            .next_back()
            .map(|(_, rate)| rate.clone())
            .ok_or_else(|| {
                PricingError::rate_unavailable(format!("No reference rate published by {}", date))
            })
    }

    fn name(&self) -> &str {
        "static"
    }
}
