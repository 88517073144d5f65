use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use tracing::{error, info};

use super::rate_provider::ExchangeRateProvider;
use crate::config::ReferenceApiConfig;
use crate::core::{PricingError, Result};
use crate::modules::reference::models::ExchangeRate;

/// Reference-price API client
///
/// `GET {base_url}/reference-prices?date=YYYY-MM-DD`
pub struct ReferencePriceClient {
    client: ClientWithMiddleware,
    base_url: String,
    api_key: Option<String>,
}

impl ReferencePriceClient {
    pub fn new(config: &ReferenceApiConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| PricingError::configuration("REFERENCE_API_BASE_URL not set"))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);

        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn fetch(&self, date: NaiveDate) -> Result<ExchangeRate> {
        let url = format!("{}/reference-prices", self.base_url);

        let mut request = self
            .client
            .get(&url)
            .query(&[("date", date.format("%Y-%m-%d").to_string())]);

        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PricingError::rate_unavailable(format!("Reference API error: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PricingError::rate_unavailable(format!(
                "Reference API error {}: {}",
                status, body
            )));
        }

        let rate: ExchangeRate = response.json().await.map_err(|e| {
            PricingError::rate_unavailable(format!("Failed to parse reference API response: {}", e))
        })?;

        if rate.exchange_rate <= rust_decimal::Decimal::ZERO {
            return Err(PricingError::rate_unavailable(format!(
                "Reference API returned non-positive rate for {}",
                date
            )));
        }

        Ok(rate)
    }
}

#[async_trait]
impl ExchangeRateProvider for ReferencePriceClient {
    async fn rate_for(&self, date: NaiveDate) -> Result<ExchangeRate> {
        match self.fetch(date).await {
            Ok(rate) => {
                info!(
                    provider = self.name(),
                    date = %date,
                    rate = %rate.exchange_rate,
                    rate_date = %rate.rate_date,
                    "Fetched reference rate"
                );
                Ok(rate)
            }
            Err(e) => {
                error!(provider = self.name(), date = %date, error = %e, "Reference rate lookup failed");
                Err(e)
            }
        }
    }

    fn name(&self) -> &str {
        "reference-api"
    }
}
