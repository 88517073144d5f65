use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::{Currency, PricingError, Result};

/// Daily reference rate: local currency units per one USD.
///
/// `cross_rates` carries units-per-USD for third currencies so that any
/// conversion goes through the USD anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub exchange_rate: Decimal,
    pub rate_date: NaiveDate,
    #[serde(default)]
    pub cross_rates: HashMap<Currency, Decimal>,
}

impl ExchangeRate {
    pub fn new(exchange_rate: Decimal, rate_date: NaiveDate) -> Self {
        Self {
            exchange_rate,
            rate_date,
            cross_rates: HashMap::new(),
        }
    }

    pub fn with_cross_rate(mut self, currency: Currency, units_per_usd: Decimal) -> Self {
        self.cross_rates.insert(currency, units_per_usd);
        self
    }

    /// Units of `currency` per one USD
    pub fn units_per_usd(&self, currency: Currency, local: Currency) -> Result<Decimal> {
        let rate = if currency == Currency::USD {
            Decimal::ONE
        } else if currency == local {
            self.exchange_rate
        } else {
            *self.cross_rates.get(&currency).ok_or_else(|| {
                PricingError::rate_unavailable(format!(
                    "No cross rate for {} on {}",
                    currency, self.rate_date
                ))
            })?
        };

        if rate <= Decimal::ZERO {
            return Err(PricingError::rate_unavailable(format!(
                "Non-positive rate for {} on {}: {}",
                currency, self.rate_date, rate
            )));
        }

        Ok(rate)
    }

    /// Multiplier turning a USD amount into `target`: target_rate / usd_rate
    pub fn factor(&self, target: Currency, local: Currency) -> Result<Decimal> {
        let usd_rate = self.units_per_usd(Currency::USD, local)?;
        let target_rate = self.units_per_usd(target, local)?;
        Ok(target_rate / usd_rate)
    }
}
