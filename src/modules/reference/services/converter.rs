use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{FiscalConfig, IgtfPolicy};
use crate::core::{Currency, PricingError, Result};
use crate::modules::reference::models::{ExchangeRate, ReferenceTotals};

/// Converts a USD reference subtotal into a target currency and applies
/// IVA and IGTF
#[derive(Debug, Clone)]
pub struct ReferenceConverter {
    local_currency: Currency,
    iva_rate: Decimal,
    igtf: IgtfPolicy,
}

impl ReferenceConverter {
    pub fn new(fiscal: &FiscalConfig) -> Self {
        Self {
            local_currency: fiscal.local_currency,
            iva_rate: fiscal.reference_iva_rate,
            igtf: fiscal.igtf.clone(),
        }
    }

    pub fn local_currency(&self) -> Currency {
        self.local_currency
    }

    pub fn is_igtf_applicable(&self, payment_method: &str) -> bool {
        self.igtf.is_applicable(payment_method)
    }

    /// Convert `subtotal_usd` into `target` and tax it
    ///
    /// - subtotal_target = subtotal_usd × (target_rate / usd_rate)
    /// - iva_amount = subtotal_target × iva_rate
    /// - igtf_amount = subtotal_target × igtf_rate, or zero for exempt methods
    /// - total_amount = subtotal_target + iva_amount + igtf_amount
    pub fn convert(
        &self,
        subtotal_usd: Decimal,
        rate: &ExchangeRate,
        target: Currency,
        payment_method: &str,
    ) -> Result<ReferenceTotals> {
        if subtotal_usd < Decimal::ZERO {
            return Err(PricingError::validation(format!(
                "Reference subtotal cannot be negative, got: {}",
                subtotal_usd
            )));
        }

        let factor = rate.factor(target, self.local_currency)?;

        let subtotal_target = target.round(subtotal_usd * factor);
        let iva_amount = target.round(subtotal_target * self.iva_rate / Decimal::ONE_HUNDRED);
        let igtf_amount = if self.igtf.is_applicable(payment_method) {
            target.round(subtotal_target * self.igtf.rate / Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        };

        let totals = ReferenceTotals {
            subtotal_reference: subtotal_usd,
            exchange_rate: factor,
            rate_date: rate.rate_date,
            target_currency: target,
            subtotal_target,
            iva_amount,
            igtf_amount,
            total_amount: subtotal_target + iva_amount + igtf_amount,
            payment_method: payment_method.trim().to_string(),
        };

        debug!(
            target = %target,
            rate = %factor,
            rate_date = %rate.rate_date,
            payment_method = %totals.payment_method,
            igtf = %totals.igtf_amount,
            total = %totals.total_amount,
            "Converted reference totals"
        );

        Ok(totals)
    }

    /// Inverse of the subtotal conversion: target amount back to USD
    pub fn to_usd(&self, amount: Decimal, rate: &ExchangeRate, target: Currency) -> Result<Decimal> {
        let factor = rate.factor(target, self.local_currency)?;
        Ok(Currency::USD.round(amount / factor))
    }
}
