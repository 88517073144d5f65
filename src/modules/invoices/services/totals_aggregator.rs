use rust_decimal::Decimal;
use tracing::debug;

use super::line_calculator::LineItemCalculator;
use crate::config::DiscountPolicy;
use crate::core::{Currency, PricingError, Result};
use crate::modules::invoices::models::{InvoiceTotals, LineItem};

/// Sums rows into invoice totals and applies the order discount
#[derive(Debug, Clone)]
pub struct InvoiceTotalsAggregator {
    calculator: LineItemCalculator,
    policy: DiscountPolicy,
}

impl InvoiceTotalsAggregator {
    pub fn new(calculator: LineItemCalculator, policy: DiscountPolicy) -> Self {
        Self { calculator, policy }
    }

    pub fn calculator(&self) -> &LineItemCalculator {
        &self.calculator
    }

    pub fn policy(&self) -> DiscountPolicy {
        self.policy
    }

    /// Aggregate rows into totals rounded to `currency`
    ///
    /// Bases are rounded first and every later figure is taken from rounded values:
    /// - subtotal = taxable_base + exempt_amount
    /// - BeforeTax: tax charged on discounted rows; discount = subtotal − round(subtotal × (1 − pct))
    /// - AfterTax: discount = gross − round(gross × (1 − pct)) with gross = subtotal + tax
    /// - total = subtotal + tax − discount
    pub fn aggregate(
        &self,
        items: &[LineItem],
        discount_percent: Decimal,
        currency: Currency,
    ) -> Result<InvoiceTotals> {
        validate_discount_percent(discount_percent)?;

        let mut taxable_base = Decimal::ZERO;
        let mut exempt_amount = Decimal::ZERO;
        let mut tax = Decimal::ZERO;

        for item in items {
            let amounts = self.calculator.compute(item)?;
            if amounts.exempt {
                exempt_amount += amounts.net;
            } else {
                taxable_base += amounts.net;
                tax += amounts.tax;
            }
        }

        let taxable_base = currency.round(taxable_base);
        let exempt_amount = currency.round(exempt_amount);
        let subtotal = taxable_base + exempt_amount;
        let remaining = Decimal::ONE - discount_percent / Decimal::ONE_HUNDRED;

        let (tax, discount) = match self.policy {
            DiscountPolicy::BeforeTax => {
                let tax = currency.round(tax * remaining);
                (tax, subtotal - currency.round(subtotal * remaining))
            }
            DiscountPolicy::AfterTax => {
                let tax = currency.round(tax);
                let gross = subtotal + tax;
                (tax, gross - currency.round(gross * remaining))
            }
        };

        let totals = InvoiceTotals {
            subtotal,
            taxable_base,
            exempt_amount,
            tax,
            discount,
            total: subtotal + tax - discount,
        };

        debug!(
            items = items.len(),
            policy = %self.policy,
            subtotal = %totals.subtotal,
            tax = %totals.tax,
            discount = %totals.discount,
            total = %totals.total,
            "Aggregated invoice totals"
        );

        Ok(totals)
    }
}

fn validate_discount_percent(discount_percent: Decimal) -> Result<()> {
    if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
        return Err(PricingError::validation(format!(
            "Discount must be between 0 and 100 percent, got: {}",
            discount_percent
        )));
    }

    Ok(())
}
