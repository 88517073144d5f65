use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-row amounts; unrounded, rounding happens once at aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAmounts {
    /// quantity × unit_price
    pub net: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    /// Effective percentage applied (zero for exempt rows)
    pub rate: Decimal,
    pub exempt: bool,
}

/// Invoice/cart totals in the invoice currency.
///
/// Invariant: `subtotal == taxable_base + exempt_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub taxable_base: Decimal,
    pub exempt_amount: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl InvoiceTotals {
    pub fn is_empty(&self) -> bool {
        self.subtotal.is_zero() && self.tax.is_zero()
    }
}
