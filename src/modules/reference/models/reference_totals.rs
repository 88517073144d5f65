use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Currency;

/// REF pricing panel: USD subtotal converted and taxed in the target currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTotals {
    /// Subtotal in USD
    pub subtotal_reference: Decimal,
    /// Units of the target currency per USD used for the conversion
    pub exchange_rate: Decimal,
    pub rate_date: NaiveDate,
    pub target_currency: Currency,
    pub subtotal_target: Decimal,
    pub iva_amount: Decimal,
    /// Zero for IGTF-exempt (cash) payment methods
    pub igtf_amount: Decimal,
    pub total_amount: Decimal,
    pub payment_method: String,
}

impl ReferenceTotals {
    pub fn igtf_applied(&self) -> bool {
        self.igtf_amount > Decimal::ZERO
    }
}
