use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::seniat::TransactionType;
use crate::core::Currency;
use crate::modules::invoices::InvoiceTotals;
use crate::modules::reference::ReferenceTotals;

/// Row as sent to the invoice persistence API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadItem {
    pub product_id: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Resolved percentage; zero for exempt rows
    pub tax_rate: Decimal,
    pub is_exempt: bool,
}

/// Body submitted to the invoice persistence API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoicePayload {
    pub session_id: String,
    pub customer_id: String,
    pub warehouse_id: String,
    pub currency: Currency,
    pub discount_percent: Decimal,
    pub items: Vec<PayloadItem>,
    pub totals: InvoiceTotals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceTotals>,
    pub payment_method: String,
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_days: Option<u32>,
}
