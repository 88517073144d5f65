// Invoices module: rows, catalog records and legacy (local currency) totals

pub mod models;
pub mod services;

pub use models::{InvoiceTotals, LineAmounts, LineItem, ProductRecord};
pub use services::{InvoiceTotalsAggregator, LineItemCalculator};
