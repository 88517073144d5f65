//! Tasa invoice and cart pricing engine
//!
//! Shared pricing core for the new-invoice, edit-invoice and point-of-sale
//! screens: per-line IVA, exemptions, order discounts, USD reference (REF)
//! pricing converted at the daily rate, and the IGTF surcharge.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use crate::config::{Config, DiscountPolicy, FiscalConfig};
pub use crate::core::{Currency, PricingError, Result};
pub use modules::invoices;
pub use modules::reference;
pub use modules::sessions;
pub use modules::taxes;
