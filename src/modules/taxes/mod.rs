pub mod models;
pub mod services;

pub use models::{TaxCode, TaxTable};
pub use services::{AliquotResolver, TaxCalculator};
