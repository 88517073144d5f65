pub mod aliquot_resolver;
pub mod tax_calculator;

pub use aliquot_resolver::AliquotResolver;
pub use tax_calculator::TaxCalculator;
