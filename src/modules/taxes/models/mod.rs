mod tax;

pub use tax::{TaxCode, TaxTable};
