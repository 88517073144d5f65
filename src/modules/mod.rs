pub mod invoices;
pub mod reference;
pub mod sessions;
pub mod taxes;
