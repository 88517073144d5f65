mod line_item;
mod product;
mod totals;

pub use line_item::LineItem;
pub use product::ProductRecord;
pub use totals::{InvoiceTotals, LineAmounts};
