mod exchange_rate;
mod reference_totals;

pub use exchange_rate::ExchangeRate;
pub use reference_totals::ReferenceTotals;
