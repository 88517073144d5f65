pub mod line_calculator;
pub mod totals_aggregator;

pub use line_calculator::LineItemCalculator;
pub use totals_aggregator::InvoiceTotalsAggregator;
