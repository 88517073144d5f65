// REF pricing: USD-anchored totals converted at the daily reference rate

pub mod models;
pub mod services;

pub use models::{ExchangeRate, ReferenceTotals};
pub use services::{
    ExchangeRateProvider, ReferenceConverter, ReferencePriceClient, StaticRateProvider,
};
