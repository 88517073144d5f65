pub mod converter;
pub mod rate_provider;
pub mod reference_price_client;

pub use converter::ReferenceConverter;
pub use rate_provider::{ExchangeRateProvider, StaticRateProvider};
pub use reference_price_client::ReferencePriceClient;
