// Integration tests for the reference-price API client
//
// Tests run the real HTTP client against an in-process sandbox:
// - Successful lookup with and without a bearer token
// - Error statuses and malformed bodies map to ExchangeRateUnavailable
// - The client drives the REF overlay end to end

use rust_decimal_macros::dec;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::{spawn_rate_sandbox, SandboxBehavior, TestDataFactory};

use tasa::reference::{ExchangeRateProvider, ReferencePriceClient};
use tasa::sessions::{OverlayStatus, ReferenceOverlay};
use tasa::{Currency, PricingError};

fn rates_for_today() -> SandboxBehavior {
    let mut rates = HashMap::new();
    rates.insert(
        "2026-10-16".to_string(),
        json!({
            "exchange_rate": "344.50",
            "rate_date": "2026-10-16",
            "cross_rates": { "EUR": "0.92" }
        }),
    );
    SandboxBehavior::Rates(rates)
}

#[actix_web::test]
async fn test_fetches_daily_rate() {
    let sandbox = spawn_rate_sandbox(rates_for_today(), None);
    let client = ReferencePriceClient::new(&sandbox.client_config(None)).unwrap();

    let rate = client.rate_for(TestDataFactory::rate_date()).await.unwrap();

    assert_eq!(rate.exchange_rate, dec!(344.50));
    assert_eq!(rate.rate_date, TestDataFactory::rate_date());
    assert_eq!(rate.cross_rates.get(&Currency::EUR), Some(&dec!(0.92)));
    assert_eq!(sandbox.hit_count(), 1);
    assert_eq!(client.name(), "reference-api");
}

#[actix_web::test]
async fn test_sends_bearer_token() {
    let sandbox = spawn_rate_sandbox(rates_for_today(), Some("secret-key"));

    let authorized = ReferencePriceClient::new(&sandbox.client_config(Some("secret-key"))).unwrap();
    assert!(authorized.rate_for(TestDataFactory::rate_date()).await.is_ok());

    let anonymous = ReferencePriceClient::new(&sandbox.client_config(None)).unwrap();
    let err = anonymous
        .rate_for(TestDataFactory::rate_date())
        .await
        .unwrap_err();
    assert!(matches!(err, PricingError::ExchangeRateUnavailable(_)));
    assert!(err.to_string().contains("401"));
}

#[actix_web::test]
async fn test_unknown_date_is_unavailable() {
    let sandbox = spawn_rate_sandbox(rates_for_today(), None);
    let client = ReferencePriceClient::new(&sandbox.client_config(None)).unwrap();

    let date = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let err = client.rate_for(date).await.unwrap_err();
    assert!(matches!(err, PricingError::ExchangeRateUnavailable(_)));
    assert!(err.to_string().contains("404"));
}

#[actix_web::test]
async fn test_server_error_is_unavailable() {
    let sandbox = spawn_rate_sandbox(SandboxBehavior::Status(500), None);
    let client = ReferencePriceClient::new(&sandbox.client_config(None)).unwrap();

    let err = client
        .rate_for(TestDataFactory::rate_date())
        .await
        .unwrap_err();
    assert!(matches!(err, PricingError::ExchangeRateUnavailable(_)));
    assert!(err.is_degradable());
}

#[actix_web::test]
async fn test_malformed_body_is_unavailable() {
    let sandbox = spawn_rate_sandbox(SandboxBehavior::Raw("{\"rate\": ".to_string()), None);
    let client = ReferencePriceClient::new(&sandbox.client_config(None)).unwrap();

    let err = client
        .rate_for(TestDataFactory::rate_date())
        .await
        .unwrap_err();
    assert!(matches!(err, PricingError::ExchangeRateUnavailable(_)));
    assert!(err.to_string().contains("Failed to parse"));
}

#[actix_web::test]
async fn test_accepts_numeric_rates() {
    let mut rates = HashMap::new();
    rates.insert(
        "2026-10-16".to_string(),
        json!({ "exchange_rate": 344.5, "rate_date": "2026-10-16" }),
    );
    let sandbox = spawn_rate_sandbox(SandboxBehavior::Rates(rates), None);
    let client = ReferencePriceClient::new(&sandbox.client_config(None)).unwrap();

    let rate = client.rate_for(TestDataFactory::rate_date()).await.unwrap();
    assert_eq!(rate.exchange_rate, dec!(344.5));
    assert!(rate.cross_rates.is_empty());
}

#[actix_web::test]
async fn test_zero_rate_is_rejected() {
    let mut rates = HashMap::new();
    rates.insert(
        "2026-10-16".to_string(),
        json!({ "exchange_rate": "0", "rate_date": "2026-10-16" }),
    );
    let sandbox = spawn_rate_sandbox(SandboxBehavior::Rates(rates), None);
    let client = ReferencePriceClient::new(&sandbox.client_config(None)).unwrap();

    let err = client
        .rate_for(TestDataFactory::rate_date())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("non-positive"));
}

#[actix_web::test]
async fn test_overlay_through_http_client() {
    let sandbox = spawn_rate_sandbox(rates_for_today(), None);
    let client = ReferencePriceClient::new(&sandbox.client_config(None)).unwrap();
    let overlay = ReferenceOverlay::new(TestDataFactory::engine(), Arc::new(client));

    let mut session = TestDataFactory::reference_cart();
    session.set_payment_method("tarjeta").unwrap();

    let status = overlay
        .refresh(&mut session, TestDataFactory::rate_date())
        .await;
    assert_eq!(status, OverlayStatus::Applied);

    let reference = session.reference().unwrap();
    assert_eq!(reference.total_amount, dec!(32796.40));
    assert_eq!(reference.payment_method, "tarjeta");
}

#[actix_web::test]
async fn test_overlay_degrades_when_api_down() {
    let sandbox = spawn_rate_sandbox(SandboxBehavior::Status(503), None);
    let client = ReferencePriceClient::new(&sandbox.client_config(None)).unwrap();
    let engine = TestDataFactory::engine();
    let overlay = ReferenceOverlay::new(engine.clone(), Arc::new(client));

    let mut session = TestDataFactory::reference_cart();
    let status = overlay
        .refresh(&mut session, TestDataFactory::rate_date())
        .await;

    assert_eq!(status, OverlayStatus::Degraded);
    let quote = engine.quote(&session).unwrap();
    assert!(quote.reference.is_none());
    assert_eq!(quote.legacy.total, dec!(31969.60));
}
