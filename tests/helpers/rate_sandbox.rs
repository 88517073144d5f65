// Reference-Price API Sandbox
//
// Spawns a real HTTP server with actix-test that speaks the reference-price
// API (`GET /reference-prices?date=YYYY-MM-DD`). Tests point the real
// `ReferencePriceClient` at it.

#![allow(dead_code)]

use actix_web::{http::StatusCode, web, App, HttpRequest, HttpResponse};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub use actix_test::TestServer;

use tasa::config::ReferenceApiConfig;

/// How the sandbox answers
#[derive(Clone)]
pub enum SandboxBehavior {
    /// JSON body per requested date; unknown dates answer 404
    Rates(HashMap<String, Value>),
    /// Fixed status with an empty JSON object
    Status(u16),
    /// 200 with a raw (possibly malformed) body
    Raw(String),
}

struct SandboxState {
    behavior: SandboxBehavior,
    required_token: Option<String>,
    hits: Arc<AtomicUsize>,
}

pub struct RateSandbox {
    pub server: TestServer,
    pub hits: Arc<AtomicUsize>,
}

impl RateSandbox {
    /// Client config pointing at this sandbox, no retries
    pub fn client_config(&self, api_key: Option<&str>) -> ReferenceApiConfig {
        ReferenceApiConfig {
            base_url: Some(self.server.url("/")),
            api_key: api_key.map(String::from),
            timeout_secs: 5,
            max_retries: 0,
        }
    }

    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn spawn_rate_sandbox(behavior: SandboxBehavior, required_token: Option<&str>) -> RateSandbox {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = web::Data::new(SandboxState {
        behavior,
        required_token: required_token.map(String::from),
        hits: hits.clone(),
    });

    let server = actix_test::start(move || {
        App::new()
            .app_data(state.clone())
            .route("/reference-prices", web::get().to(reference_prices))
    });

    RateSandbox { server, hits }
}

async fn reference_prices(
    req: HttpRequest,
    state: web::Data<SandboxState>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);

    if let Some(token) = &state.required_token {
        let expected = format!("Bearer {}", token);
        let given = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok());
        if given != Some(expected.as_str()) {
            return HttpResponse::Unauthorized().json(serde_json::json!({"error": "unauthorized"}));
        }
    }

    match &state.behavior {
        SandboxBehavior::Rates(rates) => {
            let date = query.get("date").cloned().unwrap_or_default();
            match rates.get(&date) {
                Some(body) => HttpResponse::Ok().json(body),
                None => HttpResponse::NotFound().json(serde_json::json!({"error": "no rate"})),
            }
        }
        SandboxBehavior::Status(code) => {
            let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            HttpResponse::build(status).json(serde_json::json!({}))
        }
        SandboxBehavior::Raw(body) => HttpResponse::Ok()
            .content_type("application/json")
            .body(body.clone()),
    }
}
