//! HTTP API over the search pipeline.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{post, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use serde_json::json;
use tracing::info;

use crate::config::AppConfig;
use crate::rate_limit::RateLimiter;
use crate::request::SearchRequest;
use crate::search::ProductSearch;
use crate::ScrapeError;

/// Shared state handed to every request handler.
pub struct AppState {
    search: ProductSearch,
    config: AppConfig,
    limiter: RateLimiter,
}

impl AppState {
    /// Bundles the pipeline and config; the limiter ceiling comes from config.
    pub fn new(search: ProductSearch, config: AppConfig) -> Self {
        let limiter = RateLimiter::new(config.rate_limit_per_minute);
        Self {
            search,
            config,
            limiter,
        }
    }
}

/// Runs the API server until shutdown.
pub async fn run_server(state: AppState) -> std::io::Result<()> {
    let bind_addr = state.config.bind_addr.clone();
    let state = web::Data::new(state);

    info!("Listening on {}", bind_addr);
    HttpServer::new(move || App::new().app_data(state.clone()).service(search_endpoint))
        .bind(bind_addr.as_str())?
        .run()
        .await
}

/// `POST /search`, checked in order: credential, rate limit, body shape,
/// then the pipeline itself. The body is taken raw so a malformed payload
/// cannot short-circuit ahead of the credential check.
#[post("/search")]
async fn search_endpoint(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> impl Responder {
    let response = handle_search(&state, &req, &body).await;
    with_cors(response, &req, &state.config)
}

async fn handle_search(state: &AppState, req: &HttpRequest, body: &[u8]) -> HttpResponse {
    if !authorized(req, &state.config) {
        return HttpResponse::Unauthorized().json(json!({
            "detail": "Invalid or missing API key"
        }));
    }

    if let Some(ip) = req.peer_addr().map(|addr| addr.ip()) {
        if !state.limiter.check(ip).await {
            return HttpResponse::TooManyRequests().json(json!({
                "detail": "Rate limit exceeded"
            }));
        }
    }

    let request: SearchRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            return HttpResponse::BadRequest().json(json!({
                "detail": format!("Invalid request body: {}", e)
            }));
        }
    };

    match state.search.search(request).await {
        Ok(records) => HttpResponse::Ok().json(records),
        Err(e) => error_response(&e),
    }
}

/// Checks `Authorization: Bearer <key>` against the configured allow-list.
fn authorized(req: &HttpRequest, config: &AppConfig) -> bool {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return false;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };
    let Some(key) = value.strip_prefix("Bearer ") else {
        return false;
    };
    config.api_keys.iter().any(|k| k == key)
}

fn error_response(err: &ScrapeError) -> HttpResponse {
    let body = json!({ "detail": err.to_string() });
    match err {
        ScrapeError::InvalidRequest(_) => HttpResponse::BadRequest().json(body),
        ScrapeError::NoResults => HttpResponse::NotFound().json(body),
        ScrapeError::Timeout => HttpResponse::RequestTimeout().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

/// Echoes the request `Origin` back when it is on the allow-list.
fn with_cors(mut response: HttpResponse, req: &HttpRequest, config: &AppConfig) -> HttpResponse {
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok());
    if let Some(origin) = origin {
        if config.allowed_origins.iter().any(|allowed| allowed == origin) {
            if let Ok(value) = HeaderValue::from_str(origin) {
                response
                    .headers_mut()
                    .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
            }
        }
    }
    response
}
