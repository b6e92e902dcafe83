mod config;
mod error;
mod handlers;
mod rate_limit;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Json, State};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use roam_gateway::{Upstream, UpstreamMode};
use roam_observability::{AppMetrics, MetricsSnapshot};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub use crate::config::{ApiConfig, DEFAULT_API_KEY};
pub use crate::error::{ApiError, Endpoint};
pub use crate::handlers::RenderResponse;
pub use crate::rate_limit::IpRateLimiter;

const MAX_BODY_BYTES: usize = 256 * 1024;

#[derive(Clone)]
pub struct ApiState {
    pub upstream: Arc<Upstream>,
    pub metrics: Arc<AppMetrics>,
    pub api_key: Arc<str>,
    pub limiter: IpRateLimiter,
}

impl ApiState {
    pub fn new(config: &ApiConfig, upstream: Upstream) -> Self {
        Self {
            upstream: Arc::new(upstream),
            metrics: AppMetrics::shared(),
            api_key: Arc::from(config.api_key.as_str()),
            limiter: IpRateLimiter::new(config.rate_limit_window, config.rate_limit_max),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    upstream: UpstreamMode,
    metrics: MetricsSnapshot,
}

pub fn build_app(config: ApiConfig) -> Result<Router> {
    let upstream = Upstream::from_config(config.gateway.clone())
        .context("failed to initialise upstream gateway")?;

    tracing::info!(
        upstream = ?upstream.mode(),
        rate_limit_max = config.rate_limit_max,
        rate_limit_window_secs = config.rate_limit_window.as_secs(),
        "roam api configured"
    );

    Ok(build_router(ApiState::new(&config, upstream)))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/generate-trip", post(handlers::generate_trip))
        .route(
            "/v1/extract-itinerary-locations",
            post(handlers::extract_itinerary_locations),
        )
        .route("/v1/travel-safety", post(handlers::travel_safety))
        .route("/v1/itinerary/render", post(handlers::render_itinerary))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(build_cors_layer())
        .layer(middleware::from_fn(security_headers_middleware))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        upstream: state.upstream.mode(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            HeaderName::from_static("x-api-key"),
        ])
}

async fn rate_limit_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let ip = request_ip(&request);
    if let Err(retry_after) = state.limiter.check(&ip) {
        tracing::warn!(
            ip = %ip,
            path = %request.uri().path(),
            retry_after_secs = retry_after.as_secs(),
            "rate limit exceeded"
        );
        return ApiError::RateLimited { retry_after }.into_response();
    }

    next.run(request).await
}

async fn api_key_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let verdict = presented_key(request.headers())
        .map(|key| constant_time_eq(key.as_bytes(), state.api_key.as_bytes()));

    match verdict {
        Some(true) => next.run(request).await,
        Some(false) => {
            tracing::warn!(path = %request.uri().path(), "rejected request with invalid api key");
            ApiError::InvalidCredentials.into_response()
        }
        None => ApiError::Unauthenticated.into_response(),
    }
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response.headers_mut().insert(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static("DENY"),
    );
    response.headers_mut().insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    response
}

/// Key from `Authorization: Bearer <key>`, falling back to `x-api-key`.
fn presented_key(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|value| !value.is_empty());

    bearer.or_else(|| {
        headers
            .get("x-api-key")
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    })
}

fn request_ip(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "local".to_string())
}

fn is_public_endpoint(path: &str) -> bool {
    matches!(path, "/health")
}

fn constant_time_eq(lhs: &[u8], rhs: &[u8]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }
    let mut diff = 0_u8;
    for (a, b) in lhs.iter().zip(rhs.iter()) {
        diff |= a ^ b;
    }
    diff == 0
}
