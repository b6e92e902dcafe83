use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use roam_core::{safe_error_message, ValidationError};
use roam_gateway::UpstreamError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    GenerateTrip,
    ExtractLocations,
    TravelSafety,
    RenderItinerary,
}

impl Endpoint {
    fn failure_message(self) -> &'static str {
        match self {
            Self::GenerateTrip => "Failed to generate trip itinerary",
            Self::ExtractLocations => "Failed to extract locations from itinerary",
            Self::TravelSafety => "Failed to fetch travel safety data",
            Self::RenderItinerary => "Failed to render itinerary",
        }
    }

    fn invalid_input_label(self) -> &'static str {
        match self {
            Self::TravelSafety => "Invalid country code",
            _ => "Invalid input",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("invalid authentication")]
    InvalidCredentials,
    #[error("rate limit exceeded, retry in {}s", .retry_after.as_secs())]
    RateLimited { retry_after: Duration },
    #[error("malformed request body: {detail}")]
    Body { status: StatusCode, detail: String },
    #[error("{source}")]
    Validation {
        endpoint: Endpoint,
        #[source]
        source: ValidationError,
    },
    #[error("{source}")]
    Upstream {
        endpoint: Endpoint,
        #[source]
        source: UpstreamError,
    },
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::Body {
            status,
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Authentication required" })),
            )
                .into_response(),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid authentication" })),
            )
                .into_response(),
            ApiError::RateLimited { retry_after } => {
                let mut response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({
                        "error": "Too many requests. Please wait a moment and try again."
                    })),
                )
                    .into_response();
                let seconds = retry_after.as_secs().max(1);
                if let Ok(value) = HeaderValue::from_str(&seconds.to_string()) {
                    response.headers_mut().insert(header::RETRY_AFTER, value);
                }
                response
            }
            ApiError::Body { status, detail } => (
                status,
                Json(json!({ "error": "Invalid input", "message": detail })),
            )
                .into_response(),
            ApiError::Validation { endpoint, source } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": endpoint.invalid_input_label(),
                    "details": source.issues
                })),
            )
                .into_response(),
            ApiError::Upstream { endpoint, source } => upstream_response(endpoint, source),
        }
    }
}

fn upstream_response(endpoint: Endpoint, source: UpstreamError) -> Response {
    match source {
        UpstreamError::RateLimited(_) => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Rate limits exceeded, please try again later." })),
        )
            .into_response(),
        UpstreamError::PaymentRequired(_) => (
            StatusCode::PAYMENT_REQUIRED,
            Json(json!({ "error": "Payment required, please add credits to your AI workspace." })),
        )
            .into_response(),
        UpstreamError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "Country not found",
                "message": "Unable to fetch safety data for this destination"
            })),
        )
            .into_response(),
        other => {
            let detail = other.detail();
            tracing::error!(endpoint = ?endpoint, error = %detail, "upstream call failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": safe_error_message(&detail),
                    "message": endpoint.failure_message()
                })),
            )
                .into_response()
        }
    }
}
