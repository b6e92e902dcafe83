use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use roam_api::{build_app, build_router, ApiConfig, ApiState, DEFAULT_API_KEY};
use roam_core::render_itinerary;
use roam_gateway::Upstream;
use serde_json::{json, Value};
use tower::ServiceExt;

const ITINERARY: &str = "**Day 1: Arrival in Paris**\n\
Morning: Check in near the Louvre\n\
- Lunch at a small bistro\n\
Evening: Sunset at the **Eiffel Tower**\n\
\n\
Budget: about €150 per day";

fn app() -> Router {
    build_app(ApiConfig::fixture()).expect("app should build")
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-api-key", DEFAULT_API_KEY)
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_is_public() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["upstream"], "fixture");
}

#[tokio::test]
async fn missing_key_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/generate-trip")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "destination": "Paris", "duration": 2, "budget": "mid" }).to_string(),
        ))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "Authentication required");
}

#[tokio::test]
async fn wrong_key_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/itinerary/render")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, "Bearer not-the-key")
        .body(Body::from(json!({ "itinerary": ITINERARY }).to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"], "Invalid authentication");
}

#[tokio::test]
async fn bearer_token_is_accepted() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/itinerary/render")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {DEFAULT_API_KEY}"))
        .body(Body::from(json!({ "itinerary": ITINERARY }).to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn preflight_skips_authentication() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/v1/generate-trip")
        .header(header::ORIGIN, "https://roam.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            "authorization, content-type, x-client-info, apikey",
        )
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn invalid_trip_lists_every_field() {
    let response = app()
        .oneshot(post_json(
            "/v1/generate-trip",
            json!({ "destination": "  ", "duration": 45, "budget": "mid" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid input");
    assert_eq!(
        body["details"],
        json!([
            { "field": "destination", "message": "Destination is required" },
            { "field": "duration", "message": "Duration cannot exceed 30 days" }
        ])
    );
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/generate-trip")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-api-key", DEFAULT_API_KEY)
        .body(Body::from("{\"destination\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Invalid input");
}

#[tokio::test]
async fn generate_trip_returns_itinerary() {
    let response = app()
        .oneshot(post_json(
            "/v1/generate-trip",
            json!({
                "destination": "Lisbon",
                "duration": 2,
                "budget": "€600",
                "interests": "food, viewpoints"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let itinerary = body["itinerary"].as_str().expect("itinerary text");
    assert!(itinerary.contains("**Day 1: Exploring Lisbon**"));
    assert!(itinerary.contains("**Day 2: Exploring Lisbon**"));
    assert!(!itinerary.contains("Day 3"));
}

#[tokio::test]
async fn extract_locations_returns_coordinates() {
    let response = app()
        .oneshot(post_json(
            "/v1/extract-itinerary-locations",
            json!({ "itinerary": ITINERARY }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let locations = body["locations"].as_array().expect("locations array");
    let names = locations
        .iter()
        .filter_map(|location| location["name"].as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Paris", "Eiffel Tower", "Louvre"]);
    assert_eq!(locations[1]["type"], "landmark");
    assert_eq!(locations[1]["coordinates"], json!([2.2945, 48.8584]));
}

#[tokio::test]
async fn travel_safety_reports_risk_band() {
    let response = app()
        .oneshot(post_json("/v1/travel-safety", json!({ "countryCode": "co" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["name"], "Colombia");
    assert_eq!(body["riskLevel"], "High Risk");
    assert_eq!(body["color"], "orange");
}

#[tokio::test]
async fn travel_safety_rejects_bad_codes() {
    let response = app()
        .oneshot(post_json("/v1/travel-safety", json!({ "countryCode": "FRA" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid country code");
    assert_eq!(body["details"][0]["field"], "countryCode");
}

#[tokio::test]
async fn unknown_country_is_not_found() {
    let response = app()
        .oneshot(post_json("/v1/travel-safety", json!({ "countryCode": "ZZ" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Country not found");
    assert_eq!(
        body["message"],
        "Unable to fetch safety data for this destination"
    );
}

#[tokio::test]
async fn render_matches_core_renderer() {
    let response = app()
        .oneshot(post_json("/v1/itinerary/render", json!({ "itinerary": ITINERARY })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(
        body["blocks"],
        serde_json::to_value(render_itinerary(ITINERARY)).unwrap()
    );

    let kinds = body["segments"]
        .as_array()
        .expect("segments array")
        .iter()
        .filter_map(|segment| segment["kind"].as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            "day_header",
            "time_slot",
            "bullet",
            "time_slot",
            "blank",
            "labeled_section"
        ]
    );
}

#[tokio::test]
async fn unconfigured_ai_gateway_hides_details() {
    let mut config = ApiConfig::default();
    config.gateway.ai_api_key = None;
    let app = build_app(config).expect("app should build");

    let response = app
        .oneshot(post_json(
            "/v1/generate-trip",
            json!({ "destination": "Oslo", "duration": 1, "budget": "low" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Failed to generate trip itinerary");
    assert!(!body["error"].as_str().unwrap_or_default().contains("ai gateway"));
}

#[tokio::test]
async fn rate_limit_applies_per_client() {
    let config = ApiConfig {
        rate_limit_window: Duration::from_secs(60),
        rate_limit_max: 2,
        ..ApiConfig::fixture()
    };
    let app = build_router(ApiState::new(&config, Upstream::fixture()));

    let request = |ip: &str| {
        Request::builder()
            .method("POST")
            .uri("/v1/travel-safety")
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-api-key", DEFAULT_API_KEY)
            .header("x-forwarded-for", ip)
            .body(Body::from(json!({ "countryCode": "JP" }).to_string()))
            .unwrap()
    };

    for _ in 0..2 {
        let response = app.clone().oneshot(request("198.51.100.7")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let limited = app.clone().oneshot(request("198.51.100.7")).await.unwrap();
    assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(limited.headers().contains_key(header::RETRY_AFTER));

    let other = app.oneshot(request("198.51.100.8")).await.unwrap();
    assert_eq!(other.status(), StatusCode::OK);
}

fn assert_security_headers(response: &axum::response::Response) {
    let headers = response.headers();
    assert_eq!(
        headers
            .get(header::X_CONTENT_TYPE_OPTIONS)
            .and_then(|value| value.to_str().ok()),
        Some("nosniff")
    );
    assert_eq!(
        headers
            .get(header::X_FRAME_OPTIONS)
            .and_then(|value| value.to_str().ok()),
        Some("DENY")
    );
    assert!(headers.contains_key(header::REFERRER_POLICY));
}

#[tokio::test]
async fn security_headers_cover_auth_rejections() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/travel-safety")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "countryCode": "JP" }).to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_security_headers(&response);
}

#[tokio::test]
async fn security_headers_cover_rate_limited_responses() {
    let config = ApiConfig {
        rate_limit_max: 0,
        ..ApiConfig::fixture()
    };
    let app = build_router(ApiState::new(&config, Upstream::fixture()));

    let response = app
        .oneshot(post_json("/v1/travel-safety", json!({ "countryCode": "JP" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_security_headers(&response);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let itinerary = "Morning: a very long walk\n".repeat(12_000);
    assert!(itinerary.len() > 256 * 1024);

    let response = app()
        .oneshot(post_json(
            "/v1/itinerary/render",
            json!({ "itinerary": itinerary }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_security_headers(&response);
}

#[tokio::test]
async fn failed_requests_still_record_latency() {
    let state = ApiState::new(&ApiConfig::fixture(), Upstream::fixture());
    let metrics = state.metrics.clone();
    let app = build_router(state);

    let response = app
        .clone()
        .oneshot(post_json("/v1/travel-safety", json!({ "countryCode": "ZZ" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(post_json("/v1/travel-safety", json!({ "countryCode": "JP" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.requests_total, 2);
    assert_eq!(snapshot.latency_samples_total, 2);
    assert_eq!(snapshot.safety_lookups_total, 1);
    assert_eq!(snapshot.upstream_failures_total, 0);
}
