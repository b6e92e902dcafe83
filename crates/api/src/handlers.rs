use std::future::Future;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use roam_core::{
    classify, render, DisplayBlock, ItineraryRequest, LocationList, SafetyReport, SafetyRequest,
    Segment, TripItinerary, TripRequest,
};
use roam_gateway::{AdvisorySource, LocationExtractor, TripGenerator, UpstreamError};
use serde::Serialize;
use tracing::info;

use crate::error::{ApiError, Endpoint};
use crate::ApiState;

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub segments: Vec<Segment>,
    pub blocks: Vec<DisplayBlock>,
}

impl ApiState {
    fn upstream_failure(&self, endpoint: Endpoint, source: UpstreamError) -> ApiError {
        self.metrics.inc_upstream_failure();
        ApiError::Upstream { endpoint, source }
    }

    /// Counts the request and records its latency on success and failure alike.
    async fn measured<T>(
        &self,
        work: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        let started = Instant::now();
        self.metrics.inc_request();
        let outcome = work.await;
        self.metrics.observe_latency(started.elapsed());
        outcome
    }
}

pub(crate) async fn generate_trip(
    State(state): State<ApiState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<Json<TripItinerary>, ApiError> {
    state
        .measured(async {
            let Json(input) = payload?;
            let request = input.validate().map_err(|source| ApiError::Validation {
                endpoint: Endpoint::GenerateTrip,
                source,
            })?;

            info!(
                destination = %request.destination,
                days = request.duration,
                "generating trip itinerary"
            );
            let itinerary = state
                .upstream
                .generate_itinerary(&request)
                .await
                .map_err(|source| state.upstream_failure(Endpoint::GenerateTrip, source))?;

            state.metrics.inc_itinerary_generated();
            Ok(Json(TripItinerary { itinerary }))
        })
        .await
}

pub(crate) async fn extract_itinerary_locations(
    State(state): State<ApiState>,
    payload: Result<Json<ItineraryRequest>, JsonRejection>,
) -> Result<Json<LocationList>, ApiError> {
    state
        .measured(async {
            let Json(input) = payload?;
            let request = input.validate().map_err(|source| ApiError::Validation {
                endpoint: Endpoint::ExtractLocations,
                source,
            })?;

            let locations = state
                .upstream
                .extract_locations(&request.itinerary)
                .await
                .map_err(|source| state.upstream_failure(Endpoint::ExtractLocations, source))?;

            info!(count = locations.len(), "extracted itinerary locations");
            state.metrics.add_locations_extracted(locations.len());
            Ok(Json(LocationList { locations }))
        })
        .await
}

pub(crate) async fn travel_safety(
    State(state): State<ApiState>,
    payload: Result<Json<SafetyRequest>, JsonRejection>,
) -> Result<Json<SafetyReport>, ApiError> {
    state
        .measured(async {
            let Json(input) = payload?;
            let request = input.validate().map_err(|source| ApiError::Validation {
                endpoint: Endpoint::TravelSafety,
                source,
            })?;

            let record = state
                .upstream
                .country_advisory(&request.country_code)
                .await
                .map_err(|source| match source {
                    UpstreamError::NotFound(_) => ApiError::Upstream {
                        endpoint: Endpoint::TravelSafety,
                        source,
                    },
                    other => state.upstream_failure(Endpoint::TravelSafety, other),
                })?;

            let report = SafetyReport::from(record);
            info!(
                country = %request.country_code,
                risk_level = %report.risk_level,
                "travel safety lookup"
            );
            state.metrics.inc_safety_lookup();
            Ok(Json(report))
        })
        .await
}

pub(crate) async fn render_itinerary(
    State(state): State<ApiState>,
    payload: Result<Json<ItineraryRequest>, JsonRejection>,
) -> Result<Json<RenderResponse>, ApiError> {
    state
        .measured(async {
            let Json(input) = payload?;
            let request = input.validate().map_err(|source| ApiError::Validation {
                endpoint: Endpoint::RenderItinerary,
                source,
            })?;

            let segments = classify(&request.itinerary);
            let blocks = render(&segments);

            state.metrics.inc_itinerary_rendered();
            Ok(Json(RenderResponse { segments, blocks }))
        })
        .await
}
