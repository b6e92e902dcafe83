use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    itineraries_generated_total: AtomicU64,
    itineraries_rendered_total: AtomicU64,
    locations_extracted_total: AtomicU64,
    safety_lookups_total: AtomicU64,
    upstream_failures_total: AtomicU64,
    total_latency_millis: AtomicU64,
    latency_samples_total: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub itineraries_generated_total: u64,
    pub itineraries_rendered_total: u64,
    pub locations_extracted_total: u64,
    pub safety_lookups_total: u64,
    pub upstream_failures_total: u64,
    pub latency_samples_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_itinerary_generated(&self) {
        self.itineraries_generated_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_itinerary_rendered(&self) {
        self.itineraries_rendered_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_locations_extracted(&self, count: usize) {
        self.locations_extracted_total
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn inc_safety_lookup(&self) {
        self.safety_lookups_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_upstream_failure(&self) {
        self.upstream_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Call once per finished request, whatever its outcome.
    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
        self.latency_samples_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let latency = self.total_latency_millis.load(Ordering::Relaxed);
        let samples = self.latency_samples_total.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            itineraries_generated_total: self.itineraries_generated_total.load(Ordering::Relaxed),
            itineraries_rendered_total: self.itineraries_rendered_total.load(Ordering::Relaxed),
            locations_extracted_total: self.locations_extracted_total.load(Ordering::Relaxed),
            safety_lookups_total: self.safety_lookups_total.load(Ordering::Relaxed),
            upstream_failures_total: self.upstream_failures_total.load(Ordering::Relaxed),
            latency_samples_total: samples,
            avg_latency_millis: if samples == 0 {
                0.0
            } else {
                latency as f64 / samples as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,roam_api=info,roam_gateway=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}
