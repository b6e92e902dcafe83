mod config;
mod error;
mod fixture;
mod http;
pub mod parse;

use roam_core::{AdvisoryRecord, Location, TripRequest};

pub use config::{GatewayConfig, UpstreamMode};
pub use error::{UpstreamError, AI_GATEWAY, TRAVEL_ADVISORY};
pub use fixture::FixtureGateway;
pub use http::HttpGateway;

pub trait TripGenerator: Send + Sync {
    async fn generate_itinerary(&self, request: &TripRequest) -> Result<String, UpstreamError>;
}

pub trait LocationExtractor: Send + Sync {
    async fn extract_locations(&self, itinerary: &str) -> Result<Vec<Location>, UpstreamError>;
}

pub trait AdvisorySource: Send + Sync {
    async fn country_advisory(&self, country_code: &str) -> Result<AdvisoryRecord, UpstreamError>;
}

#[derive(Debug, Clone)]
pub enum Upstream {
    Http(HttpGateway),
    Fixture(FixtureGateway),
}

impl Upstream {
    pub fn fixture() -> Self {
        Self::Fixture(FixtureGateway::new())
    }

    pub fn from_config(config: GatewayConfig) -> Result<Self, UpstreamError> {
        match config.mode {
            UpstreamMode::Http => Ok(Self::Http(HttpGateway::new(config)?)),
            UpstreamMode::Fixture => Ok(Self::fixture()),
        }
    }

    pub fn mode(&self) -> UpstreamMode {
        match self {
            Upstream::Http(_) => UpstreamMode::Http,
            Upstream::Fixture(_) => UpstreamMode::Fixture,
        }
    }
}

impl TripGenerator for Upstream {
    async fn generate_itinerary(&self, request: &TripRequest) -> Result<String, UpstreamError> {
        match self {
            Upstream::Http(gateway) => gateway.generate_itinerary(request).await,
            Upstream::Fixture(gateway) => gateway.generate_itinerary(request).await,
        }
    }
}

impl LocationExtractor for Upstream {
    async fn extract_locations(&self, itinerary: &str) -> Result<Vec<Location>, UpstreamError> {
        match self {
            Upstream::Http(gateway) => gateway.extract_locations(itinerary).await,
            Upstream::Fixture(gateway) => gateway.extract_locations(itinerary).await,
        }
    }
}

impl AdvisorySource for Upstream {
    async fn country_advisory(&self, country_code: &str) -> Result<AdvisoryRecord, UpstreamError> {
        match self {
            Upstream::Http(gateway) => gateway.country_advisory(country_code).await,
            Upstream::Fixture(gateway) => gateway.country_advisory(country_code).await,
        }
    }
}
