use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use roam_core::prompts::{
    extract_locations_tool, locations_user_prompt, trip_user_prompt, EXTRACT_LOCATIONS_TOOL,
    LOCATIONS_SYSTEM_PROMPT, TRIP_SYSTEM_PROMPT,
};
use roam_core::{AdvisoryRecord, Location, TripRequest};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::config::GatewayConfig;
use crate::error::{UpstreamError, AI_GATEWAY, TRAVEL_ADVISORY};
use crate::parse::{advisory_record, message_content, tool_call_locations};
use crate::{AdvisorySource, LocationExtractor, TripGenerator};

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(6))
            .timeout(config.timeout)
            .build()
            .map_err(|source| UpstreamError::Transport {
                service: AI_GATEWAY,
                source,
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn chat_completion(&self, payload: Value) -> Result<Value, UpstreamError> {
        let api_key = self
            .config
            .ai_api_key
            .as_deref()
            .ok_or(UpstreamError::NotConfigured("ROAM_AI_GATEWAY_KEY"))?;
        let url = format!(
            "{}/v1/chat/completions",
            self.config.ai_base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                service: AI_GATEWAY,
                source,
            })?;

        ensure_success(AI_GATEWAY, response)
            .await?
            .json::<Value>()
            .await
            .map_err(|source| UpstreamError::Transport {
                service: AI_GATEWAY,
                source,
            })
    }
}

impl TripGenerator for HttpGateway {
    #[instrument(skip(self, request), fields(destination = %request.destination, days = request.duration))]
    async fn generate_itinerary(&self, request: &TripRequest) -> Result<String, UpstreamError> {
        let payload = json!({
            "model": self.config.ai_model,
            "messages": [
                { "role": "system", "content": TRIP_SYSTEM_PROMPT },
                { "role": "user", "content": trip_user_prompt(request) }
            ]
        });

        let body = self.chat_completion(payload).await?;
        let itinerary = message_content(&body)?;
        info!(chars = itinerary.len(), "itinerary generated");
        Ok(itinerary)
    }
}

impl LocationExtractor for HttpGateway {
    #[instrument(skip(self, itinerary), fields(chars = itinerary.len()))]
    async fn extract_locations(&self, itinerary: &str) -> Result<Vec<Location>, UpstreamError> {
        let payload = json!({
            "model": self.config.ai_model,
            "messages": [
                { "role": "system", "content": LOCATIONS_SYSTEM_PROMPT },
                { "role": "user", "content": locations_user_prompt(itinerary) }
            ],
            "tools": [extract_locations_tool()],
            "tool_choice": { "type": "function", "function": { "name": EXTRACT_LOCATIONS_TOOL } }
        });

        let body = self.chat_completion(payload).await?;
        let locations = tool_call_locations(&body)?;
        info!(count = locations.len(), "locations extracted");
        Ok(locations)
    }
}

impl AdvisorySource for HttpGateway {
    #[instrument(skip(self))]
    async fn country_advisory(&self, country_code: &str) -> Result<AdvisoryRecord, UpstreamError> {
        let url = format!(
            "{}/api",
            self.config.advisory_base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .get(url)
            .query(&[("countrycode", country_code)])
            .send()
            .await
            .map_err(|source| UpstreamError::Transport {
                service: TRAVEL_ADVISORY,
                source,
            })?;

        let body = ensure_success(TRAVEL_ADVISORY, response)
            .await?
            .json::<Value>()
            .await
            .map_err(|source| UpstreamError::Transport {
                service: TRAVEL_ADVISORY,
                source,
            })?;

        let record = advisory_record(&body, country_code)?;
        info!(country = %record.name, score = record.score, "advisory fetched");
        Ok(record)
    }
}

async fn ensure_success(service: &'static str, response: Response) -> Result<Response, UpstreamError> {
    let status = response.status();
    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(UpstreamError::RateLimited(service)),
        StatusCode::PAYMENT_REQUIRED => Err(UpstreamError::PaymentRequired(service)),
        _ if status.is_success() => Ok(response),
        _ => {
            let body = response.text().await.unwrap_or_default();
            warn!(service, status = status.as_u16(), body = %body, "upstream returned an error status");
            Err(UpstreamError::Status {
                service,
                status: status.as_u16(),
                body,
            })
        }
    }
}
