use std::env;
use std::time::Duration;

use serde::Serialize;

pub const DEFAULT_AI_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev";
pub const DEFAULT_AI_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_ADVISORY_URL: &str = "https://www.travel-advisory.info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamMode {
    Http,
    Fixture,
}

impl UpstreamMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "http" | "live" => Some(Self::Http),
            "fixture" | "offline" => Some(Self::Fixture),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub mode: UpstreamMode,
    pub ai_base_url: String,
    pub ai_api_key: Option<String>,
    pub ai_model: String,
    pub advisory_base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            mode: UpstreamMode::Http,
            ai_base_url: DEFAULT_AI_GATEWAY_URL.to_string(),
            ai_api_key: None,
            ai_model: DEFAULT_AI_MODEL.to_string(),
            advisory_base_url: DEFAULT_ADVISORY_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl GatewayConfig {
    pub fn fixture() -> Self {
        Self {
            mode: UpstreamMode::Fixture,
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            mode: env::var("ROAM_UPSTREAM")
                .ok()
                .and_then(|value| UpstreamMode::parse(&value))
                .unwrap_or(defaults.mode),
            ai_base_url: non_empty_var("ROAM_AI_GATEWAY_URL").unwrap_or(defaults.ai_base_url),
            ai_api_key: non_empty_var("ROAM_AI_GATEWAY_KEY"),
            ai_model: non_empty_var("ROAM_AI_MODEL").unwrap_or(defaults.ai_model),
            advisory_base_url: non_empty_var("ROAM_ADVISORY_URL")
                .unwrap_or(defaults.advisory_base_url),
            timeout: env::var("ROAM_UPSTREAM_TIMEOUT_SECONDS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mode_aliases() {
        assert_eq!(UpstreamMode::parse(" Fixture "), Some(UpstreamMode::Fixture));
        assert_eq!(UpstreamMode::parse("live"), Some(UpstreamMode::Http));
        assert_eq!(UpstreamMode::parse("mock"), None);
    }
}
