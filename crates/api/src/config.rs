use std::env;
use std::time::Duration;

use roam_gateway::GatewayConfig;

pub const DEFAULT_API_KEY: &str = "dev-roam-key";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: String,
    pub api_key: String,
    pub rate_limit_window: Duration,
    pub rate_limit_max: usize,
    pub gateway: GatewayConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            rate_limit_window: Duration::from_secs(60),
            rate_limit_max: 60,
            gateway: GatewayConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            bind: env::var("ROAM_BIND").unwrap_or(defaults.bind),
            api_key: env::var("ROAM_API_KEY")
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or(defaults.api_key),
            rate_limit_window: env::var("ROAM_RATE_LIMIT_WINDOW_SECONDS")
                .ok()
                .and_then(|value| value.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.rate_limit_window),
            rate_limit_max: env::var("ROAM_RATE_LIMIT_MAX")
                .ok()
                .and_then(|value| value.parse::<usize>().ok())
                .unwrap_or(defaults.rate_limit_max),
            gateway: GatewayConfig::from_env(),
        }
    }

    /// Offline configuration backed by the fixture upstream.
    pub fn fixture() -> Self {
        Self {
            gateway: GatewayConfig::fixture(),
            ..Self::default()
        }
    }
}
