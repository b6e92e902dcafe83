use thiserror::Error;

pub const AI_GATEWAY: &str = "ai gateway";
pub const TRAVEL_ADVISORY: &str = "travel advisory";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
    #[error("{0} rate limit exceeded")]
    RateLimited(&'static str),
    #[error("{0} payment required")]
    PaymentRequired(&'static str),
    #[error("{service} returned status {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },
    #[error("no advisory data for country {0}")]
    NotFound(String),
    #[error("{service} request failed")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} response could not be decoded")]
    Decode {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed {service} response: {detail}")]
    Malformed {
        service: &'static str,
        detail: String,
    },
}

impl UpstreamError {
    pub(crate) fn malformed(service: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed {
            service,
            detail: detail.into(),
        }
    }

    /// Display text of this error followed by each of its sources.
    pub fn detail(&self) -> String {
        let mut text = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            text.push_str(": ");
            text.push_str(&cause.to_string());
            source = cause.source();
        }
        text
    }
}
