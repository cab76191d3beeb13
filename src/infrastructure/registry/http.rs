//! HTTP implementation of the registry port
//!
//! One POST per attempt, JSON body, bounded by an explicit timeout so a
//! stalled registry cannot hang the retry loop.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use crate::application::ports::{RegistrationError, RegistryClient};
use crate::domain::ChargerDescriptor;

/// Registry endpoint chargers announce themselves to.
pub const DEFAULT_REGISTRY_URL: &str = "http://10.100.32.197:5012/api/chargers/post";

/// Upper bound for a single registration request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Registry client backed by `reqwest`
#[derive(Debug, Clone)]
pub struct HttpRegistryClient {
    http: reqwest::Client,
    url: String,
}

impl HttpRegistryClient {
    pub fn new(url: impl Into<String>) -> Result<Self, RegistrationError> {
        Self::with_timeout(url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RegistrationError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RegistrationError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn register(&self, descriptor: &ChargerDescriptor) -> Result<(), RegistrationError> {
        let payload = serde_json::to_vec(descriptor)
            .map_err(|e| RegistrationError::Transport(format!("encode descriptor: {e}")))?;
        debug!(
            url = %self.url,
            payload = %String::from_utf8_lossy(&payload),
            "Posting descriptor"
        );

        let response = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| RegistrationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status = %status, error = %e, "Failed to read registry response body");
                String::new()
            }
        };
        debug!(status = %status, body = %body, "Registry responded");

        if status.is_success() {
            Ok(())
        } else {
            Err(RegistrationError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
