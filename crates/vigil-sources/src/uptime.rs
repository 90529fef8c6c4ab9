use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use vigil_types::HealthCheck;

use crate::error::{FetchError, Result};
use crate::http;

/// Header carrying the uptime-check service's pre-obtained API key.
const API_KEY_HEADER: &str = "X-Api-Key";

/// Client for the external uptime-check service.
pub struct UptimeCheckClient {
    client: Client,
    checks_url: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ChecksPayload {
    checks: Option<Vec<HealthCheck>>,
}

impl UptimeCheckClient {
    pub fn new(checks_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            checks_url,
            api_key,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch all configured checks, up or not.
    pub async fn fetch_checks(&self) -> Result<Vec<HealthCheck>> {
        let body = http::get(
            &self.client,
            &self.checks_url,
            Some((API_KEY_HEADER, &self.api_key)),
            self.timeout,
        )
        .await?;

        Self::parse_checks(&body, &self.checks_url)
    }

    fn parse_checks(body: &str, url: &str) -> Result<Vec<HealthCheck>> {
        let payload: ChecksPayload =
            serde_json::from_str(body).map_err(|e| FetchError::payload(url, e.to_string()))?;

        payload
            .checks
            .ok_or_else(|| FetchError::payload(url, "missing \"checks\" key"))
    }
}
