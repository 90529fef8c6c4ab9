use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use vigil_types::SupervisorService;

use crate::error::{FetchError, Result};
use crate::http;

/// Client for the process supervisor's XML status endpoint.
pub struct ProcessSupervisorClient {
    client: Client,
    status_url: String,
    timeout: Duration,
}

/// Root of the supervisor status document; everything but the service
/// entries (platform info, server block) is skipped during decoding.
#[derive(Debug, Deserialize)]
struct SupervisorStatus {
    #[serde(rename = "service", default)]
    services: Vec<SupervisorService>,
}

impl ProcessSupervisorClient {
    pub fn new(status_url: String) -> Self {
        Self {
            client: Client::new(),
            status_url,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch every supervised service, regardless of type or state.
    pub async fn fetch_services(&self) -> Result<Vec<SupervisorService>> {
        let body = http::get(&self.client, &self.status_url, None, self.timeout).await?;
        Self::parse_services(&body, &self.status_url)
    }

    fn parse_services(body: &str, url: &str) -> Result<Vec<SupervisorService>> {
        let status: SupervisorStatus =
            quick_xml::de::from_str(body).map_err(|e| FetchError::payload(url, e.to_string()))?;

        Ok(status.services)
    }
}
