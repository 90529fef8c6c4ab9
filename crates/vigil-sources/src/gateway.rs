use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use vigil_types::{GatewayDevice, ZWAVE_TECHNOLOGY};

use crate::error::{FetchError, Result};
use crate::http;

/// Header carrying the gateway's pre-obtained session token.
const SESSION_HEADER: &str = "ZWaySession";

/// Client for the home-automation gateway's device registry.
///
/// The registry lists nodes of every radio technology the gateway speaks;
/// only Z-Wave nodes are in scope for this system, so the client drops
/// everything else before returning. That is a structural in-scope filter,
/// not a suppression rule.
pub struct GatewayDeviceClient {
    client: Client,
    devices_url: String,
    session_token: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GatewayPayload {
    data: Option<GatewayData>,
}

#[derive(Debug, Deserialize)]
struct GatewayData {
    devices: Option<Vec<GatewayDevice>>,
}

impl GatewayDeviceClient {
    pub fn new(devices_url: String, session_token: String) -> Self {
        Self {
            client: Client::new(),
            devices_url,
            session_token,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch the registry and keep only in-scope (Z-Wave) devices.
    pub async fn fetch_devices(&self) -> Result<Vec<GatewayDevice>> {
        let body = http::get(
            &self.client,
            &self.devices_url,
            Some((SESSION_HEADER, &self.session_token)),
            self.timeout,
        )
        .await?;

        let devices = Self::parse_devices(&body, &self.devices_url)?;
        debug!(target: "source_client", count = devices.len(), "Gateway devices in scope");
        Ok(devices)
    }

    fn parse_devices(body: &str, url: &str) -> Result<Vec<GatewayDevice>> {
        let payload: GatewayPayload =
            serde_json::from_str(body).map_err(|e| FetchError::payload(url, e.to_string()))?;

        let mut devices = payload
            .data
            .ok_or_else(|| FetchError::payload(url, "missing \"data\" key"))?
            .devices
            .ok_or_else(|| FetchError::payload(url, "missing \"data.devices\" key"))?;

        devices.retain(|d| d.technology == ZWAVE_TECHNOLOGY);
        Ok(devices)
    }
}
