use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;
use vigil_types::{ControllerDevice, LogRecord};

use crate::error::{FetchError, Result};
use crate::http;

/// Client for the home-automation controller's JSON API.
///
/// Serves two endpoints: the full device list and the error log. Neither
/// requires a credential.
pub struct ControllerClient {
    client: Client,
    devices_url: String,
    log_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct DevicesPayload {
    result: Option<Vec<ControllerDevice>>,
}

#[derive(Debug, Deserialize)]
struct LogPayload {
    result: Option<Vec<LogRecord>>,
}

impl ControllerClient {
    pub fn new(devices_url: String, log_url: String) -> Self {
        Self {
            client: Client::new(),
            devices_url,
            log_url,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch the full device list.
    pub async fn fetch_devices(&self) -> Result<Vec<ControllerDevice>> {
        let body = http::get(&self.client, &self.devices_url, None, self.timeout).await?;
        Self::parse_devices(&body, &self.devices_url)
    }

    /// Fetch the raw error-log entries.
    ///
    /// The controller omits the records container entirely when the log is
    /// empty; that degrades to an empty list instead of failing the run.
    pub async fn fetch_log_records(&self) -> Result<Vec<LogRecord>> {
        let body = http::get(&self.client, &self.log_url, None, self.timeout).await?;
        Self::parse_log_records(&body, &self.log_url)
    }

    fn parse_devices(body: &str, url: &str) -> Result<Vec<ControllerDevice>> {
        let payload: DevicesPayload =
            serde_json::from_str(body).map_err(|e| FetchError::payload(url, e.to_string()))?;

        payload
            .result
            .ok_or_else(|| FetchError::payload(url, "missing \"result\" key"))
    }

    fn parse_log_records(body: &str, url: &str) -> Result<Vec<LogRecord>> {
        let payload: LogPayload =
            serde_json::from_str(body).map_err(|e| FetchError::payload(url, e.to_string()))?;

        Ok(payload.result.unwrap_or_else(|| {
            warn!(target: "source_client", url = %url, "Log payload has no records container, treating as empty");
            Vec::new()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://controller.local/json.htm";

    #[test]
    fn test_parse_devices() {
        let body = r#"{
            "status": "OK",
            "result": [
                {"idx": "1", "Name": "Sensor A", "LastUpdate": "2024-03-01 08:00:00", "PlanID": "2"},
                {"idx": "2", "Name": "Sensor B", "LastUpdate": "2024-03-02 09:30:00", "BatteryLevel": 15, "PlanID": "0"}
            ]
        }"#;

        let devices = ControllerClient::parse_devices(body, URL).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].idx, "1");
        assert_eq!(devices[1].battery_level, Some(15));
    }

    #[test]
    fn test_parse_devices_missing_result_is_an_error() {
        let err = ControllerClient::parse_devices(r#"{"status": "OK"}"#, URL).unwrap_err();
        assert!(matches!(err, FetchError::Payload { .. }));
        assert!(err.to_string().contains("result"));
    }

    #[test]
    fn test_parse_devices_rejects_non_json() {
        let err = ControllerClient::parse_devices("<html>gateway timeout</html>", URL).unwrap_err();
        assert!(matches!(err, FetchError::Payload { .. }));
    }

    #[test]
    fn test_parse_log_records() {
        let body = r#"{"result": [
            {"message": "2024-01-01 00:00:00.000  Error: disk full on /tmp"},
            {"message": "2024-01-01 00:00:01.000  Error: disk full on /tmp"}
        ]}"#;

        let records = ControllerClient::parse_log_records(body, URL).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_log_records_degrades_to_empty() {
        // An empty log has no "result" key at all; that is not an error.
        let records = ControllerClient::parse_log_records("{}", URL).unwrap();
        assert!(records.is_empty());
    }
}
