use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Technology tag marking a gateway node as in-scope for this system.
pub const ZWAVE_TECHNOLOGY: &str = "Z-Wave";

/// Room-plan sentinel the controller uses for devices not assigned anywhere.
pub const UNASSIGNED_PLAN_ID: &str = "0";

/// Supervisor service type code for plain processes.
pub const PROCESS_SERVICE_TYPE: i32 = 3;

/// Gateway device type for battery-powered nodes.
pub const BATTERY_DEVICE_TYPE: &str = "battery";

/// Timestamp format used by the automation controller API (naive local time).
pub mod controller_time {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// One device snapshot from the automation controller.
///
/// `idx` is the controller's device identifier, unique within a single poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerDevice {
    pub idx: String,

    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "LastUpdate", with = "controller_time")]
    pub last_update: NaiveDateTime,

    /// Battery charge 0-255; absent for mains-powered devices.
    #[serde(rename = "BatteryLevel", default)]
    pub battery_level: Option<u8>,

    /// Room-plan assignment; `"0"` means not assigned to any plan.
    #[serde(rename = "PlanID", default)]
    pub plan_id: String,
}

/// One device snapshot from the gateway's device registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayDevice {
    #[serde(rename = "nodeId")]
    pub node_id: i64,

    #[serde(default)]
    pub technology: String,

    #[serde(rename = "deviceType", default)]
    pub device_type: Option<String>,

    #[serde(rename = "locationName", default)]
    pub location_name: Option<String>,

    #[serde(default)]
    pub metrics: GatewayMetrics,
}

/// Gateway per-device metrics sub-structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayMetrics {
    #[serde(rename = "isFailed", default)]
    pub is_failed: bool,

    #[serde(default)]
    pub title: String,

    /// Battery charge percentage; only battery-type devices report one.
    #[serde(default)]
    pub level: Option<u8>,
}

/// One check from the uptime-check service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub slug: Option<String>,

    /// Check status; anything other than `"up"` is unresolved.
    pub status: String,
}

/// One service entry from the process supervisor's XML status document.
///
/// Field names follow the supervisor's wire format: `type` is an XML
/// attribute, `monitor` and `status` are numeric child elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorService {
    #[serde(rename = "@type", default = "default_service_type")]
    pub service_type: i32,

    #[serde(default)]
    pub name: String,

    /// `1` when the supervisor is actively monitoring the service.
    #[serde(default)]
    pub monitor: u8,

    /// Non-zero means the service is in a failed state.
    #[serde(default)]
    pub status: i64,
}

fn default_service_type() -> i32 {
    -1
}

/// One raw entry from the controller's error log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(default)]
    pub message: String,
}
