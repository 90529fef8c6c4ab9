use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::raw::controller_time;

/// Status placeholder for failed services: the supervisor exposes only a
/// numeric status code, no human-readable string.
pub const UNKNOWN_SERVICE_STATUS: &str = "??";

/// A device that has not reported within its inactivity timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InactiveDevice {
    pub idx: String,
    pub name: String,
    #[serde(with = "controller_time")]
    pub last_update: NaiveDateTime,
}

/// A battery-powered device below the configured charge threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowBatteryDevice {
    pub id: String,
    pub name: String,
    pub level: u8,
}

/// A controller device not assigned to any room plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnassignedDevice {
    pub idx: String,
    pub name: String,
}

/// A gateway node the gateway itself marks as failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedGatewayDevice {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
}

/// An uptime check that is not currently up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedCheck {
    pub name: String,
    pub status: String,
}

/// A supervised process in a non-zero status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedService {
    pub name: String,
    pub status: String,
}

/// A recurring error-log line and how often it occurred.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogError {
    pub text: String,
    pub count: u64,
}

/// The consolidated anomaly report for one pipeline run.
///
/// Seven ordered category lists; immutable once assembled, valid for a
/// single run only. Each category keeps the ordering rule of the
/// normalizer that produced it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportModel {
    /// Sorted ascending by last update (most stale first).
    pub inactive_devices: Vec<InactiveDevice>,

    /// Controller devices first, then gateway devices, source order within.
    pub low_battery_devices: Vec<LowBatteryDevice>,

    /// Sorted ascending by device idx as a string.
    pub unassigned_devices: Vec<UnassignedDevice>,

    /// Gateway source order.
    pub failed_gateway_devices: Vec<FailedGatewayDevice>,

    /// Uptime-check source order.
    pub failed_checks: Vec<FailedCheck>,

    /// Supervisor source order.
    pub failed_services: Vec<FailedService>,

    /// Sorted descending by occurrence count, ties in first-seen order.
    pub log_errors: Vec<LogError>,
}

impl ReportModel {
    /// Total number of anomaly entries across all categories.
    pub fn total_anomalies(&self) -> usize {
        self.inactive_devices.len()
            + self.low_battery_devices.len()
            + self.unassigned_devices.len()
            + self.failed_gateway_devices.len()
            + self.failed_checks.len()
            + self.failed_services.len()
            + self.log_errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_anomalies() == 0
    }
}
