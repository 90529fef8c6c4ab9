use chrono::{Local, NaiveDateTime};
use tracing::{debug, info};
use vigil_sources::{
    ControllerClient, FetchError, GatewayDeviceClient, ProcessSupervisorClient, UptimeCheckClient,
};
use vigil_types::{ControllerDevice, GatewayDevice, HealthCheck, LogRecord, ReportModel, SupervisorService};

use crate::devices::{
    failed_gateway_devices, inactive_devices, low_battery_controller_devices,
    low_battery_gateway_devices, unassigned_devices,
};
use crate::logs::recurring_log_errors;
use crate::rules::SuppressionRules;
use crate::services::{failed_services, unresolved_checks};

/// Everything one run fetched, before normalization.
#[derive(Debug)]
pub struct SourceSnapshot {
    pub devices: Vec<ControllerDevice>,
    pub log_records: Vec<LogRecord>,
    pub checks: Vec<HealthCheck>,
    pub services: Vec<SupervisorService>,
    pub gateway_devices: Vec<GatewayDevice>,
}

/// Orchestrates one collection-normalization pass over the four sources.
pub struct Aggregator {
    controller: ControllerClient,
    uptime: UptimeCheckClient,
    supervisor: ProcessSupervisorClient,
    gateway: GatewayDeviceClient,
    rules: SuppressionRules,
}

impl Aggregator {
    pub fn new(
        controller: ControllerClient,
        uptime: UptimeCheckClient,
        supervisor: ProcessSupervisorClient,
        gateway: GatewayDeviceClient,
        rules: SuppressionRules,
    ) -> Self {
        Self {
            controller,
            uptime,
            supervisor,
            gateway,
            rules,
        }
    }

    /// One full pipeline run: fetch everything, normalize, assemble.
    ///
    /// The fetches run concurrently but the set is fixed to the known
    /// sources; all of them settle before any error is raised, and the
    /// first failure then aborts the run with no partial report.
    pub async fn run(&self) -> Result<ReportModel, FetchError> {
        let (devices, log_records, checks, services, gateway_devices) = tokio::join!(
            self.controller.fetch_devices(),
            self.controller.fetch_log_records(),
            self.uptime.fetch_checks(),
            self.supervisor.fetch_services(),
            self.gateway.fetch_devices(),
        );

        let snapshot = SourceSnapshot {
            devices: devices?,
            log_records: log_records?,
            checks: checks?,
            services: services?,
            gateway_devices: gateway_devices?,
        };

        debug!(
            devices = snapshot.devices.len(),
            log_records = snapshot.log_records.len(),
            checks = snapshot.checks.len(),
            services = snapshot.services.len(),
            gateway_devices = snapshot.gateway_devices.len(),
            "All sources fetched"
        );

        let now = Local::now().naive_local();
        let report = assemble(&snapshot, &self.rules, now);

        info!(anomalies = report.total_anomalies(), "Report assembled");
        Ok(report)
    }
}

/// Normalize a fetched snapshot into the report model.
///
/// Pure function of its inputs; category order is fixed and independent of
/// how the fetches completed. The two low-battery variants merge into one
/// category, controller devices first.
pub fn assemble(
    snapshot: &SourceSnapshot,
    rules: &SuppressionRules,
    now: NaiveDateTime,
) -> ReportModel {
    let mut low_battery = low_battery_controller_devices(&snapshot.devices, rules);
    low_battery.extend(low_battery_gateway_devices(
        &snapshot.gateway_devices,
        rules.low_battery_threshold,
    ));

    ReportModel {
        inactive_devices: inactive_devices(&snapshot.devices, rules, now),
        low_battery_devices: low_battery,
        unassigned_devices: unassigned_devices(&snapshot.devices),
        failed_gateway_devices: failed_gateway_devices(&snapshot.gateway_devices),
        failed_checks: unresolved_checks(&snapshot.checks),
        failed_services: failed_services(&snapshot.services),
        log_errors: recurring_log_errors(&snapshot.log_records, rules),
    }
}
