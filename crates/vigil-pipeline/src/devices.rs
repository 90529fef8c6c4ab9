use chrono::NaiveDateTime;
use vigil_types::{
    ControllerDevice, FailedGatewayDevice, GatewayDevice, InactiveDevice, LowBatteryDevice,
    UnassignedDevice, BATTERY_DEVICE_TYPE, UNASSIGNED_PLAN_ID,
};

use crate::rules::SuppressionRules;

/// Controller devices that have been silent for at least their effective
/// timeout, ignored devices excluded. Sorted most stale first.
///
/// The day difference is the floor of the elapsed duration: a device is
/// flagged once it has been silent for N *full* days.
pub fn inactive_devices(
    devices: &[ControllerDevice],
    rules: &SuppressionRules,
    now: NaiveDateTime,
) -> Vec<InactiveDevice> {
    let mut inactive: Vec<InactiveDevice> = devices
        .iter()
        .filter(|d| !rules.ignored_device_ids.contains(&d.idx))
        .filter(|d| {
            let silent_days = now.signed_duration_since(d.last_update).num_days();
            silent_days >= rules.effective_timeout(&d.idx)
        })
        .map(|d| InactiveDevice {
            idx: d.idx.clone(),
            name: d.name.clone(),
            last_update: d.last_update,
        })
        .collect();

    inactive.sort_by_key(|d| d.last_update);
    inactive
}

/// Controller devices from the opt-in battery set whose charge is below the
/// threshold. Devices outside the set are never flagged; devices without a
/// reported battery level are never flagged. Input order preserved.
pub fn low_battery_controller_devices(
    devices: &[ControllerDevice],
    rules: &SuppressionRules,
) -> Vec<LowBatteryDevice> {
    devices
        .iter()
        .filter(|d| rules.low_battery_device_ids.contains(&d.idx))
        .filter_map(|d| {
            d.battery_level
                .filter(|level| *level < rules.low_battery_threshold)
                .map(|level| LowBatteryDevice {
                    id: d.idx.clone(),
                    name: d.name.clone(),
                    level,
                })
        })
        .collect()
}

/// Battery-type gateway devices whose charge is below the threshold.
/// Input order preserved.
pub fn low_battery_gateway_devices(
    devices: &[GatewayDevice],
    threshold: u8,
) -> Vec<LowBatteryDevice> {
    devices
        .iter()
        .filter(|d| d.device_type.as_deref() == Some(BATTERY_DEVICE_TYPE))
        .filter_map(|d| {
            d.metrics
                .level
                .filter(|level| *level < threshold)
                .map(|level| LowBatteryDevice {
                    id: d.node_id.to_string(),
                    name: d.metrics.title.clone(),
                    level,
                })
        })
        .collect()
}

/// Controller devices not assigned to any room plan, sorted ascending by
/// idx as a string (idx is an identifier, not guaranteed numeric).
pub fn unassigned_devices(devices: &[ControllerDevice]) -> Vec<UnassignedDevice> {
    let mut unassigned: Vec<UnassignedDevice> = devices
        .iter()
        .filter(|d| d.plan_id == UNASSIGNED_PLAN_ID)
        .map(|d| UnassignedDevice {
            idx: d.idx.clone(),
            name: d.name.clone(),
        })
        .collect();

    unassigned.sort_by(|a, b| a.idx.cmp(&b.idx));
    unassigned
}

/// Gateway devices the gateway itself marks as failed. Input order preserved.
pub fn failed_gateway_devices(devices: &[GatewayDevice]) -> Vec<FailedGatewayDevice> {
    devices
        .iter()
        .filter(|d| d.metrics.is_failed)
        .map(|d| FailedGatewayDevice {
            id: d.node_id,
            name: d.metrics.title.clone(),
            location: d.location_name.clone(),
        })
        .collect()
}
