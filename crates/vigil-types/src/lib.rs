pub mod raw;
pub mod report;

pub use raw::{
    ControllerDevice, GatewayDevice, GatewayMetrics, HealthCheck, LogRecord, SupervisorService,
    BATTERY_DEVICE_TYPE, PROCESS_SERVICE_TYPE, UNASSIGNED_PLAN_ID, ZWAVE_TECHNOLOGY,
};
pub use report::{
    FailedCheck, FailedGatewayDevice, FailedService, InactiveDevice, LogError, LowBatteryDevice,
    ReportModel, UnassignedDevice, UNKNOWN_SERVICE_STATUS,
};
