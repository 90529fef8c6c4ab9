pub mod aggregator;
pub mod devices;
pub mod logs;
pub mod rules;
pub mod services;

pub use aggregator::{assemble, Aggregator, SourceSnapshot};
pub use devices::{
    failed_gateway_devices, inactive_devices, low_battery_controller_devices,
    low_battery_gateway_devices, unassigned_devices,
};
pub use logs::recurring_log_errors;
pub use rules::SuppressionRules;
pub use services::{failed_services, unresolved_checks};
