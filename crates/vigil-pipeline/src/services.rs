use vigil_types::{
    FailedCheck, FailedService, HealthCheck, SupervisorService, PROCESS_SERVICE_TYPE,
    UNKNOWN_SERVICE_STATUS,
};

/// Status value of a healthy uptime check.
const STATUS_UP: &str = "up";

/// Uptime checks in any non-up state. Source order preserved; the category
/// has no staleness or severity ordering.
pub fn unresolved_checks(checks: &[HealthCheck]) -> Vec<FailedCheck> {
    checks
        .iter()
        .filter(|c| c.status != STATUS_UP)
        .map(|c| FailedCheck {
            name: c.name.clone(),
            status: c.status.clone(),
        })
        .collect()
}

/// Monitored process-type services with a non-zero status code.
///
/// The supervisor exposes no status string for these, so entries carry the
/// placeholder marker. Source order preserved.
pub fn failed_services(services: &[SupervisorService]) -> Vec<FailedService> {
    services
        .iter()
        .filter(|s| s.service_type == PROCESS_SERVICE_TYPE && s.monitor == 1 && s.status != 0)
        .map(|s| FailedService {
            name: s.name.clone(),
            status: UNKNOWN_SERVICE_STATUS.to_string(),
        })
        .collect()
}
