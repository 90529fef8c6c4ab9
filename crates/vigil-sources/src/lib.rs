pub mod controller;
pub mod error;
pub mod gateway;
mod http;
pub mod supervisor;
pub mod uptime;

pub use controller::ControllerClient;
pub use error::{FetchError, Result};
pub use gateway::GatewayDeviceClient;
pub use supervisor::ProcessSupervisorClient;
pub use uptime::UptimeCheckClient;
