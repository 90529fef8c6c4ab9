pub mod loader;
pub mod model;

pub use loader::ConfigLoader;
pub use model::{
    AppConfig, ControllerSourceConfig, GatewaySourceConfig, MailConfig, ReportConfig, RulesConfig,
    SourcesConfig, SupervisorSourceConfig, UptimeSourceConfig,
};
