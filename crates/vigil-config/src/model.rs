use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub mail: MailConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Endpoint and credential settings for the four polled backends.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub controller: ControllerSourceConfig,

    #[serde(default)]
    pub uptime: UptimeSourceConfig,

    #[serde(default)]
    pub supervisor: SupervisorSourceConfig,

    #[serde(default)]
    pub gateway: GatewaySourceConfig,
}

/// Automation controller endpoints (device list and error log).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ControllerSourceConfig {
    pub devices_url: String,
    pub log_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Uptime-check service endpoint; the API key goes into the request header.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UptimeSourceConfig {
    pub checks_url: String,
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Process supervisor XML status endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupervisorSourceConfig {
    pub status_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Gateway device registry endpoint; the session token goes into the header.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewaySourceConfig {
    pub devices_url: String,
    pub session_token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Raw suppression-rule settings, compiled into `SuppressionRules` before a run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RulesConfig {
    /// Device ids never reported as inactive.
    #[serde(default)]
    pub ignored_device_ids: Vec<String>,

    /// Per-device inactivity timeout overrides, in days.
    #[serde(default)]
    pub timeout_overrides: HashMap<String, i64>,

    /// Opt-in set: only these controller devices are battery-checked.
    #[serde(default)]
    pub low_battery_device_ids: Vec<String>,

    #[serde(default = "default_low_battery_threshold")]
    pub low_battery_threshold: u8,

    /// Regex patterns; a log line whose key matches any of them is dropped.
    #[serde(default)]
    pub ignored_log_patterns: Vec<String>,

    #[serde(default = "default_timeout_days")]
    pub default_timeout_days: i64,
}

/// SMTP delivery settings for the rendered report.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_mail_subject")]
    pub subject: String,

    #[serde(default)]
    pub from: String,

    #[serde(default)]
    pub to: String,

    #[serde(default)]
    pub server: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

/// Report artifact settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_low_battery_threshold() -> u8 {
    20
}

fn default_timeout_days() -> i64 {
    3
}

fn default_mail_subject() -> String {
    "Home infrastructure anomaly report".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_output_path() -> PathBuf {
    PathBuf::from("rendered.html")
}

impl Default for ControllerSourceConfig {
    fn default() -> Self {
        Self {
            devices_url: String::new(),
            log_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UptimeSourceConfig {
    fn default() -> Self {
        Self {
            checks_url: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SupervisorSourceConfig {
    fn default() -> Self {
        Self {
            status_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for GatewaySourceConfig {
    fn default() -> Self {
        Self {
            devices_url: String::new(),
            session_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            ignored_device_ids: Vec::new(),
            timeout_overrides: HashMap::new(),
            low_battery_device_ids: Vec::new(),
            low_battery_threshold: default_low_battery_threshold(),
            ignored_log_patterns: Vec::new(),
            default_timeout_days: default_timeout_days(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            subject: default_mail_subject(),
            from: String::new(),
            to: String::new(),
            server: String::new(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}
