use anyhow::{anyhow, Result};
use config::{Config, File, FileFormat};
use std::path::{Path, PathBuf};

use crate::AppConfig;

/// Configuration loader for the anomaly report pipeline.
pub struct ConfigLoader {
    config_path: PathBuf,
}

impl ConfigLoader {
    pub fn new<P: AsRef<Path>>(config_path: P) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Load the application configuration.
    ///
    /// A missing file yields the default configuration, which `validate`
    /// will reject for lack of endpoint URLs.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            return Ok(AppConfig::default());
        }

        let config = Config::builder()
            .add_source(File::new(
                self.config_path
                    .to_str()
                    .ok_or_else(|| anyhow!("Invalid config path"))?,
                FileFormat::Toml,
            ))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Validate a loaded configuration.
    pub fn validate(config: &AppConfig) -> Result<()> {
        if config.sources.controller.devices_url.is_empty() {
            return Err(anyhow!("sources.controller.devices_url is not set"));
        }
        if config.sources.controller.log_url.is_empty() {
            return Err(anyhow!("sources.controller.log_url is not set"));
        }
        if config.sources.uptime.checks_url.is_empty() {
            return Err(anyhow!("sources.uptime.checks_url is not set"));
        }
        if config.sources.supervisor.status_url.is_empty() {
            return Err(anyhow!("sources.supervisor.status_url is not set"));
        }
        if config.sources.gateway.devices_url.is_empty() {
            return Err(anyhow!("sources.gateway.devices_url is not set"));
        }

        if config.rules.default_timeout_days < 1 {
            return Err(anyhow!(
                "rules.default_timeout_days must be at least 1, got {}",
                config.rules.default_timeout_days
            ));
        }

        if config.mail.enabled {
            if config.mail.server.is_empty() {
                return Err(anyhow!("mail.server is required when mail is enabled"));
            }
            if config.mail.from.is_empty() || config.mail.to.is_empty() {
                return Err(anyhow!("mail.from and mail.to are required when mail is enabled"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_default_config_when_absent() {
        let temp_dir = tempdir().unwrap();
        let loader = ConfigLoader::new(temp_dir.path().join("vigil.toml"));

        let config = loader.load().unwrap();
        assert_eq!(config.rules.default_timeout_days, 3);
        assert_eq!(config.rules.low_battery_threshold, 20);
        assert!(!config.mail.enabled);

        // Defaults have no endpoints and must not validate.
        assert!(ConfigLoader::validate(&config).is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_content = r#"
[sources.controller]
devices_url = "http://controller.local/json.htm?type=devices"
log_url = "http://controller.local/json.htm?type=command&param=getlog&loglevel=4"

[sources.uptime]
checks_url = "https://checks.example.org/api/v1/checks/"
api_key = "secret-key"

[sources.supervisor]
status_url = "http://supervisor.local:2812/_status?format=xml"
timeout_secs = 5

[sources.gateway]
devices_url = "http://gateway.local:8083/ZAutomation/api/v1/devices"
session_token = "session-token"

[rules]
ignored_device_ids = ["15", "23"]
low_battery_device_ids = ["4"]
low_battery_threshold = 25
ignored_log_patterns = ["heartbeat timeout"]
default_timeout_days = 5

[rules.timeout_overrides]
"12" = 14

[mail]
enabled = true
subject = "Weekly anomaly report"
from = "vigil@example.org"
to = "admin@example.org"
server = "smtp.example.org"
username = "vigil@example.org"
password = "hunter2"

[report]
output_path = "/var/lib/vigil/rendered.html"
"#;

        let path = temp_dir.path().join("vigil.toml");
        fs::write(&path, config_content).unwrap();

        let loader = ConfigLoader::new(&path);
        let config = loader.load().unwrap();

        assert_eq!(
            config.sources.controller.devices_url,
            "http://controller.local/json.htm?type=devices"
        );
        assert_eq!(config.sources.supervisor.timeout_secs, 5);
        assert_eq!(config.sources.uptime.timeout_secs, 10);
        assert_eq!(config.rules.ignored_device_ids, vec!["15", "23"]);
        assert_eq!(config.rules.timeout_overrides.get("12"), Some(&14));
        assert_eq!(config.rules.low_battery_threshold, 25);
        assert_eq!(config.rules.default_timeout_days, 5);
        assert_eq!(config.mail.subject, "Weekly anomaly report");
        assert_eq!(config.mail.port, 587);
        assert_eq!(
            config.report.output_path.to_str().unwrap(),
            "/var/lib/vigil/rendered.html"
        );

        ConfigLoader::validate(&config).unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_timeout() {
        let temp_dir = tempdir().unwrap();
        let config_content = r#"
[sources.controller]
devices_url = "http://controller.local/devices"
log_url = "http://controller.local/log"

[sources.uptime]
checks_url = "https://checks.example.org/api/v1/checks/"
api_key = "k"

[sources.supervisor]
status_url = "http://supervisor.local/_status?format=xml"

[sources.gateway]
devices_url = "http://gateway.local/devices"
session_token = "t"

[rules]
default_timeout_days = 0
"#;

        let path = temp_dir.path().join("vigil.toml");
        fs::write(&path, config_content).unwrap();

        let config = ConfigLoader::new(&path).load().unwrap();
        let err = ConfigLoader::validate(&config).unwrap_err();
        assert!(err.to_string().contains("default_timeout_days"));
    }

    #[test]
    fn test_validate_rejects_enabled_mail_without_server() {
        let temp_dir = tempdir().unwrap();
        let config_content = r#"
[sources.controller]
devices_url = "http://controller.local/devices"
log_url = "http://controller.local/log"

[sources.uptime]
checks_url = "https://checks.example.org/api/v1/checks/"
api_key = "k"

[sources.supervisor]
status_url = "http://supervisor.local/_status?format=xml"

[sources.gateway]
devices_url = "http://gateway.local/devices"
session_token = "t"

[mail]
enabled = true
"#;

        let path = temp_dir.path().join("vigil.toml");
        fs::write(&path, config_content).unwrap();

        let config = ConfigLoader::new(&path).load().unwrap();
        assert!(ConfigLoader::validate(&config).is_err());
    }
}
