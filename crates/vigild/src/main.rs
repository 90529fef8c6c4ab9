use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use vigil_config::ConfigLoader;
use vigil_notify::{EmailNotifier, Notifier};
use vigil_pipeline::{Aggregator, SuppressionRules};
use vigil_report::{render_html, write_report};
use vigil_sources::{
    ControllerClient, GatewayDeviceClient, ProcessSupervisorClient, UptimeCheckClient,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Home infrastructure anomaly report")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "vigil.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let config = ConfigLoader::new(&args.config).load()?;
    ConfigLoader::validate(&config)?;

    // Rules are fully built before any fetch starts and stay read-only.
    let rules = SuppressionRules::from_config(&config.rules)?;

    let sources = &config.sources;
    let controller = ControllerClient::new(
        sources.controller.devices_url.clone(),
        sources.controller.log_url.clone(),
    )
    .with_timeout(Duration::from_secs(sources.controller.timeout_secs));

    let uptime = UptimeCheckClient::new(
        sources.uptime.checks_url.clone(),
        sources.uptime.api_key.clone(),
    )
    .with_timeout(Duration::from_secs(sources.uptime.timeout_secs));

    let supervisor = ProcessSupervisorClient::new(sources.supervisor.status_url.clone())
        .with_timeout(Duration::from_secs(sources.supervisor.timeout_secs));

    let gateway = GatewayDeviceClient::new(
        sources.gateway.devices_url.clone(),
        sources.gateway.session_token.clone(),
    )
    .with_timeout(Duration::from_secs(sources.gateway.timeout_secs));

    let aggregator = Aggregator::new(controller, uptime, supervisor, gateway, rules);
    let report = aggregator.run().await?;

    let html = render_html(&report);
    write_report(&config.report.output_path, &html).await?;

    let notifier = EmailNotifier::new(config.mail.clone());
    if notifier.is_enabled() {
        notifier.send(&config.mail.subject, &html).await?;
    } else {
        info!("Mail delivery disabled, skipping send");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_config_path() {
        let args = Args::try_parse_from(["vigild"]).unwrap();
        assert_eq!(args.config, PathBuf::from("vigil.toml"));
    }

    #[test]
    fn test_args_custom_config_path() {
        let args = Args::try_parse_from(["vigild", "--config", "/etc/vigil/vigil.toml"]).unwrap();
        assert_eq!(args.config, PathBuf::from("/etc/vigil/vigil.toml"));
    }
}
