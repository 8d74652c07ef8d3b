//! netwatch daemon: watches backend reachability and logs recovery activity.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use netwatch::config::{self, MonitorConfig};
use netwatch::lifecycle::{self, Shutdown};
use netwatch::notify::LogNotifier;
use netwatch::observability;
use netwatch::probe::HttpProbe;
use netwatch::NetworkMonitor;

#[derive(Parser, Debug)]
#[command(name = "netwatch", about = "Network reachability monitor")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the probe endpoint URL.
    #[arg(long)]
    probe_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => MonitorConfig::default(),
    };
    if let Some(url) = args.probe_url {
        config.probe.url = url;
    }

    observability::init_logging(&config.observability.log_filter);

    tracing::info!(
        probe_url = %config.probe.url,
        probe_timeout_secs = config.probe.timeout_secs,
        max_attempts = config.retry.max_attempts,
        audit_interval_secs = config.audit.interval_secs,
        "netwatch v0.1.0 starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let probe = Arc::new(HttpProbe::new(
        config.probe.url.clone(),
        Duration::from_secs(config.probe.timeout_secs),
    ));

    let monitor = NetworkMonitor::builder(probe)
        .notifier(Arc::new(LogNotifier))
        .policy(config.retry.to_policy())
        .audit_enabled(config.audit.enabled)
        .audit_interval(Duration::from_secs(config.audit.interval_secs))
        .spawn();

    let shutdown = Shutdown::new();
    lifecycle::wait_for_signal(&shutdown).await;

    monitor.dispose();
    tracing::info!("Shutdown complete");
    Ok(())
}
