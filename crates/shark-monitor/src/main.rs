mod report;
mod shutdown;

use anyhow::Result;
use clap::Parser;
use shark_alert::{AlertMonitor, DashboardView, MonitorMetrics, RandomSource};
use shark_config::{ConfigLoader, SharkConfig};
use shark_logging::LogFormat;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::report::{summary_line, StatusTracker};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing monitor.toml
    #[arg(short, long, default_value = "./config")]
    config_dir: PathBuf,

    /// Refresh interval in seconds, overrides the config file
    #[arg(short, long)]
    interval: Option<u64>,

    /// Refresh once, print the dashboard as JSON and exit
    #[arg(long)]
    once: bool,

    /// Also print Prometheus metrics (with --once)
    #[arg(long, requires = "once")]
    metrics: bool,

    /// Log format: pretty or json
    #[arg(long)]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ConfigLoader::new(&args.config_dir).load()?;
    if let Some(interval) = args.interval {
        config.monitor.refresh_interval_secs = interval;
    }
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }
    ConfigLoader::validate(&config)?;

    shark_logging::init_logging(&config.logging)?;
    info!(
        name = %config.system.name,
        version = %config.system.version,
        config_dir = %args.config_dir.display(),
        "Starting alert monitor"
    );

    let mut monitor = build_monitor(&config)?;
    if config.monitor.backfill_on_start {
        monitor.backfill().await?;
    }

    if args.once {
        return run_once(monitor, args.metrics).await;
    }

    run(monitor, config.monitor.refresh_period()).await
}

fn build_monitor(config: &SharkConfig) -> Result<AlertMonitor> {
    let source = RandomSource::new(config.simulation.clone())?;
    let monitor = AlertMonitor::new(config.alerts.clone(), Box::new(source))?
        .with_window_capacity(config.monitor.window_capacity)?;
    Ok(monitor)
}

async fn run_once(mut monitor: AlertMonitor, with_metrics: bool) -> Result<()> {
    monitor.refresh().await?;
    let snapshot = monitor.snapshot();

    let view = DashboardView::from_snapshot(&snapshot);
    println!("{}", serde_json::to_string_pretty(&view)?);

    if with_metrics {
        let mut metrics = MonitorMetrics::new()?;
        metrics.observe(&snapshot);
        print!("{}", metrics.export()?);
    }
    Ok(())
}

async fn run(monitor: AlertMonitor, period: Duration) -> Result<()> {
    let handle = monitor.spawn(period)?;
    let mut updates = handle.subscribe();
    let mut tracker = StatusTracker::new();
    let mut metrics = MonitorMetrics::new()?;

    let shutdown = shutdown::wait_for_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            signal = &mut shutdown => {
                signal?;
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    warn!("Monitor task ended unexpectedly");
                    break;
                }

                let snapshot = updates.borrow_and_update().clone();
                debug!("{}", summary_line(&snapshot));
                metrics.observe(&snapshot);
                match metrics.export() {
                    Ok(text) => debug!(metrics = %text, "Metrics updated"),
                    Err(e) => warn!(error = %e, "Failed to export metrics"),
                }
                for change in tracker.update(&snapshot) {
                    change.log();
                }
            }
        }
    }

    let monitor = handle.shutdown().await?;
    info!(generation = monitor.generation(), "Alert monitor stopped");
    Ok(())
}
