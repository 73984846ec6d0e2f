//! Prometheus multi-target exporter for Sonus session border controllers.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info};

use sonus_exporter::{ExporterConfig, HttpServer, ProbeHistory, Prober, TimeoutPolicy};

/// Prometheus exporter for Sonus SBCs.
#[derive(Parser, Debug)]
#[command(name = "sonus-exporter")]
#[command(about = "Probe Sonus SBCs and expose their state as Prometheus metrics")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format).
    #[arg(short, long)]
    config: Option<String>,

    /// HTTP listen address (overrides config).
    #[arg(long)]
    listen: Option<String>,

    /// Log level (trace, debug, info, warn, error; overrides config).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = if let Some(config_path) = &args.config {
        ExporterConfig::load_from_file(config_path)?
    } else {
        ExporterConfig::default()
    };

    if let Some(listen) = args.listen {
        config.http.listen = listen;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.apply_env();
    config.validate()?;

    sonus_common::init_tracing(&config.logging, &["sonus_exporter", "sonus_client"])?;

    info!("Starting Sonus exporter");
    if config.device.user.is_empty() {
        info!("No device user configured; set SONUS_USER or device.user");
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let history = Arc::new(ProbeHistory::new(config.probes.history_limit));
    let prober = Arc::new(Prober::from_config(&config, history.clone()));

    let listen_addr = config
        .http
        .listen
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid listen address: {}", e))?;

    let http_server = HttpServer::new(
        prober,
        listen_addr,
        config.http.probe_path.clone(),
        TimeoutPolicy {
            default_secs: config.probes.default_timeout_secs,
            offset_secs: config.probes.timeout_offset_secs,
        },
    );

    let http_shutdown = shutdown_rx.clone();
    let http_task = tokio::spawn(async move {
        if let Err(e) = http_server.run(http_shutdown).await {
            error!("HTTP server error: {}", e);
        }
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate() => {
            info!("Received SIGTERM, shutting down...");
        }
    }

    shutdown_tx.send(true)?;

    if tokio::time::timeout(Duration::from_secs(5), http_task)
        .await
        .is_err()
    {
        error!("HTTP server did not stop within 5s");
    }

    let stats = history.stats();
    info!(
        targets = stats.targets,
        probes = stats.entries,
        failures = stats.failures,
        "Final statistics"
    );

    info!("Exporter stopped");
    Ok(())
}

/// Resolves on SIGTERM; never on platforms without it.
async fn terminate() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                return;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {}", e),
        }
    }
    std::future::pending::<()>().await;
}
