//! Airsense daemon
//!
//! Reads JSON air quality readings from an ESP32 sensor hub over USB serial,
//! keeps a bounded in-memory history, forwards accepted readings to a
//! time-series sink, and serves the data plus an AI-advice proxy over HTTP.
//!
//! The serial device can be given explicitly with `--device`; otherwise the
//! daemon scans serial ports for a known USB-serial bridge. `--mock` runs the
//! API without hardware (the cache simply stays empty).

mod advisor;
mod api;
mod cache;
mod forward;
mod ingest;

use advisor::AdvisorClient;
use airsense_core::{default_config_path, AirsenseError, StaticConfig};
use airsense_hardware::{locate_sensor_hub, open_transport, LineDecoder};
use anyhow::Result;
use api::AppState;
use cache::ReadingCache;
use clap::Parser;
use forward::{Forwarder, NullForwarder, ThingSpeakForwarder};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Airsense API Server
#[derive(Parser, Debug)]
#[command(name = "airsensed")]
#[command(version, about = "Airsense collector daemon", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server bind address
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Run without hardware (API serves an empty cache)
    #[arg(long)]
    mock: bool,

    /// Serial device path (e.g., /dev/ttyUSB0); skips discovery
    #[arg(long)]
    device: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose);

    info!("Airsense daemon starting...");

    // Determine config path: CLI flag > env var > default
    let config_path = args.config.unwrap_or_else(|| {
        std::env::var("AIRSENSE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_config_path())
    });

    let config = load_config(&config_path).await?;

    // Step 1: resolve the serial device
    let device = if args.mock {
        info!("Mock mode: running without a sensor hub");
        None
    } else if let Some(device) = args.device.or_else(|| config.serial.device.clone()) {
        info!("Using configured serial device: {}", device);
        Some(device)
    } else {
        match locate_sensor_hub() {
            Ok(device) => {
                info!("Sensor hub found at: {}", device);
                Some(device)
            }
            Err(AirsenseError::DeviceNotFound) => {
                error!(
                    "No sensor hub detected. Check the USB connection, or use \
                     --device to name the port or --mock to run without hardware."
                );
                std::process::exit(1);
            }
            Err(e) => {
                error!("Serial port enumeration failed: {}", e);
                std::process::exit(1);
            }
        }
    };

    // Step 2: open the transport (the ingestion loop takes exclusive ownership)
    let read_timeout = Duration::from_millis(config.serial.read_timeout_ms);
    let transport = match &device {
        Some(path) => Some(open_transport(path, config.serial.baud_rate, read_timeout)?),
        None => None,
    };

    // Step 3: construct shared components and wire them explicitly
    let cache = ReadingCache::new(config.cache.history_capacity);
    info!(
        "Reading cache ready (capacity {})",
        config.cache.history_capacity
    );

    let forwarder: Arc<dyn Forwarder> = if args.mock || !config.sink.enabled {
        info!("Sink forwarding disabled");
        Arc::new(NullForwarder)
    } else {
        info!("Forwarding accepted readings to {}", config.sink.url);
        Arc::new(ThingSpeakForwarder::from_config(&config))
    };

    let advisor = AdvisorClient::from_config(&config.advisor);

    // Step 4: start the ingestion loop
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ingest_handle = transport.map(|stream| {
        let decoder = LineDecoder::new(stream, read_timeout);
        tokio::spawn(ingest::run_ingest(
            decoder,
            cache.clone(),
            forwarder,
            shutdown_rx,
        ))
    });

    // Step 5: serve the API
    let state = AppState::new(cache, advisor, device);
    let app = api::create_router(state);

    let port = args.port.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", args.bind, port);
    info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Airsense API listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop ingestion and release the transport before exiting
    let _ = shutdown_tx.send(true);
    if let Some(handle) = ingest_handle {
        if let Err(e) = handle.await {
            warn!("Ingestion task ended abnormally: {}", e);
        }
    }

    info!("Daemon shutdown complete");
    Ok(())
}

/// Load the static configuration, falling back to defaults when the file does
/// not exist.
async fn load_config(path: &Path) -> Result<StaticConfig> {
    if path.exists() {
        info!("Configuration file: {}", path.display());
        let content = tokio::fs::read_to_string(path).await?;
        let config = StaticConfig::from_toml(&content)
            .map_err(|e| AirsenseError::Config(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    } else {
        info!(
            "No configuration file at {}, using defaults",
            path.display()
        );
        Ok(StaticConfig::default())
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
