//! Continuous ingestion loop
//!
//! Owns the serial transport for the process lifetime: decode a line, offer it
//! to the cache, forward it if accepted. Per-line decode failures and
//! per-reading forward failures are absorbed here and never propagate;
//! transport failures end the loop. The HTTP API keeps serving whatever the
//! cache holds after the loop ends.

use crate::cache::ReadingCache;
use crate::forward::Forwarder;
use airsense_core::AirsenseError;
use airsense_hardware::{Decoded, LineDecoder};
use std::sync::Arc;
use tokio::io::AsyncRead;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Drive the decode/accept/forward loop until the transport fails or shutdown
/// is signalled.
///
/// The transport inside `decoder` is dropped (and released) when this
/// function returns.
pub async fn run_ingest<R: AsyncRead + Unpin>(
    mut decoder: LineDecoder<R>,
    cache: ReadingCache,
    forwarder: Arc<dyn Forwarder>,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!("Ingestion loop started");

    loop {
        let outcome = tokio::select! {
            outcome = decoder.read_one() => outcome,
            _ = shutdown_rx.changed() => {
                info!("Ingestion loop stopping (shutdown signal)");
                return;
            }
        };

        let reading = match outcome {
            Ok(Decoded::Reading(reading)) => reading,
            // No data yet; the decoder's timeout already paces the poll.
            Ok(Decoded::Empty) => continue,
            Err(e) if e.is_decode() => {
                // Expected transiently, e.g. while the hub reboots mid-line.
                warn!("Skipping malformed line: {}", e);
                continue;
            }
            Err(AirsenseError::DeviceDisconnected(msg)) => {
                error!("Sensor hub disconnected, ending ingestion: {}", msg);
                return;
            }
            Err(e) => {
                error!("Transport failure, ending ingestion: {}", e);
                return;
            }
        };

        debug!(
            "Received -> temp: {:.1}C, hum: {:.1}%, eCO2: {}ppm, TVOC: {}ppb, AQI: {}",
            reading.temperature, reading.humidity, reading.eco2, reading.tvoc, reading.aqi
        );

        if cache.accept(reading.clone()).await {
            if let Err(e) = forwarder.forward(&reading).await {
                // Best effort: the reading stays cached, the next one is
                // attempted independently.
                warn!("Forward failed, dropping for forwarding purposes: {}", e);
            }
        } else {
            debug!("Duplicate reading suppressed");
        }
    }
}
