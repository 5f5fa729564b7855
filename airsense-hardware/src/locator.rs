//! Sensor hub discovery over serial port enumeration
//!
//! The hub shows up as a USB-serial bridge (CP210x or CH340); discovery scans
//! the host's serial ports and returns the first one whose USB vendor/product
//! pair matches a known bridge. Enumeration never opens a port.

use airsense_core::{AirsenseError, Result, UsbBridge};
use std::time::Duration;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{debug, error};

/// One candidate serial device produced by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortCandidate {
    /// OS-level device path, e.g. `/dev/ttyUSB0`
    pub device: String,
    /// USB vendor id
    pub vid: u16,
    /// USB product id
    pub pid: u16,
}

impl PortCandidate {
    pub fn new(device: impl Into<String>, vid: u16, pid: u16) -> Self {
        Self {
            device: device.into(),
            vid,
            pid,
        }
    }
}

/// Return the first candidate matching a known USB-serial bridge.
///
/// Candidates are scanned in enumeration order; the first match wins.
pub fn first_known_bridge(candidates: &[PortCandidate]) -> Option<&PortCandidate> {
    candidates
        .iter()
        .find(|c| UsbBridge::matches(c.vid, c.pid).is_some())
}

/// Locate the sensor hub by scanning available serial ports.
///
/// Returns the device path of the first port whose USB VID/PID matches a known
/// bridge chip, or `Err(DeviceNotFound)` when no port matches. Absence of a
/// device is a valid result; the caller decides whether to fail startup or
/// retry.
pub fn locate_sensor_hub() -> Result<String> {
    debug!("Scanning serial ports for a sensor hub...");

    let ports = tokio_serial::available_ports().map_err(|e| {
        error!("Failed to enumerate serial ports: {}", e);
        AirsenseError::Serial(format!("Failed to enumerate ports: {}", e))
    })?;

    let candidates: Vec<PortCandidate> = ports
        .into_iter()
        .filter_map(|port| match port.port_type {
            tokio_serial::SerialPortType::UsbPort(info) => {
                debug!(
                    "  {} - USB device VID:{:04X} PID:{:04X}",
                    port.port_name, info.vid, info.pid
                );
                Some(PortCandidate::new(port.port_name, info.vid, info.pid))
            }
            _ => None,
        })
        .collect();

    match first_known_bridge(&candidates) {
        Some(candidate) => {
            if let Some(bridge) = UsbBridge::matches(candidate.vid, candidate.pid) {
                debug!("Found {} at: {}", bridge.name(), candidate.device);
            }
            Ok(candidate.device.clone())
        }
        None => {
            debug!("No sensor hub detected");
            Err(AirsenseError::DeviceNotFound)
        }
    }
}

/// Open the serial transport to the hub.
///
/// 8N1 framing, no flow control. The returned stream is exclusively owned by
/// the ingestion loop.
pub fn open_transport(path: &str, baud_rate: u32, timeout: Duration) -> Result<SerialStream> {
    debug!("Opening serial port: {}", path);

    let stream = tokio_serial::new(path, baud_rate)
        .timeout(timeout)
        .data_bits(tokio_serial::DataBits::Eight)
        .parity(tokio_serial::Parity::None)
        .stop_bits(tokio_serial::StopBits::One)
        .flow_control(tokio_serial::FlowControl::None)
        .open_native_async()
        .map_err(|e| {
            error!("Failed to open serial port {}: {}", path, e);
            AirsenseError::Serial(format!("Failed to open serial port: {}", e))
        })?;

    debug!("Serial port opened successfully");
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins_in_enumeration_order() {
        let candidates = vec![
            PortCandidate::new("X", 0x10C4, 0xEA60),
            PortCandidate::new("Y", 0x1A86, 0x7523),
        ];

        let found = first_known_bridge(&candidates).unwrap();
        assert_eq!(found.device, "X");
    }

    #[test]
    fn test_unknown_candidates_yield_none() {
        let candidates = vec![PortCandidate::new("Z", 1, 1)];
        assert!(first_known_bridge(&candidates).is_none());
    }

    #[test]
    fn test_known_bridge_after_unknown_ports() {
        let candidates = vec![
            PortCandidate::new("hub-internal", 0x8087, 0x0A2B),
            PortCandidate::new("/dev/ttyUSB3", 0x1A86, 0x7523),
        ];

        let found = first_known_bridge(&candidates).unwrap();
        assert_eq!(found.device, "/dev/ttyUSB3");
    }

    #[test]
    fn test_empty_enumeration_yields_none() {
        assert!(first_known_bridge(&[]).is_none());
    }

    #[test]
    fn test_available_ports_does_not_panic() {
        // Hardware-independent smoke test
        let _ = tokio_serial::available_ports();
    }
}
