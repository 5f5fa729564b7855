//! airsense-hardware
//!
//! Transport crate for the Airsense sensor hub: locating the device on the
//! USB-serial bus and decoding its newline-delimited JSON readings. This crate
//! is intended to be used by the daemon; it never touches the cache or the
//! network.
//
//! Public API:
//! - `locator::locate_sensor_hub` — find the hub by USB VID/PID
//! - `locator::open_transport` — open the serial stream
//! - `decoder::LineDecoder` — read and decode one reading per line

pub mod decoder;
pub mod locator;

pub use decoder::{Decoded, LineDecoder};
pub use locator::{locate_sensor_hub, open_transport, PortCandidate};
