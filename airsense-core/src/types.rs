//! Core data types for the Airsense collector

use serde::{Deserialize, Serialize};

/// One decoded sensor sample from the hub.
///
/// The firmware emits one JSON object per line. Older firmware revisions omit
/// some fields, so every field is zero-filled on decode rather than failing
/// the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Temperature in degrees Celsius
    #[serde(default)]
    pub temperature: f64,
    /// Relative humidity in percent
    #[serde(default)]
    pub humidity: f64,
    /// Equivalent CO2 in ppm
    #[serde(default)]
    pub eco2: u32,
    /// Total volatile organic compounds in ppb
    #[serde(default)]
    pub tvoc: u32,
    /// Air quality index (1-5, ENS160 scale)
    #[serde(default)]
    pub aqi: u32,
}

impl Reading {
    /// Create a reading with explicit values
    pub fn new(temperature: f64, humidity: f64, eco2: u32, tvoc: u32, aqi: u32) -> Self {
        Self {
            temperature,
            humidity,
            eco2,
            tvoc,
            aqi,
        }
    }
}

/// Why a line from the device failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeReason {
    /// The line was not valid UTF-8
    Encoding,
    /// The line was not a parseable JSON record
    Format,
}

impl std::fmt::Display for DecodeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeReason::Encoding => write!(f, "encoding"),
            DecodeReason::Format => write!(f, "format"),
        }
    }
}
