//! Output formatting utilities for the CLI
//!
//! Provides table and JSON formatting with colors.

use airsense_core::api::{HistoryResponse, InfoResponse, LatestResponse};
use airsense_core::Reading;
use anyhow::Result;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

/// Output format options
#[derive(Debug, Clone)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct ReadingRow {
    #[tabled(rename = "Temp (C)")]
    temperature: String,
    #[tabled(rename = "Humidity (%)")]
    humidity: String,
    #[tabled(rename = "eCO2 (ppm)")]
    eco2: u32,
    #[tabled(rename = "TVOC (ppb)")]
    tvoc: u32,
    #[tabled(rename = "AQI")]
    aqi: u32,
}

impl From<&Reading> for ReadingRow {
    fn from(r: &Reading) -> Self {
        Self {
            temperature: format!("{:.1}", r.temperature),
            humidity: format!("{:.1}", r.humidity),
            eco2: r.eco2,
            tvoc: r.tvoc,
            aqi: r.aqi,
        }
    }
}

/// Format the latest-reading response
pub fn format_latest(latest: &LatestResponse, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(latest)?),
        OutputFormat::Table => match &latest.reading {
            Some(reading) => {
                let table = Table::new([ReadingRow::from(reading)])
                    .with(Style::rounded())
                    .to_string();
                Ok(table)
            }
            None => Ok("No reading available yet".yellow().to_string()),
        },
    }
}

/// Format the history response, oldest first
pub fn format_history(history: &HistoryResponse, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(history)?),
        OutputFormat::Table => {
            if history.readings.is_empty() {
                return Ok("No readings cached yet".yellow().to_string());
            }

            let rows: Vec<ReadingRow> = history.readings.iter().map(ReadingRow::from).collect();
            let table = Table::new(rows).with(Style::rounded()).to_string();
            Ok(format!("{}\n{} reading(s)", table, history.count))
        }
    }
}

/// Format daemon info
pub fn format_info(info: &InfoResponse, format: &OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(info)?),
        OutputFormat::Table => {
            let mut output = String::new();
            output.push_str(&"Airsense Daemon Information".bold().to_string());
            output.push('\n');
            output.push_str(&format!("Version: {}", info.version.cyan()));
            output.push('\n');
            output.push_str(&format!(
                "Device Connected: {}",
                if info.device_connected {
                    "Yes".green()
                } else {
                    "No".red()
                }
            ));
            if let Some(device) = &info.device {
                output.push('\n');
                output.push_str(&format!("Device: {}", device.cyan()));
            }
            output.push('\n');
            output.push_str(&format!(
                "Uptime: {} seconds",
                info.uptime.to_string().yellow()
            ));
            output.push('\n');
            output.push_str(&format!(
                "Cached Readings: {} / {}",
                info.history_len, info.history_capacity
            ));

            Ok(output)
        }
    }
}
