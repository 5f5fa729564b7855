//! CLI command definitions

use clap::{Parser, Subcommand};

/// Airsense CLI
#[derive(Parser, Debug)]
#[command(name = "airsensectl")]
#[command(version, about = "Airsense collector CLI", long_about = None)]
pub struct Cli {
    /// Server URL (overrides config file)
    #[arg(short, long)]
    pub server: Option<String>,

    /// Output format (overrides config file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// JSON output
    Json,
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Table => crate::format::OutputFormat::Table,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the latest sensor reading
    Latest,

    /// Show cached readings, oldest first
    History,

    /// Ask the advisor for a recommendation based on the latest reading
    Advice,

    /// Send a chat message to the advisor
    Chat {
        /// The message to send
        message: String,
    },

    /// Show daemon information
    Info,
}
