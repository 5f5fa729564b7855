//! Airsense CLI
//!
//! Command-line interface for querying the Airsense daemon.

use airsensectl::cli::{
    handle_advice, handle_chat, handle_history, handle_info, handle_latest, Cli, Commands,
    OutputFormat,
};
use airsensectl::client::AirsenseClient;
use airsensectl::config::CliConfig;
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load()?;

    // CLI flags take precedence over the config file
    let server_url = cli.server.as_deref().unwrap_or(&config.server_url);
    let output = cli.format.clone().unwrap_or(match config.output_format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    });

    let client = AirsenseClient::new(server_url, config.timeout)?;

    match &cli.command {
        Commands::Latest => handle_latest(&client, &output).await,
        Commands::History => handle_history(&client, &output).await,
        Commands::Advice => handle_advice(&client, &output).await,
        Commands::Chat { message } => handle_chat(&client, &output, message).await,
        Commands::Info => handle_info(&client, &output).await,
    }
}
