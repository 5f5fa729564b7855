//! Command execution handlers

use anyhow::Result;

use crate::client::AirsenseClient;
use crate::format;

use super::commands::OutputFormat;

/// Handle latest command
pub async fn handle_latest(client: &AirsenseClient, output: &OutputFormat) -> Result<()> {
    let latest = client.get_latest().await?;
    println!("{}", format::format_latest(&latest, &output.into())?);
    Ok(())
}

/// Handle history command
pub async fn handle_history(client: &AirsenseClient, output: &OutputFormat) -> Result<()> {
    let history = client.get_history().await?;
    println!("{}", format::format_history(&history, &output.into())?);
    Ok(())
}

/// Handle advice command
pub async fn handle_advice(client: &AirsenseClient, output: &OutputFormat) -> Result<()> {
    let advice = client.get_advice().await?;
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&advice)?),
        OutputFormat::Table => println!("{}", advice.recommendation),
    }
    Ok(())
}

/// Handle chat command
pub async fn handle_chat(
    client: &AirsenseClient,
    output: &OutputFormat,
    message: &str,
) -> Result<()> {
    let reply = client.chat(message).await?;
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reply)?),
        OutputFormat::Table => println!("{}", reply.response),
    }
    Ok(())
}

/// Handle info command
pub async fn handle_info(client: &AirsenseClient, output: &OutputFormat) -> Result<()> {
    let info = client.get_info().await?;
    println!("{}", format::format_info(&info, &output.into())?);
    Ok(())
}
