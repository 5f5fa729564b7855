//! Info handlers for daemon information and the root endpoint

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::api_ok;
use airsense_core::api::{ApiResponse, InfoResponse};
use axum::response::Html;
use axum::{extract::State, Json};
use tracing::debug;

/// Landing page naming the available endpoints.
///
/// # Endpoint
///
/// `GET /`
pub(crate) async fn root() -> Html<&'static str> {
    debug!("Request: GET /");

    Html(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width,initial-scale=1"/>
    <title>Airsense API</title>
  </head>
  <body style="font-family: Arial, Helvetica, sans-serif; margin: 2rem;">
    <h1>Airsense collector</h1>
    <p>ESP32 air quality collector and advisor proxy.</p>
    <ul>
      <li><a href="/sensor/latest">/sensor/latest</a> - latest sensor reading</li>
      <li><a href="/sensor/history">/sensor/history</a> - cached readings</li>
      <li><a href="/ai/advice">/ai/advice</a> - AI recommendation for the latest reading</li>
      <li>/chat - POST a message to the advisor</li>
      <li><a href="/info">/info</a> - daemon information</li>
    </ul>
  </body>
</html>"#,
    )
}

/// Retrieve daemon information.
///
/// # Endpoint
///
/// `GET /info`
pub(crate) async fn get_info(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<InfoResponse>>, ApiError> {
    debug!("Request: GET /info");

    let info = InfoResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        device_connected: state.device.is_some(),
        device: state.device.clone(),
        uptime: state.start_time.elapsed().as_secs(),
        history_len: state.cache.len().await,
        history_capacity: state.cache.capacity().await,
    };

    api_ok!(info)
}
